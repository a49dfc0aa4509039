use crate::error::MatcherError;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use log::*;

pub const FUTURE_PREDICATE: &str = "future";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_FORMAT_LEN: usize = "YYYY-MM-DD".len();

/// The predicate grammar accepted by `EntryDate` rule lines:
/// - `future`
/// - `before:YYYY-MM-DD`
/// - `after:YYYY-MM-DD`
/// - `between:YYYY-MM-DD,YYYY-MM-DD`
///
/// Calendar dates are taken at midnight UTC. All the comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePredicate {
    Future,
    Before(DateTime<Utc>),
    After(DateTime<Utc>),
    Between(DateTime<Utc>, DateTime<Utc>),
}

impl DatePredicate {
    pub fn parse(pattern: &str) -> Result<DatePredicate, MatcherError> {
        if pattern == FUTURE_PREDICATE {
            return Ok(DatePredicate::Future);
        }

        let (operator, date_str) = pattern.split_once(':').ok_or_else(|| {
            MatcherError::DatePredicateParseError {
                message: format!("Date predicate [{}] has no operator", pattern),
            }
        })?;

        match operator {
            "before" => Ok(DatePredicate::Before(parse_date(date_str)?)),
            "after" => Ok(DatePredicate::After(parse_date(date_str)?)),
            "between" => {
                let dates: Vec<&str> = date_str.split(',').collect();
                if dates.len() != 2 {
                    return Err(MatcherError::DatePredicateParseError {
                        message: format!(
                            "The 'between' predicate expects two dates, found [{}]",
                            date_str
                        ),
                    });
                }
                Ok(DatePredicate::Between(parse_date(dates[0])?, parse_date(dates[1])?))
            }
            _ => Err(MatcherError::DatePredicateParseError {
                message: format!("Unknown date operator [{}]", operator),
            }),
        }
    }

    /// Evaluates the predicate against the current time.
    pub fn matches(&self, date: &DateTime<FixedOffset>) -> bool {
        self.matches_at(date, &Utc::now())
    }

    /// Evaluates the predicate using `now` as the current time.
    pub fn matches_at(&self, date: &DateTime<FixedOffset>, now: &DateTime<Utc>) -> bool {
        let date = date.with_timezone(&Utc);
        match self {
            DatePredicate::Future => date > *now,
            DatePredicate::Before(target) => date < *target,
            DatePredicate::After(target) => date > *target,
            DatePredicate::Between(start, end) => date > *start && date < *end,
        }
    }
}

fn parse_date(date_str: &str) -> Result<DateTime<Utc>, MatcherError> {
    let parse_error = |cause: String| MatcherError::DatePredicateParseError {
        message: format!("Cannot parse date [{}] with format YYYY-MM-DD: {}", date_str, cause),
    };

    if !has_date_layout(date_str) {
        return Err(parse_error("expected layout YYYY-MM-DD".to_owned()));
    }
    let naive = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|err| parse_error(err.to_string()))?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| parse_error("invalid midnight".to_owned()))?;
    Ok(Utc.from_utc_datetime(&naive))
}

// chrono skips blanks before numeric fields and accepts a signed year,
// so the digit positions are checked before parsing.
fn has_date_layout(date_str: &str) -> bool {
    let bytes = date_str.as_bytes();
    bytes.len() == DATE_FORMAT_LEN
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Returns whether the date satisfies the predicate.
/// A pattern outside the predicate grammar never matches.
pub fn is_date_matching_pattern(date: &DateTime<FixedOffset>, pattern: &str) -> bool {
    match DatePredicate::parse(pattern) {
        Ok(predicate) => predicate.matches(date),
        Err(err) => {
            trace!("is_date_matching_pattern - pattern [{}] does not match: {}", pattern, err);
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    #[test]
    fn should_match_before() {
        let date = date("2024-06-15T12:00:00+00:00");

        assert!(is_date_matching_pattern(&date, "before:2024-07-01"));
        assert!(!is_date_matching_pattern(&date, "before:2024-06-01"));
        assert!(!is_date_matching_pattern(&date, "before:2024-06-15"));
    }

    #[test]
    fn should_match_after() {
        let date = date("2024-06-15T12:00:00+00:00");

        assert!(!is_date_matching_pattern(&date, "after:2024-07-01"));
        assert!(is_date_matching_pattern(&date, "after:2024-06-01"));
        assert!(is_date_matching_pattern(&date, "after:2024-06-15"));
    }

    #[test]
    fn should_be_strict_at_midnight() {
        let midnight = date("2024-06-15T00:00:00+00:00");

        assert!(!is_date_matching_pattern(&midnight, "before:2024-06-15"));
        assert!(!is_date_matching_pattern(&midnight, "after:2024-06-15"));
        assert!(!is_date_matching_pattern(&midnight, "between:2024-06-15,2024-06-20"));
    }

    #[test]
    fn should_compare_instants_across_timezones() {
        // 2024-06-14T23:00:00Z
        let date = date("2024-06-15T01:00:00+02:00");

        assert!(is_date_matching_pattern(&date, "before:2024-06-15"));
    }

    #[test]
    fn should_match_between() {
        let date = date("2024-06-15T12:00:00+00:00");

        assert!(is_date_matching_pattern(&date, "between:2024-01-01,2024-12-31"));
        assert!(!is_date_matching_pattern(&date, "between:2024-07-01,2024-12-31"));
        assert!(!is_date_matching_pattern(&date, "between:2024-12-31,2024-01-01"));
    }

    #[test]
    fn between_should_require_exactly_two_dates() {
        let date = date("2024-06-15T12:00:00+00:00");

        assert!(!is_date_matching_pattern(&date, "between:2024-01-01"));
        assert!(!is_date_matching_pattern(&date, "between:2024-01-01,2024-12-31,2025-01-01"));
        assert!(!is_date_matching_pattern(&date, "between:"));
    }

    #[test]
    fn should_match_future_dates_only() {
        let now = Utc::now();
        let past: DateTime<FixedOffset> = (now - Duration::days(1)).into();
        let future: DateTime<FixedOffset> = (now + Duration::days(1)).into();

        assert!(!is_date_matching_pattern(&past, "future"));
        assert!(is_date_matching_pattern(&future, "future"));
    }

    #[test]
    fn future_should_be_strict() {
        let now = date("2024-06-15T12:00:00+00:00");

        assert!(!DatePredicate::Future.matches_at(&now, &now.with_timezone(&Utc)));
    }

    #[test]
    fn should_not_match_malformed_patterns() {
        let date = date("2024-06-15T12:00:00+00:00");

        assert!(!is_date_matching_pattern(&date, "xyz"));
        assert!(!is_date_matching_pattern(&date, ""));
        assert!(!is_date_matching_pattern(&date, "Future"));
        assert!(!is_date_matching_pattern(&date, "since:2024-01-01"));
        assert!(!is_date_matching_pattern(&date, "before:2024/07/01"));
        assert!(!is_date_matching_pattern(&date, "before:2024-7-1"));
        assert!(!is_date_matching_pattern(&date, "before:2024-02-30"));
        assert!(!is_date_matching_pattern(&date, "after:2024-01-01 "));
        assert!(!is_date_matching_pattern(&date, "between:2024-01-01,xyz"));
        assert!(!is_date_matching_pattern(&date, "before:2024-07- 1"));
        assert!(!is_date_matching_pattern(&date, "before:2024- 7-01"));
        assert!(!is_date_matching_pattern(&date, "before:+024-07-01"));
        assert!(!is_date_matching_pattern(&date, "between:2024-01-01,2024-12- 1"));
    }

    #[test]
    fn should_reject_dates_not_in_the_digit_layout() {
        assert!(DatePredicate::parse("before:2024-07- 1").is_err());
        assert!(DatePredicate::parse("before:2024- 7-01").is_err());
        assert!(DatePredicate::parse("before:+024-07-01").is_err());
        assert!(DatePredicate::parse("after: 2024-7-01").is_err());
        assert!(DatePredicate::parse("before:2024-07-01").is_ok());
    }

    #[test]
    fn should_parse_the_predicates() {
        assert_eq!(Ok(DatePredicate::Future), DatePredicate::parse("future"));
        assert_eq!(
            Ok(DatePredicate::Before(utc("2024-07-01T00:00:00Z"))),
            DatePredicate::parse("before:2024-07-01")
        );
        assert_eq!(
            Ok(DatePredicate::Between(utc("2024-01-01T00:00:00Z"), utc("2024-12-31T00:00:00Z"))),
            DatePredicate::parse("between:2024-01-01,2024-12-31")
        );
        assert!(DatePredicate::parse("before").is_err());
    }

    fn date(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn utc(rfc3339: &str) -> DateTime<Utc> {
        date(rfc3339).with_timezone(&Utc)
    }
}
