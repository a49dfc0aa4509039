use crate::error::MatcherError;
use crate::matcher::date::DatePredicate;
use crate::matcher::operator::Operator;
use feedsift_common_api::Entry;

const OPERATOR_NAME: &str = "date";

/// A matching matcher.operator that evaluates the Entry date against a date predicate.
#[derive(Debug)]
pub struct Date {
    predicate: DatePredicate,
}

impl Date {
    pub fn build(pattern: &str) -> Result<Date, MatcherError> {
        Ok(Date { predicate: DatePredicate::parse(pattern)? })
    }
}

impl Operator for Date {
    fn name(&self) -> &str {
        OPERATOR_NAME
    }

    fn evaluate(&self, entry: &Entry) -> bool {
        self.predicate.matches(&entry.date)
    }
}
