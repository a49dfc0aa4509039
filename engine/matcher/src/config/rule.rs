use crate::error::MatcherError;
use std::fmt;
use std::str::FromStr;

pub const RULE_SEPARATOR: char = '=';
pub const LINE_SEPARATOR: char = '\n';

/// The closed set of Entry fields a rule line can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Title,
    Url,
    CommentsUrl,
    Content,
    Author,
    Tag,
    Date,
}

impl EntryField {
    /// All the fields, in the order used to report and to prefix-match them.
    pub const ALL: [EntryField; 7] = [
        EntryField::Title,
        EntryField::Url,
        EntryField::CommentsUrl,
        EntryField::Content,
        EntryField::Author,
        EntryField::Tag,
        EntryField::Date,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EntryField::Title => "EntryTitle",
            EntryField::Url => "EntryURL",
            EntryField::CommentsUrl => "EntryCommentsURL",
            EntryField::Content => "EntryContent",
            EntryField::Author => "EntryAuthor",
            EntryField::Tag => "EntryTag",
            EntryField::Date => "EntryDate",
        }
    }

    /// Returns the accepted field names quoted and joined for display,
    /// e.g. `'EntryTitle', 'EntryURL', ...`
    pub fn display_names() -> String {
        let names: Vec<&str> = EntryField::ALL.iter().map(|field| field.name()).collect();
        format!("'{}'", names.join("', '"))
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntryField {
    type Err = MatcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryField::ALL
            .iter()
            .find(|field| field.name() == s)
            .copied()
            .ok_or_else(|| MatcherError::UnknownFieldError { field: s.to_owned() })
    }
}

/// A single line of a rule set.
/// The line is split on the first '=' only, so the pattern may itself contain '='.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleLine {
    /// 1-based position of the line in its rule set.
    pub number: usize,
    pub raw: String,
    pub field: Result<EntryField, MatcherError>,
    pub pattern: Option<String>,
}

impl RuleLine {
    pub fn parse(number: usize, raw: &str) -> RuleLine {
        let (field, pattern) = match raw.split_once(RULE_SEPARATOR) {
            Some((field_name, pattern)) => (field_name.parse(), Some(pattern.to_owned())),
            None => (Err(MatcherError::MissingSeparatorError { rule: raw.to_owned() }), None),
        };
        RuleLine { number, raw: raw.to_owned(), field, pattern }
    }
}

/// Splits a rule set into its lines.
/// An empty rule set has no lines at all, while every other string has at least one,
/// possibly empty, line.
pub fn parse_rule_set(rules: &str) -> Vec<RuleLine> {
    if rules.is_empty() {
        return vec![];
    }
    rules
        .split(LINE_SEPARATOR)
        .enumerate()
        .map(|(index, line)| RuleLine::parse(index + 1, line))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_parse_field_names() {
        for field in EntryField::ALL.iter() {
            assert_eq!(Ok(*field), field.name().parse::<EntryField>());
        }
        assert!("entrytitle".parse::<EntryField>().is_err());
        assert!("EntryTitles".parse::<EntryField>().is_err());
        assert!("".parse::<EntryField>().is_err());
    }

    #[test]
    fn should_join_the_field_names_for_display() {
        assert_eq!(
            concat!(
                "'EntryTitle', 'EntryURL', 'EntryCommentsURL', 'EntryContent', ",
                "'EntryAuthor', 'EntryTag', 'EntryDate'"
            ),
            EntryField::display_names()
        );
    }

    #[test]
    fn should_return_no_lines_for_an_empty_rule_set() {
        assert!(parse_rule_set("").is_empty());
    }

    #[test]
    fn should_split_on_the_first_separator_only() {
        // Act
        let line = RuleLine::parse(1, "EntryURL=^https://example.org/\\?id=[0-9]+");

        // Assert
        assert_eq!(Ok(EntryField::Url), line.field);
        assert_eq!(Some("^https://example.org/\\?id=[0-9]+".to_owned()), line.pattern);
    }

    #[test]
    fn should_number_lines_from_one() {
        // Act
        let lines = parse_rule_set("EntryTitle=foo\nEntryTag=bar\n");

        // Assert
        assert_eq!(3, lines.len());
        assert_eq!(1, lines[0].number);
        assert_eq!("EntryTitle=foo", lines[0].raw);
        assert_eq!(2, lines[1].number);
        assert_eq!(Ok(EntryField::Tag), lines[1].field);
        assert_eq!(3, lines[2].number);
        assert!(lines[2].field.is_err());
    }

    #[test]
    fn should_keep_unknown_fields_and_missing_separators_as_errors() {
        let unknown = RuleLine::parse(1, "BadField=foo");
        assert_eq!(
            Err(MatcherError::UnknownFieldError { field: "BadField".to_owned() }),
            unknown.field
        );
        assert_eq!(Some("foo".to_owned()), unknown.pattern);

        let no_separator = RuleLine::parse(2, "EntryTitle");
        assert!(matches!(no_separator.field, Err(MatcherError::MissingSeparatorError { .. })));
        assert_eq!(None, no_separator.pattern);
    }
}
