use crate::accessor::{Accessor, AccessorValue};
use crate::error::MatcherError;
use crate::matcher::operator::Operator;
use crate::regex::RegexWrapper;
use feedsift_common_api::Entry;

const OPERATOR_NAME: &str = "regex";

/// A matching matcher.operator that evaluates whether an Entry field contains a match of a regex.
/// For list fields it is enough that one element contains a match.
#[derive(Debug)]
pub struct Regex {
    regex: RegexWrapper,
    target: Accessor,
}

impl Regex {
    pub fn build(regex: &str, target: Accessor) -> Result<Regex, MatcherError> {
        Ok(Regex { regex: RegexWrapper::new(regex)?, target })
    }
}

impl Operator for Regex {
    fn name(&self) -> &str {
        OPERATOR_NAME
    }

    fn evaluate(&self, entry: &Entry) -> bool {
        match self.target.get(entry) {
            AccessorValue::Text(text) => self.regex.is_match(text),
            AccessorValue::List(values) => values.iter().any(|value| self.regex.is_match(value)),
        }
    }
}
