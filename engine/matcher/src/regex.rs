use crate::error::MatcherError;
use regex::Regex;
use std::ops::Deref;

/// A compiled Regex that remembers its source pattern.
/// This allows a regex to be used in PartialEq checks and to be printed as written by the user.
#[derive(Debug, Clone)]
pub struct RegexWrapper {
    regex_string: String,
    regex: Regex,
}

impl RegexWrapper {
    pub fn new<S: Into<String>>(regex_string: S) -> Result<Self, MatcherError> {
        let regex_string = regex_string.into();
        let regex = Regex::new(&regex_string).map_err(|e| MatcherError::RegexBuildFailError {
            message: format!("Cannot parse regex [{}]", regex_string),
            cause: e.to_string(),
        })?;
        Ok(Self { regex, regex_string })
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn as_str(&self) -> &str {
        &self.regex_string
    }
}

impl Deref for RegexWrapper {
    type Target = Regex;

    fn deref(&self) -> &Self::Target {
        self.regex()
    }
}

impl PartialEq for RegexWrapper {
    fn eq(&self, other: &Self) -> bool {
        other.regex_string.eq(&self.regex_string)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_compare_regexes() {
        assert_eq!(RegexWrapper::new(".*").unwrap(), RegexWrapper::new(".*").unwrap());
        assert_ne!(RegexWrapper::new(".*").unwrap(), RegexWrapper::new(".*[1-9]").unwrap());
    }

    #[test]
    fn should_fail_on_unclosed_group() {
        match RegexWrapper::new("(unclosed") {
            Err(MatcherError::RegexBuildFailError { message, .. }) => {
                assert_eq!("Cannot parse regex [(unclosed]", message)
            }
            _ => assert!(false),
        }
    }

    #[test]
    fn should_search_instead_of_full_match() {
        let regex = RegexWrapper::new("rust").unwrap();
        assert!(regex.is_match("all about rust and more"));
        assert_eq!("rust", regex.as_str());
    }
}
