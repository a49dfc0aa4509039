use crate::config::RuleSetKind;
use thiserror::Error;

/// Errors raised while building the matcher structures from a rule line.
/// They never reach the caller of an evaluation: a rule line that cannot be built
/// simply never matches.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum MatcherError {
    #[error("RegexBuildFailError: [{message}]\n cause: [{cause}]")]
    RegexBuildFailError { message: String, cause: String },

    #[error("DatePredicateParseError: [{message}]")]
    DatePredicateParseError { message: String },

    #[error("UnknownFieldError: Field [{field}] is unknown")]
    UnknownFieldError { field: String },

    #[error("MissingSeparatorError: Rule [{rule}] has no '=' separator")]
    MissingSeparatorError { rule: String },
}

/// The kind of problem found by the rule syntax validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleSyntaxErrorKind {
    FieldNameInvalid,
    SeparatorRequired,
    PatternRequired,
    InvalidRegex,
    InvalidDatePredicate,
}

impl RuleSyntaxErrorKind {
    fn key_suffix(&self) -> &'static str {
        match self {
            RuleSyntaxErrorKind::FieldNameInvalid => "fieldname_invalid",
            RuleSyntaxErrorKind::SeparatorRequired => "separator_required",
            RuleSyntaxErrorKind::PatternRequired => "regex_required",
            RuleSyntaxErrorKind::InvalidRegex => "invalid_regex",
            RuleSyntaxErrorKind::InvalidDatePredicate => "invalid_date",
        }
    }
}

/// The first syntax problem found in a rule set.
/// It carries everything a UI needs to render a localized message.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("RuleSyntaxError: [{}] at line [{line}]", self.message_key())]
pub struct RuleSyntaxError {
    pub kind: RuleSyntaxErrorKind,
    pub rule_set_kind: RuleSetKind,
    /// 1-based number of the offending line.
    pub line: usize,
    /// The accepted field names, only set for `FieldNameInvalid`.
    pub allowed_fields: Option<String>,
}

impl RuleSyntaxError {
    pub fn new(kind: RuleSyntaxErrorKind, rule_set_kind: RuleSetKind, line: usize) -> Self {
        RuleSyntaxError { kind, rule_set_kind, line, allowed_fields: None }
    }

    /// Returns the localizable message identifier, e.g. `error.settings_block_rule_invalid_regex`.
    pub fn message_key(&self) -> String {
        format!("error.settings_{}_rule_{}", self.rule_set_kind, self.kind.key_suffix())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_build_the_message_key_from_the_rule_set_kind() {
        let error =
            RuleSyntaxError::new(RuleSyntaxErrorKind::PatternRequired, RuleSetKind::Block, 2);
        assert_eq!("error.settings_block_rule_regex_required", error.message_key());

        let error = RuleSyntaxError::new(RuleSyntaxErrorKind::InvalidRegex, RuleSetKind::Keep, 1);
        assert_eq!("error.settings_keep_rule_invalid_regex", error.message_key());

        let error =
            RuleSyntaxError::new(RuleSyntaxErrorKind::FieldNameInvalid, RuleSetKind::Keep, 1);
        assert_eq!("error.settings_keep_rule_fieldname_invalid", error.message_key());

        let error =
            RuleSyntaxError::new(RuleSyntaxErrorKind::SeparatorRequired, RuleSetKind::Block, 1);
        assert_eq!("error.settings_block_rule_separator_required", error.message_key());
    }

    #[test]
    fn should_display_the_key_and_the_line() {
        let error = RuleSyntaxError::new(RuleSyntaxErrorKind::InvalidRegex, RuleSetKind::Block, 3);
        assert_eq!(
            "RuleSyntaxError: [error.settings_block_rule_invalid_regex] at line [3]",
            error.to_string()
        );
    }
}
