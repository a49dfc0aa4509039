use crate::config::rule::{LINE_SEPARATOR, RULE_SEPARATOR};
use crate::config::{EntryField, RuleSetKind};
use crate::error::{RuleSyntaxError, RuleSyntaxErrorKind};
use crate::matcher::date::DatePredicate;
use crate::regex::RegexWrapper;
use log::*;

/// A validator for the rule set text format.
/// It checks each line in order and stops at the first invalid one.
#[derive(Default)]
pub struct RuleSyntaxValidator {
    strict_date_grammar: bool,
}

impl RuleSyntaxValidator {
    /// Returns a validator that checks `EntryDate` patterns only for regex compilability,
    /// like every other field.
    pub fn new() -> RuleSyntaxValidator {
        RuleSyntaxValidator { strict_date_grammar: false }
    }

    /// Returns a validator that also rejects `EntryDate` patterns
    /// outside the date predicate grammar.
    pub fn with_strict_date_grammar() -> RuleSyntaxValidator {
        RuleSyntaxValidator { strict_date_grammar: true }
    }

    /// Validates a rule set.
    /// The empty rule set is valid.
    pub fn validate(&self, rules: &str, kind: RuleSetKind) -> Result<(), RuleSyntaxError> {
        debug!("RuleSyntaxValidator validate - validate [{}] rule set", kind);

        if rules.is_empty() {
            return Ok(());
        }

        for (index, rule) in rules.split(LINE_SEPARATOR).enumerate() {
            self.validate_line(rule, index + 1, kind)?;
        }

        Ok(())
    }

    fn validate_line(
        &self,
        rule: &str,
        line: usize,
        kind: RuleSetKind,
    ) -> Result<(), RuleSyntaxError> {
        trace!("RuleSyntaxValidator - validate line [{}]: [{}]", line, rule);

        let field = EntryField::ALL.iter().find(|field| rule.starts_with(field.name())).ok_or_else(
            || RuleSyntaxError {
                kind: RuleSyntaxErrorKind::FieldNameInvalid,
                rule_set_kind: kind,
                line,
                allowed_fields: Some(EntryField::display_names()),
            },
        )?;

        let pattern = rule[field.name().len()..]
            .strip_prefix(RULE_SEPARATOR)
            .ok_or_else(|| {
                RuleSyntaxError::new(RuleSyntaxErrorKind::SeparatorRequired, kind, line)
            })?;

        if pattern.is_empty() {
            return Err(RuleSyntaxError::new(RuleSyntaxErrorKind::PatternRequired, kind, line));
        }

        if !is_valid_regex(pattern) {
            return Err(RuleSyntaxError::new(RuleSyntaxErrorKind::InvalidRegex, kind, line));
        }

        if self.strict_date_grammar && *field == EntryField::Date {
            if let Err(err) = DatePredicate::parse(pattern) {
                debug!("RuleSyntaxValidator - line [{}] is not a date predicate: {}", line, err);
                return Err(RuleSyntaxError::new(
                    RuleSyntaxErrorKind::InvalidDatePredicate,
                    kind,
                    line,
                ));
            }
        }

        Ok(())
    }
}

/// Validates a rule set with the default validator.
pub fn validate_rule_syntax(rules: &str, kind: RuleSetKind) -> Result<(), RuleSyntaxError> {
    RuleSyntaxValidator::new().validate(rules, kind)
}

/// Verifies that the regex can be compiled.
pub fn is_valid_regex(expr: &str) -> bool {
    RegexWrapper::new(expr).is_ok()
}
