//! The config module contains the definitions of the rule set text format:
//! newline separated lines of `FieldName=Pattern`.

use std::fmt;

pub mod rule;

pub use rule::{parse_rule_set, EntryField, RuleLine};

/// Which semantic a rule set is configured for.
/// It only changes how validation errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSetKind {
    Block,
    Keep,
}

impl RuleSetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleSetKind::Block => "block",
            RuleSetKind::Keep => "keep",
        }
    }
}

impl fmt::Display for RuleSetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
