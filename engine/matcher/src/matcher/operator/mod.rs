//! The operator module contains the logic to build the operator of a rule line.
//!
//! An *Operator* is built once per rule line and determines whether the line
//! is matched by an Entry.

use crate::accessor::Accessor;
use crate::config::RuleLine;
use crate::error::MatcherError;
use feedsift_common_api::Entry;
use log::*;
use std::fmt;

pub mod date;
pub mod false_operator;
pub mod regex;

/// The Trait for a generic matcher.operator
pub trait Operator: fmt::Debug + Send + Sync {
    /// Returns the Operator name.
    fn name(&self) -> &str;

    /// Executes the current matcher.operator on a target Entry
    /// and returns whether the Entry matches it.
    fn evaluate(&self, entry: &Entry) -> bool;
}

/// The Operator instance builder
#[derive(Default)]
pub struct OperatorBuilder;

impl OperatorBuilder {
    pub fn new() -> OperatorBuilder {
        OperatorBuilder
    }

    /// Returns the Operator for a rule line.
    /// The field dispatch is resolved here, so evaluating the operator never compares field names.
    ///
    /// # Example
    ///
    /// ```rust
    ///
    /// use feedsift_engine_matcher::config::RuleLine;
    /// use feedsift_engine_matcher::matcher::operator::OperatorBuilder;
    ///
    /// let line = RuleLine::parse(1, "EntryTitle=(?i)rust");
    ///
    /// let builder = OperatorBuilder::new();
    /// let operator = builder.build(&line).unwrap(); // operator is an instance of Regex
    /// assert_eq!("regex", operator.name());
    /// ```
    pub fn build(&self, line: &RuleLine) -> Result<Box<dyn Operator>, MatcherError> {
        let field = line.field.clone()?;
        let pattern = line
            .pattern
            .as_deref()
            .ok_or_else(|| MatcherError::MissingSeparatorError { rule: line.raw.to_owned() })?;

        let result: Result<Box<dyn Operator>, MatcherError> = match Accessor::for_field(field) {
            Some(accessor) => Ok(Box::new(crate::matcher::operator::regex::Regex::build(
                pattern, accessor,
            )?)),
            // EntryDate is the only field without a textual accessor
            None => Ok(Box::new(crate::matcher::operator::date::Date::build(pattern)?)),
        };

        trace!(
            "OperatorBuilder - build: return matcher.operator [{:?}] for rule line [{}]",
            &result,
            line.raw
        );
        result
    }

    /// Like build, but a rule line that cannot be built becomes an operator that never matches.
    pub fn build_or_false(&self, line: &RuleLine) -> Box<dyn Operator> {
        match self.build(line) {
            Ok(operator) => operator,
            Err(err) => {
                debug!(
                    "OperatorBuilder - rule line [{}] at line [{}] will never match: {}",
                    line.raw, line.number, err
                );
                Box::new(crate::matcher::operator::false_operator::False {})
            }
        }
    }
}
