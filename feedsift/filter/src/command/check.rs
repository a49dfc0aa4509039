use crate::config::FilterConfig;
use crate::error::FilterCliError;
use feedsift_engine_matcher::config::RuleSetKind;
use feedsift_engine_matcher::error::RuleSyntaxError;
use feedsift_engine_matcher::validator::RuleSyntaxValidator;
use log::*;

/// A rule set that did not pass the validation.
#[derive(Debug, PartialEq)]
pub struct RuleSetCheckFailure {
    /// Where the rule set is configured, e.g. `user.block_filter_entry_rules`.
    pub source: String,
    pub error: RuleSyntaxError,
}

pub fn check(config: &FilterConfig) -> Result<(), FilterCliError> {
    println!("Check filter configuration");

    let failures = check_rule_sets(config);
    for failure in &failures {
        println!(
            "{}: {} at line {}",
            failure.source,
            failure.error.message_key(),
            failure.error.line
        );
        if let Some(allowed_fields) = &failure.error.allowed_fields {
            println!("  allowed field names: {}", allowed_fields);
        }
    }

    if failures.is_empty() {
        println!("The rule sets are valid");
        Ok(())
    } else {
        Err(FilterCliError::InvalidRulesError { count: failures.len() })
    }
}

/// Validates the User rule sets and the rule sets of every Feed.
pub fn check_rule_sets(config: &FilterConfig) -> Vec<RuleSetCheckFailure> {
    let validator = if config.filter.strict_date_grammar {
        RuleSyntaxValidator::with_strict_date_grammar()
    } else {
        RuleSyntaxValidator::new()
    };

    let mut rule_sets = vec![
        (
            "user.block_filter_entry_rules".to_owned(),
            config.user.block_filter_entry_rules.as_str(),
            RuleSetKind::Block,
        ),
        (
            "user.keep_filter_entry_rules".to_owned(),
            config.user.keep_filter_entry_rules.as_str(),
            RuleSetKind::Keep,
        ),
    ];
    for feed in &config.feeds {
        rule_sets.push((
            format!("feeds[{}].blocklist_rules", feed.id),
            feed.blocklist_rules.as_str(),
            RuleSetKind::Block,
        ));
        rule_sets.push((
            format!("feeds[{}].keeplist_rules", feed.id),
            feed.keeplist_rules.as_str(),
            RuleSetKind::Keep,
        ));
    }

    rule_sets
        .into_iter()
        .filter_map(|(source, rules, kind)| {
            debug!("Check - validating [{}]", source);
            validator.validate(rules, kind).err().map(|error| {
                warn!("Check - rule set [{}] is not valid: {}", source, error);
                RuleSetCheckFailure { source, error }
            })
        })
        .collect()
}
