pub mod date;
pub mod operator;

use crate::cache::RuleSetCache;
use crate::config::{parse_rule_set, EntryField, RuleLine};
use crate::matcher::operator::{Operator, OperatorBuilder};
use feedsift_common_api::{Entry, Feed, User};
use log::*;
use std::sync::Arc;

/// The Matcher's internal representation of a rule line, which contains the operator built
///   from the config::RuleLine.
#[derive(Debug)]
pub struct MatcherRule {
    line: RuleLine,
    operator: Box<dyn Operator>,
}

/// A rule set built once and ready to be evaluated against any number of Entries.
/// A RuleSetMatcher is immutable and thread-safe.
#[derive(Debug)]
pub struct RuleSetMatcher {
    rules: Vec<MatcherRule>,
}

impl RuleSetMatcher {
    /// Builds the operators of every line of a rule set.
    /// Building never fails: lines that are malformed, target an unknown field or contain an
    /// invalid pattern are kept, but they never match.
    pub fn build(rules: &str) -> RuleSetMatcher {
        let operator_builder = OperatorBuilder::new();
        let rules = parse_rule_set(rules)
            .into_iter()
            .map(|line| MatcherRule { operator: operator_builder.build_or_false(&line), line })
            .collect();
        RuleSetMatcher { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns the first rule line matched by the Entry.
    /// The lines following the first match are not evaluated.
    pub fn find_match(&self, entry: &Entry) -> Option<&RuleLine> {
        self.rules.iter().find(|rule| rule.operator.evaluate(entry)).map(|rule| &rule.line)
    }
}

/// The result of a block or keep evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterVerdict {
    /// For block rules: whether the Entry is blocked.
    /// For keep rules: whether the Entry is kept.
    pub matched: bool,
    /// The rule line that produced the verdict, if any.
    pub rule: Option<String>,
}

impl FilterVerdict {
    fn matched_by(rule: String) -> FilterVerdict {
        FilterVerdict { matched: true, rule: Some(rule) }
    }

    fn not_matched() -> FilterVerdict {
        FilterVerdict { matched: false, rule: None }
    }

    fn default_allow() -> FilterVerdict {
        FilterVerdict { matched: true, rule: None }
    }
}

/// The Matcher applies the block and keep rule sets to Entries.
/// A Matcher instance is stateless from the caller point of view and thread-safe; consequently,
///   a single instance can serve the entire application.
#[derive(Default)]
pub struct Matcher {
    cache: Option<RuleSetCache>,
}

impl Matcher {
    /// Builds a Matcher that compiles the rule sets at every evaluation.
    pub fn new() -> Matcher {
        Matcher { cache: None }
    }

    /// Builds a Matcher that keeps the compiled rule sets in a RuleSetCache.
    pub fn with_cache(cache: RuleSetCache) -> Matcher {
        Matcher { cache: Some(cache) }
    }

    pub fn cache(&self) -> Option<&RuleSetCache> {
        self.cache.as_ref()
    }

    fn rule_set(&self, rules: &str) -> Arc<RuleSetMatcher> {
        match &self.cache {
            Some(cache) => cache.get_or_build(rules),
            None => Arc::new(RuleSetMatcher::build(rules)),
        }
    }

    /// Returns a matched verdict if at least one line of the primary rules or of the
    /// secondary rules matches the Entry. Either source alone can block it.
    pub fn evaluate_block(
        &self,
        feed: &Feed,
        entry: &Entry,
        primary: &str,
        secondary: &str,
    ) -> FilterVerdict {
        trace!("Matcher evaluate_block - evaluating entry [{}]", entry.url);
        for rules in [primary, secondary] {
            if let Some(rule) = self.first_matching_rule(entry, rules) {
                debug!(
                    "Blocking entry based on rule - entry_url: [{}], feed_id: [{}], feed_url: [{}], rule: [{}]",
                    entry.url, feed.id, feed.feed_url, rule
                );
                return FilterVerdict::matched_by(rule);
            }
        }
        FilterVerdict::not_matched()
    }

    /// Returns whether the Entry is kept.
    /// Only the first non empty rule set among primary and secondary is used; the Entry is kept
    /// only if one of its lines matches. When both are empty the Entry is kept.
    pub fn evaluate_keep(
        &self,
        feed: &Feed,
        entry: &Entry,
        primary: &str,
        secondary: &str,
    ) -> FilterVerdict {
        trace!("Matcher evaluate_keep - evaluating entry [{}]", entry.url);
        let rules = if !primary.is_empty() {
            primary
        } else if !secondary.is_empty() {
            secondary
        } else {
            return FilterVerdict::default_allow();
        };

        match self.first_matching_rule(entry, rules) {
            Some(rule) => {
                debug!(
                    "Allowing entry based on rule - entry_url: [{}], feed_id: [{}], feed_url: [{}], rule: [{}]",
                    entry.url, feed.id, feed.feed_url, rule
                );
                FilterVerdict::matched_by(rule)
            }
            None => FilterVerdict::not_matched(),
        }
    }

    /// Applies the User block rules and the Feed blocklist rules.
    pub fn is_blocked_entry(&self, feed: &Feed, entry: &Entry, user: &User) -> bool {
        self.evaluate_block(feed, entry, &user.block_filter_entry_rules, &feed.blocklist_rules)
            .matched
    }

    /// Applies the User keep rules, or the Feed keeplist rules if the User has none.
    pub fn is_allowed_entry(&self, feed: &Feed, entry: &Entry, user: &User) -> bool {
        self.evaluate_keep(feed, entry, &user.keep_filter_entry_rules, &feed.keeplist_rules)
            .matched
    }

    fn first_matching_rule(&self, entry: &Entry, rules: &str) -> Option<String> {
        if rules.is_empty() {
            return None;
        }
        self.rule_set(rules).find_match(entry).map(|line| line.raw.to_owned())
    }
}

/// Returns true if the Entry is matched by a line of either rule set.
pub fn evaluate_block(entry: &Entry, primary: &str, secondary: &str) -> bool {
    Matcher::new().evaluate_block(&feed_of(entry), entry, primary, secondary).matched
}

/// Returns true if the Entry is kept by the first non empty rule set, or if both are empty.
pub fn evaluate_keep(entry: &Entry, primary: &str, secondary: &str) -> bool {
    Matcher::new().evaluate_keep(&feed_of(entry), entry, primary, secondary).matched
}

/// Evaluates a single `field_name=pattern` pair against an Entry.
/// Unknown fields, invalid regexes and invalid date predicates never match.
pub fn match_line(entry: &Entry, field_name: &str, pattern: &str) -> bool {
    let line = RuleLine {
        number: 1,
        raw: format!("{}={}", field_name, pattern),
        field: field_name.parse::<EntryField>(),
        pattern: Some(pattern.to_owned()),
    };
    OperatorBuilder::new().build_or_false(&line).evaluate(entry)
}

fn feed_of(entry: &Entry) -> Feed {
    Feed { id: entry.feed_id, ..Default::default() }
}
