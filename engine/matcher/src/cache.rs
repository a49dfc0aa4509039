use crate::matcher::RuleSetMatcher;
use arc_swap::ArcSwap;
use log::*;
use std::collections::HashMap;
use std::sync::Arc;

pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1024;

type Snapshot = HashMap<String, Arc<RuleSetMatcher>>;

/// Keeps the compiled RuleSetMatchers keyed by their rule set text.
///
/// Readers always see an immutable snapshot; a new snapshot is published on every insertion,
/// the current one is never modified in place. When the snapshot reaches `max_entries`
/// it is discarded before the next insertion.
pub struct RuleSetCache {
    snapshot: ArcSwap<Snapshot>,
    max_entries: usize,
}

impl Default for RuleSetCache {
    fn default() -> Self {
        RuleSetCache::new(DEFAULT_CACHE_MAX_ENTRIES)
    }
}

impl RuleSetCache {
    pub fn new(max_entries: usize) -> RuleSetCache {
        RuleSetCache { snapshot: ArcSwap::from_pointee(HashMap::new()), max_entries }
    }

    pub fn get(&self, rules: &str) -> Option<Arc<RuleSetMatcher>> {
        self.snapshot.load().get(rules).cloned()
    }

    /// Returns the cached matcher for a rule set, building and publishing it on a miss.
    pub fn get_or_build(&self, rules: &str) -> Arc<RuleSetMatcher> {
        if let Some(matcher) = self.get(rules) {
            return matcher;
        }

        let matcher = Arc::new(RuleSetMatcher::build(rules));
        if self.max_entries == 0 {
            return matcher;
        }

        self.snapshot.rcu(|current| {
            let mut next = if current.len() >= self.max_entries {
                debug!("RuleSetCache - max entries [{}] reached, clearing", self.max_entries);
                HashMap::new()
            } else {
                HashMap::clone(current)
            };
            next.insert(rules.to_owned(), matcher.clone());
            next
        });
        matcher
    }

    pub fn len(&self) -> usize {
        self.snapshot.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.snapshot.store(Arc::new(HashMap::new()));
    }
}
