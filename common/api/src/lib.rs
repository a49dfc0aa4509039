use chrono::prelude::Local;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// An Entry is a single item published by a Feed.
/// Entries are read-only input for the filtering engine: their fields are matched against
///   the block and keep rule sets configured by the User and by the Feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    #[serde(default)]
    pub feed_id: i64,
    pub url: String,
    #[serde(default)]
    pub comments_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_date")]
    pub date: DateTime<FixedOffset>,
}

fn default_date() -> DateTime<FixedOffset> {
    Local::now().into()
}

impl Entry {
    pub fn new<S: Into<String>>(url: S) -> Entry {
        Entry {
            feed_id: 0,
            url: url.into(),
            comments_url: String::new(),
            title: String::new(),
            content: String::new(),
            author: String::new(),
            tags: vec![],
            date: default_date(),
        }
    }
}

/// The Feed an Entry belongs to.
/// A Feed carries its own block and keep rule sets, which are evaluated after the User ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Feed {
    pub id: i64,
    #[serde(default)]
    pub feed_url: String,
    #[serde(default)]
    pub blocklist_rules: String,
    #[serde(default)]
    pub keeplist_rules: String,
}

impl Feed {
    pub fn new<S: Into<String>>(id: i64, feed_url: S) -> Feed {
        Feed { id, feed_url: feed_url.into(), ..Default::default() }
    }
}

/// The user level rule sets.
/// When not empty, these take precedence over the Feed rule sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    #[serde(default)]
    pub block_filter_entry_rules: String,
    #[serde(default)]
    pub keep_filter_entry_rules: String,
}
