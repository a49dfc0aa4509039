use crate::config::FilterConfig;
use crate::error::FilterCliError;
use feedsift_common_api::{Entry, Feed};
use feedsift_engine_matcher::cache::RuleSetCache;
use feedsift_engine_matcher::matcher::Matcher;
use log::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, Write};

/// The outcome of filtering one Entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryFilterResult {
    pub url: String,
    pub feed_id: i64,
    pub blocked: bool,
    pub kept: bool,
    /// The rule line that blocked or kept the Entry.
    pub rule: Option<String>,
}

pub fn evaluate(config: &FilterConfig, input: Option<&str>) -> Result<(), FilterCliError> {
    let matcher = Matcher::with_cache(RuleSetCache::new(config.filter.cache_max_entries));

    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            info!("Evaluate - reading entries from [{}]", path);
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(BufReader::new(stdin())),
    };

    let stdout = stdout();
    let mut writer = stdout.lock();
    let processed = evaluate_entries(&matcher, config, reader, &mut writer)?;
    info!("Evaluate - processed [{}] entries", processed);
    Ok(())
}

/// Reads one JSON Entry per line and writes one JSON EntryFilterResult per line.
/// Lines that are not valid entries are skipped. Returns the number of evaluated entries.
pub fn evaluate_entries<R: BufRead, W: Write>(
    matcher: &Matcher,
    config: &FilterConfig,
    reader: R,
    writer: &mut W,
) -> Result<usize, FilterCliError> {
    let mut processed = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let entry: Entry = match serde_json::from_str(&line) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Evaluate - skipping line [{}], it is not a valid entry: {}", index + 1, err);
                continue;
            }
        };

        let result = filter_entry(matcher, config, &entry);
        serde_json::to_writer(&mut *writer, &result)?;
        writeln!(writer)?;
        processed += 1;
    }
    Ok(processed)
}

/// Applies the block rules first; the keep rules are evaluated only for Entries not blocked.
pub fn filter_entry(matcher: &Matcher, config: &FilterConfig, entry: &Entry) -> EntryFilterResult {
    let default_feed;
    let feed = match config.feed(entry.feed_id) {
        Some(feed) => feed,
        None => {
            debug!("Evaluate - feed [{}] is not configured, using empty rules", entry.feed_id);
            default_feed = Feed { id: entry.feed_id, ..Default::default() };
            &default_feed
        }
    };

    let block = matcher.evaluate_block(
        feed,
        entry,
        &config.user.block_filter_entry_rules,
        &feed.blocklist_rules,
    );
    if block.matched {
        return EntryFilterResult {
            url: entry.url.to_owned(),
            feed_id: entry.feed_id,
            blocked: true,
            kept: false,
            rule: block.rule,
        };
    }

    let keep = matcher.evaluate_keep(
        feed,
        entry,
        &config.user.keep_filter_entry_rules,
        &feed.keeplist_rules,
    );
    EntryFilterResult {
        url: entry.url.to_owned(),
        feed_id: entry.feed_id,
        blocked: false,
        kept: keep.matched,
        rule: keep.rule,
    }
}
