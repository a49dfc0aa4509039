use clap::{Parser, Subcommand};
use config_rs::{Config, ConfigError, File};
use feedsift_common_api::{Feed, User};
use feedsift_common_logger::LoggerConfig;
use feedsift_engine_matcher::cache::DEFAULT_CACHE_MAX_ENTRIES;
use serde::{Deserialize, Serialize};

pub const CONFIG_DIR_DEFAULT: Option<&'static str> = option_env!("FEEDSIFT_CONFIG_DIR_DEFAULT");
pub const CONFIG_FILE_NAME: &str = "filter.toml";

pub fn config_dir_default() -> &'static str {
    CONFIG_DIR_DEFAULT.unwrap_or("/etc/feedsift")
}

#[derive(Parser)]
#[clap(name = "feedsift_filter")]
pub struct Arguments {
    /// The filesystem folder where the filter configuration is saved
    #[clap(long = "config-dir", default_value = config_dir_default())]
    pub config_dir: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Checks that the configured rule sets are valid
    Check,
    /// Reads entries as JSON lines and prints whether each one is blocked or kept
    Evaluate {
        /// The file to read the entries from. Standard input is used if not provided
        #[clap(long)]
        input: Option<String>,
    },
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct FilterConfig {
    /// The logger configuration
    pub logger: LoggerConfig,
    #[serde(default)]
    pub filter: FilterSettings,
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub feeds: Vec<Feed>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct FilterSettings {
    /// Whether `EntryDate` rules must follow the date predicate grammar to be valid
    #[serde(default)]
    pub strict_date_grammar: bool,
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
}

fn default_cache_max_entries() -> usize {
    DEFAULT_CACHE_MAX_ENTRIES
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            strict_date_grammar: false,
            cache_max_entries: default_cache_max_entries(),
        }
    }
}

impl FilterConfig {
    pub fn feed(&self, feed_id: i64) -> Option<&Feed> {
        self.feeds.iter().find(|feed| feed.id == feed_id)
    }
}

pub fn build_config(config_dir: &str) -> Result<FilterConfig, ConfigError> {
    let config_file_path = format!("{}/{}", config_dir, CONFIG_FILE_NAME);
    let mut s = Config::new();
    s.merge(File::with_name(&config_file_path))?;
    s.try_into()
}
