use feedsift_common_logger::LoggerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterCliError {
    #[error("ConfigurationError: [{0}]")]
    ConfigurationError(#[from] config_rs::ConfigError),

    #[error("LoggerError: [{0}]")]
    LoggerError(#[from] LoggerError),

    #[error("IoError: [{0}]")]
    IoError(#[from] std::io::Error),

    #[error("JsonError: [{0}]")]
    JsonError(#[from] serde_json::Error),

    #[error("InvalidRulesError: [{count}] rule set(s) are not valid")]
    InvalidRulesError { count: usize },
}
