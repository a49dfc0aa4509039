use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, EnvFilter, Registry};

/// Defines the Logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggerConfig {
    /// Sets the logger [`EnvFilter`].
    /// Valid values: trace, debug, info, warn, error
    /// Example of a valid filter: "warn,feedsift_engine_matcher=debug"
    pub level: String,

    /// Determines whether the Logger should print to standard output.
    pub stdout_output: bool,

    /// A file path in the file system; if provided, the Logger will append any output to it.
    #[serde(default)]
    pub file_output_path: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig { level: "info".to_owned(), stdout_output: true, file_output_path: None }
    }
}

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("LoggerConfigurationError: [{message}]")]
    LoggerConfigurationError { message: String },
}

impl From<log::SetLoggerError> for LoggerError {
    fn from(error: log::SetLoggerError) -> Self {
        LoggerError::LoggerConfigurationError { message: format!("{}", error) }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(error: std::io::Error) -> Self {
        LoggerError::LoggerConfigurationError { message: format!("{}", error) }
    }
}

/// Keeps the non-blocking writers alive and allows changing the log level at runtime.
/// Dropping it flushes and stops the background writers.
pub struct LogWorkerGuard {
    _file_guard: Option<WorkerGuard>,
    _stdout_guard: Option<WorkerGuard>,
    reload_handle: tracing_subscriber::reload::Handle<EnvFilter, Registry>,
}

impl LogWorkerGuard {
    pub fn reload(&self, env_filter_str: &str) -> Result<(), LoggerError> {
        let env_filter = build_env_filter(env_filter_str)?;
        self.reload_handle.reload(env_filter).map_err(|err| LoggerError::LoggerConfigurationError {
            message: format!("Cannot reload the logger configuration. err: {:?}", err),
        })
    }
}

/// Configures the underlying logger implementation and activates it.
/// Records emitted through the `log` facade are forwarded to the same subscriber.
pub fn setup_logger(logger_config: &LoggerConfig) -> Result<LogWorkerGuard, LoggerError> {
    let env_filter = build_env_filter(&logger_config.level)?;

    let (reloadable_env_filter, reload_handle) =
        tracing_subscriber::reload::Layer::new(env_filter);

    let (file_layer, file_guard) = match &logger_config.file_output_path {
        Some(file_output) => {
            let (dir, filename) = path_to_dir_and_filename(file_output)?;
            let file_appender = tracing_appender::rolling::never(dir, filename);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(Layer::new().with_ansi(false).with_writer(non_blocking)), Some(guard))
        }
        None => (None, None),
    };

    let (stdout_layer, stdout_guard) = if logger_config.stdout_output {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
        (Some(Layer::new().with_ansi(false).with_writer(non_blocking)), Some(guard))
    } else {
        (None, None)
    };

    let subscriber =
        tracing_subscriber::registry()
            .with(reloadable_env_filter)
            .with(file_layer)
            .with(stdout_layer);

    set_global_logger(subscriber)?;

    Ok(LogWorkerGuard { _file_guard: file_guard, _stdout_guard: stdout_guard, reload_handle })
}

fn build_env_filter(env_filter_str: &str) -> Result<EnvFilter, LoggerError> {
    EnvFilter::from_str(env_filter_str).map_err(|err| LoggerError::LoggerConfigurationError {
        message: format!("Cannot parse the logger level: [{}]. err: {:?}", env_filter_str, err),
    })
}

fn path_to_dir_and_filename(full_path: &str) -> Result<(String, String), LoggerError> {
    let full_path = full_path.replace('\\', "/");
    let path = Path::new(&full_path);
    match (path.parent(), path.file_name()) {
        (Some(dir), Some(filename)) if !dir.as_os_str().is_empty() => {
            Ok((dir.to_string_lossy().into_owned(), filename.to_string_lossy().into_owned()))
        }
        _ => Err(LoggerError::LoggerConfigurationError {
            message: format!(
                "Output file path [{}] must contain a directory and a file name",
                full_path
            ),
        }),
    }
}

fn set_global_logger<S>(subscriber: S) -> Result<(), LoggerError>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing_log::LogTracer::init().map_err(|err| LoggerError::LoggerConfigurationError {
        message: format!("Cannot start the logger LogTracer. err: {:?}", err),
    })?;
    set_global_default(subscriber).map_err(|err| LoggerError::LoggerConfigurationError {
        message: format!("Cannot start the logger. err: {:?}", err),
    })
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn should_split_the_file_path() {
        assert_eq!(
            ("/tmp/hello".to_owned(), "filename".to_owned()),
            path_to_dir_and_filename("/tmp/hello/filename").unwrap()
        );
        assert_eq!(
            ("/".to_owned(), "feedsift.log".to_owned()),
            path_to_dir_and_filename("/feedsift.log").unwrap()
        );
        assert_eq!(
            ("/var/log/feedsift".to_owned(), "filter.log".to_owned()),
            path_to_dir_and_filename("/var/log/feedsift/filter.log").unwrap()
        );
        assert_eq!(
            ("/tmp/hello".to_owned(), "filename".to_owned()),
            path_to_dir_and_filename(r#"/tmp\hello/filename"#).unwrap()
        );
        assert_eq!(
            ("c:/windows/some".to_owned(), "filename.txt".to_owned()),
            path_to_dir_and_filename(r#"c:\windows\some\filename.txt"#).unwrap()
        );
    }

    #[test]
    fn split_the_file_path_should_fail_if_directory_is_not_present() {
        assert!(path_to_dir_and_filename("filename").is_err());
    }

    #[test]
    fn should_parse_a_valid_level_filter() {
        assert!(build_env_filter("info").is_ok());
        assert!(build_env_filter("warn,feedsift_engine_matcher=debug").is_ok());
    }

    #[test]
    fn should_fail_to_parse_an_invalid_level_filter() {
        assert!(build_env_filter("feedsift=notalevel").is_err());
    }

    #[test]
    fn should_deserialize_the_config_without_file_output() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"level": "debug", "stdout_output": false}"#).unwrap();

        assert_eq!(
            LoggerConfig {
                level: "debug".to_owned(),
                stdout_output: false,
                file_output_path: None
            },
            config
        );
    }
}
