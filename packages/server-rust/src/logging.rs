//! Log sinks for the arithmetic server.
//!
//! Three sinks share one level filter:
//! - console: human-readable lines on stdout
//! - `combined.log`: every record as a JSON line
//! - `error.log`: error-level events only, as JSON lines
//!
//! Files are opened in append mode and never rotated. Records in both files
//! carry `service = "calculator-microservice"` through the enclosing span.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Service identifier attached to every request span.
pub const SERVICE_NAME: &str = "calculator-microservice";

pub const COMBINED_LOG: &str = "combined.log";
pub const ERROR_LOG: &str = "error.log";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive (`info`, `debug`, `arith_server=trace`, ...).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Directory for `combined.log` and `error.log`. `None` disables file sinks.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: Some(PathBuf::from("logs")),
        }
    }
}

/// Keeps the background file writers alive. Dropping it flushes them.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LogGuard {
    _workers: Vec<WorkerGuard>,
}

/// Builds the subscriber without installing it.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a log file cannot
/// be created.
pub fn build_subscriber(
    config: &LoggingConfig,
) -> anyhow::Result<(impl Subscriber + Send + Sync + 'static, LogGuard)> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level directive: {}", config.level))?,
    };

    let mut workers = Vec::new();
    let (combined, errors) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;

            let (combined_writer, combined_guard) =
                tracing_appender::non_blocking(open_log_file(dir, COMBINED_LOG)?);
            let (error_writer, error_guard) =
                tracing_appender::non_blocking(open_log_file(dir, ERROR_LOG)?);
            workers.push(combined_guard);
            workers.push(error_guard);

            let combined = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(combined_writer);
            // Spans pass so error records keep their `service` context.
            let errors = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(error_writer)
                .with_filter(filter_fn(|meta| {
                    meta.is_span() || *meta.level() == Level::ERROR
                }));
            (Some(combined), Some(errors))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(combined)
        .with(errors);

    Ok((subscriber, LogGuard { _workers: workers }))
}

/// Builds the subscriber and installs it as the process-wide default.
///
/// # Errors
///
/// Fails like [`build_subscriber`], or if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LogGuard> {
    let (subscriber, guard) = build_subscriber(config)?;
    subscriber
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guard)
}

fn open_log_file(dir: &Path, file_name: &str) -> anyhow::Result<RollingFileAppender> {
    let (prefix, suffix) = file_name.split_once('.').unwrap_or((file_name, ""));
    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(prefix);
    if !suffix.is_empty() {
        builder = builder.filename_suffix(suffix);
    }
    builder
        .build(dir)
        .with_context(|| format!("failed to open {}", dir.join(file_name).display()))
}

#[cfg(test)]
mod tests {
    use tracing::{error, info, info_span};

    use super::*;

    fn read(dir: &Path, name: &str) -> String {
        std::fs::read_to_string(dir.join(name)).unwrap_or_default()
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.directory, Some(PathBuf::from("logs")));
    }

    #[test]
    fn file_sinks_split_by_severity() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: "info".to_string(),
            directory: Some(dir.path().join("logs")),
        };

        let (subscriber, guard) = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("request", service = SERVICE_NAME);
            let _entered = span.enter();
            info!("Addition: 2 + 3 = 5");
            error!("Math error: Cannot divide by zero");
        });
        drop(guard);

        let logs = dir.path().join("logs");
        let combined = read(&logs, COMBINED_LOG);
        let errors = read(&logs, ERROR_LOG);

        assert!(combined.contains("Addition: 2 + 3 = 5"));
        assert!(combined.contains("Math error: Cannot divide by zero"));
        assert!(combined.contains(SERVICE_NAME));
        assert!(!errors.contains("Addition"));
        assert!(errors.contains("Math error: Cannot divide by zero"));
        assert_eq!(errors.lines().count(), 1);
        assert!(errors.contains(SERVICE_NAME));

        for line in combined.lines() {
            let record: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(record["level"].is_string());
        }
    }

    #[test]
    fn files_are_appended_not_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            level: "info".to_string(),
            directory: Some(dir.path().to_path_buf()),
        };

        for message in ["first run", "second run"] {
            let (subscriber, guard) = build_subscriber(&config).unwrap();
            tracing::subscriber::with_default(subscriber, || error!("{message}"));
            drop(guard);
        }

        let errors = read(dir.path(), ERROR_LOG);
        assert!(errors.contains("first run"));
        assert!(errors.contains("second run"));
    }

    #[test]
    fn no_directory_means_console_only() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            directory: None,
        };
        let (subscriber, guard) = build_subscriber(&config).unwrap();
        tracing::subscriber::with_default(subscriber, || info!("console only"));
        drop(guard);
    }

    #[test]
    fn invalid_level_directive_is_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "arith_server=verbose".to_string(),
            directory: None,
        };
        assert!(build_subscriber(&config).is_err());
    }
}
