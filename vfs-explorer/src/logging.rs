//! src/logging.rs
//! ============================================================================
//! # Structured JSON logging to a rolling file
//!
//! The terminal belongs to the UI, so every event goes to
//! `<log_dir>/<prefix>.<date>.jsonl` through a non-blocking appender. The
//! returned [`WorkerGuard`] must be held until shutdown so buffered lines are
//! flushed.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use compact_str::CompactString;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter, filter::Directive, fmt::time::ChronoLocal, layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_file_prefix: CompactString,
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub log_level: CompactString,
    pub max_log_files: usize,
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Daily,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let log_dir = ProjectDirs::from("org", "vfs", "vfs-explorer")
            .map_or_else(|| PathBuf::from("./logs"), |dirs| dirs.data_local_dir().join("logs"));

        Self {
            log_dir,
            log_file_prefix: CompactString::const_new("vfs-explorer"),
            log_level: CompactString::const_new("info"),
            max_log_files: 10,
            rotation: LogRotation::Daily,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn validate_config(config: &LoggerConfig) -> Result<Directive, LoggingError> {
    if config.log_dir.as_os_str().is_empty() {
        return Err(LoggingError::InvalidLogDirectory("empty path".into()));
    }
    if config.log_file_prefix.is_empty() {
        return Err(LoggingError::ConfigError("log_file_prefix is empty".into()));
    }
    if config.max_log_files == 0 {
        return Err(LoggingError::ConfigError("max_log_files must be at least 1".into()));
    }

    Directive::from_str(config.log_level.as_str())
        .map_err(|e| LoggingError::ConfigError(format!("invalid log_level: {e}")))
}

async fn setup_log_directory(dir: &Path) -> Result<(), LoggingError> {
    if dir.exists() && !dir.is_dir() {
        return Err(LoggingError::InvalidLogDirectory(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    tokio::fs::create_dir_all(dir).await?;
    Ok(())
}

/// Installs the global subscriber.
pub async fn init_logging_with_config(config: &LoggerConfig) -> Result<WorkerGuard, LoggingError> {
    let default_directive = validate_config(config)?;
    setup_log_directory(&config.log_dir).await?;

    let rotation = match config.rotation {
        LogRotation::Never => Rotation::NEVER,
        LogRotation::Daily => Rotation::DAILY,
    };

    let file_appender = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(config.log_file_prefix.as_str())
        .filename_suffix("jsonl")
        .max_log_files(config.max_log_files)
        .build(&config.log_dir)
        .map_err(|e| LoggingError::ConfigError(format!("failed to create file appender: {e}")))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_timer(ChronoLocal::rfc_3339())
        .with_current_span(true)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&LoggerConfig::default()).is_ok());
    }

    #[test]
    fn rejects_bad_level_and_limits() {
        let config = LoggerConfig {
            log_level: CompactString::const_new("vfs_explorer=loud"),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(LoggingError::ConfigError(_))
        ));

        let config = LoggerConfig {
            max_log_files: 0,
            ..LoggerConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[tokio::test]
    async fn log_dir_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        tokio::fs::write(&file, b"x").await.unwrap();

        assert!(matches!(
            setup_log_directory(&file).await,
            Err(LoggingError::InvalidLogDirectory(_))
        ));
        assert!(setup_log_directory(&dir.path().join("logs")).await.is_ok());
    }

    #[test]
    fn rotation_uses_lowercase_names() {
        let config: LoggerConfig = toml::from_str(r#"rotation = "never""#).unwrap();
        assert_eq!(config.rotation, LogRotation::Never);
    }
}
