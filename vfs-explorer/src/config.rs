//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Loads and saves settings as TOML from the platform config directory
//! (found with [`directories`](https://docs.rs/directories)). A missing file
//! is created with defaults on first start.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! config.save_to(&Config::config_path()?).await?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::error::AppError;
use crate::logging::LoggerConfig;

/// Overrides `server.host` / `server.port` with a `host:port` value.
pub const SERVER_ENV_VAR: &str = "VFS_EXPLORER_SERVER";

/// Where listing requests are sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Path of the listing endpoint.
    pub endpoint: String,

    /// A request that has not completed after this long fails as a
    /// transport error.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
            endpoint: "/vfs".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ServerConfig {
    /// Applies a `host:port` override. Returns `false` if `raw` is not of
    /// that form, leaving the config untouched.
    pub fn apply_address(&mut self, raw: &str) -> bool {
        let Some((host, port)) = raw.trim().rsplit_once(':') else {
            return false;
        };
        let Ok(port) = port.parse::<u16>() else {
            return false;
        };
        if host.is_empty() {
            return false;
        }

        self.host = host.to_string();
        self.port = port;
        true
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory opened at startup; `None` lets the server pick its default.
    #[serde(default)]
    pub default_path: Option<String>,

    /// Show the size column in the listing table.
    #[serde(default = "default_show_sizes")]
    pub show_sizes: bool,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggerConfig,
}

const fn default_show_sizes() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_path: None,
            show_sizes: default_show_sizes(),
            server: ServerConfig::default(),
            logging: LoggerConfig::default(),
        }
    }
}

impl Config {
    /// Loads config from the platform config dir, or writes and returns defaults.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/vfs-explorer/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> Result<Self, AppError> {
        let path = Self::config_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        if path.exists() {
            info!("Loading config from {}", path.display());
            let text = TokioFs::read_to_string(path)
                .await
                .map_err(|source| AppError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                })?;
            let cfg: Self = toml::from_str(&text)?;

            Ok(cfg)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save_to(path).await?;

            Ok(default_config)
        }
    }

    /// Writes the config as pretty TOML, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<(), AppError> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str).await?;

        Ok(())
    }

    /// Applies `VFS_EXPLORER_SERVER` if it is set and well formed.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var(SERVER_ENV_VAR) {
            if !self.server.apply_address(&raw) {
                tracing::warn!("Ignoring malformed {SERVER_ENV_VAR}={raw:?}, expected host:port");
            }
        }
    }

    pub fn config_path() -> Result<PathBuf, AppError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn config_dir() -> Result<PathBuf, AppError> {
        let proj_dirs = ProjectDirs::from("org", "vfs", "vfs-explorer")
            .ok_or(AppError::ConfigDirUnavailable)?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }
}
