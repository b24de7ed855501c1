//! User settings.
//!
//! Read from `~/.portsweep/config.json`. The file is optional and never
//! written by portsweep; every key falls back to its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::adapters::scanner::DEFAULT_LSOF;
use crate::error::{Error, Result};

/// Name of the per-user directory under `$HOME`.
pub const APP_DIR_NAME: &str = ".portsweep";

/// Shortest allowed refresh interval in seconds.
const MIN_REFRESH_INTERVAL: u64 = 1;

/// Settings stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Seconds between automatic refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Start with system ports (< 1024) visible.
    #[serde(default)]
    pub show_system_ports: bool,

    /// Seconds a status message stays on screen.
    #[serde(default = "default_status_timeout")]
    pub status_timeout: u64,

    /// Listing program to run.
    #[serde(default = "default_lsof_path")]
    pub lsof_path: String,
}

fn default_refresh_interval() -> u64 {
    2
}

fn default_status_timeout() -> u64 {
    3
}

fn default_lsof_path() -> String {
    DEFAULT_LSOF.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            show_system_ports: false,
            status_timeout: default_status_timeout(),
            lsof_path: default_lsof_path(),
        }
    }
}

impl Settings {
    /// Refresh period, never shorter than one second.
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_interval.max(MIN_REFRESH_INTERVAL))
    }

    /// Status message time-to-live.
    pub fn status_ttl(&self) -> Duration {
        Duration::from_secs(self.status_timeout)
    }
}

/// Per-user directory, `~/.portsweep`.
pub fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(APP_DIR_NAME))
}

/// Loads settings from disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a store with the default path.
    ///
    /// Default path: `~/.portsweep/config.json`
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: app_dir()?.join("config.json"),
        })
    }

    /// Create a store with a custom path (for testing).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load settings from disk.
    ///
    /// Returns defaults if the file doesn't exist.
    pub async fn load(&self) -> Result<Settings> {
        if !fs::try_exists(&self.config_path).await.unwrap_or(false) {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }
}
