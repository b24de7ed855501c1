//! Logging setup.
//!
//! The TUI owns the terminal, so logs never go to stdout/stderr. Setting
//! `PORTSWEEP_LOG` (an `EnvFilter` directive such as `debug` or
//! `portsweep_core=trace`) writes them to `~/.portsweep/portsweep.log`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use portsweep_core::config::app_dir;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "PORTSWEEP_LOG";

const LOG_FILE: &str = "portsweep.log";

/// Install the global subscriber. Without `PORTSWEEP_LOG` logs are discarded.
pub fn init() {
    let enabled = std::env::var(LOG_ENV).is_ok_and(|v| !v.trim().is_empty());
    if !enabled {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .try_init();
        return;
    }

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    match open_log_file() {
        Ok((path, file)) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            tracing::info!(path = %path.display(), "Logging initialized");
        }
        Err(e) => {
            eprintln!("portsweep: logging disabled: {:#}", e);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}

fn open_log_file() -> Result<(PathBuf, fs::File)> {
    let dir = app_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    Ok((path, file))
}
