//! Tracing setup.
//!
//! The interactive screen owns stdout, so events go to a log file under the
//! platform data directory instead.

use std::{fs, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};
use weather_core::Config;

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) -> Result<()> {
    let path = Config::log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Ignore a second init, e.g. from tests.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(())
}
