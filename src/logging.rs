//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so it logs to a file; command-line and web
//! entry points log to stderr. `RUST_LOG` overrides the default level.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// Appended to a file
    File(PathBuf),
}

/// Installs the global subscriber.
///
/// Calling this more than once is harmless: later calls keep the first
/// subscriber.
pub fn init_logging(target: &LogTarget, verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .is_ok(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .is_ok()
        }
    };

    if installed {
        tracing::debug!(?target, "Logging initialized");
    }
    Ok(())
}

/// Log file used by the terminal UI, next to the config file.
pub fn default_log_file() -> Result<PathBuf> {
    Ok(crate::config::Config::config_dir()?.join("quilt-planner.log"))
}
