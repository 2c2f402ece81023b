//! Logging init: append to a file under the XDG state dir, or stderr when
//! that is not possible.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "info,gax_retry_core=debug,gax_retry=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Location of the log file, `~/.local/state/gax-retry/gax-retry.log` by default.
/// Creates the parent directory.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gax-retry")?;
    Ok(xdg_dirs.place_state_file("gax-retry.log")?)
}

/// Initialize structured logging to [`log_path`].
///
/// Returns Err if the file cannot be opened or a global subscriber is already
/// set; the caller can then fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;

    tracing::info!("gax-retry logging initialized at {}", path.display());
    Ok(())
}

/// Initialize logging to stderr only. Does nothing if a subscriber is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
