//! Config command: print the effective configuration.

use anyhow::Result;
use gax_retry_core::config::GaxRetryConfig;
use std::path::Path;

pub fn run_show_config(cfg: &GaxRetryConfig, path: &Path) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
