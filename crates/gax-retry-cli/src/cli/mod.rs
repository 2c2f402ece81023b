//! CLI for replaying failure sequences through retry policies.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gax_retry_core::config::{self, GaxRetryConfig, RetryConfig};
use gax_retry_core::StatusCode;
use std::path::PathBuf;

use commands::{run_replay, run_show_config};

/// Top-level CLI for gax-retry.
#[derive(Debug, Parser)]
#[command(name = "gax-retry")]
#[command(about = "Replay RPC failure sequences through retry policies", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG config dir.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Command-line override of the configured policy.
#[derive(Debug, Clone, Default, Args)]
pub struct PolicyArgs {
    /// Use an error-count policy tolerating N transient failures.
    #[arg(long, value_name = "N", conflicts_with = "max_duration_ms")]
    pub max_failures: Option<u32>,

    /// Use a deadline policy allowing retries for MS milliseconds.
    #[arg(long, value_name = "MS")]
    pub max_duration_ms: Option<u64>,
}

impl PolicyArgs {
    /// The policy to use: the command-line override if any, else the config's.
    pub fn resolve(&self, cfg: &GaxRetryConfig) -> RetryConfig {
        match (self.max_failures, self.max_duration_ms) {
            (Some(max_failures), _) => RetryConfig::LimitedErrorCount { max_failures },
            (None, Some(max_duration_ms)) => RetryConfig::LimitedDuration { max_duration_ms },
            (None, None) => cfg.policy.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Feed a sequence of failure statuses to fresh clones of the policy and
    /// print each retry decision.
    Replay {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Number of logical operations to replay, each with its own clone.
        #[arg(long, default_value = "1", value_name = "K")]
        repeat: usize,

        /// Status codes in the order the attempts fail (e.g. UNAVAILABLE, 14).
        #[arg(required = true, value_name = "STATUS")]
        statuses: Vec<StatusCode>,
    },

    /// Print the effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let (cfg, path) = match &cli.config {
            Some(path) => (config::load_from(path)?, path.clone()),
            None => (config::load_or_init()?, config::config_path()?),
        };
        tracing::debug!("loaded config from {}: {:?}", path.display(), cfg);

        match cli.command {
            CliCommand::Replay {
                policy,
                repeat,
                statuses,
            } => run_replay(&policy.resolve(&cfg), repeat, &statuses)?,
            CliCommand::Config => run_show_config(&cfg, &path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
