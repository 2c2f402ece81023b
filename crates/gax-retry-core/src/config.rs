use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::{
    LimitedDurationRetryPolicy, LimitedErrorCountRetryPolicy, RetryPolicy, RetryableStatus,
};

/// Errors from reading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Retry policy prototype description (the `[policy]` section).
///
/// Zero limits are accepted and mean "never retry".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetryConfig {
    /// Stop after `max_failures` transient failures.
    LimitedErrorCount { max_failures: u32 },
    /// Stop once `max_duration_ms` milliseconds have passed since the
    /// operation started.
    LimitedDuration { max_duration_ms: u64 },
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig::LimitedErrorCount { max_failures: 3 }
    }
}

impl RetryConfig {
    /// Build the prototype policy described by this config, classifying
    /// failures with `R`.
    pub fn into_policy<S, R>(&self) -> Box<dyn RetryPolicy<S>>
    where
        S: ?Sized + 'static,
        R: RetryableStatus<S> + 'static,
    {
        match *self {
            RetryConfig::LimitedErrorCount { max_failures } => {
                Box::new(LimitedErrorCountRetryPolicy::<S, R>::new(max_failures))
            }
            RetryConfig::LimitedDuration { max_duration_ms } => Box::new(
                LimitedDurationRetryPolicy::<S, R>::new(Duration::from_millis(max_duration_ms)),
            ),
        }
    }
}

/// Global configuration loaded from `~/.config/gax-retry/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaxRetryConfig {
    /// Policy used when none is given on the command line.
    #[serde(default)]
    pub policy: RetryConfig,
}

/// Parse a TOML document.
pub fn parse(data: &str) -> Result<GaxRetryConfig, ConfigError> {
    Ok(toml::from_str(data)?)
}

/// Read and parse the config file at `path`.
pub fn load_from(path: &Path) -> Result<GaxRetryConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&data)
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gax-retry")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GaxRetryConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<GaxRetryConfig> {
    if !path.exists() {
        let default_cfg = GaxRetryConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    Ok(load_from(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::CanonicalRetryable;
    use crate::status::{Status, StatusCode};

    #[test]
    fn default_config_values() {
        let cfg = GaxRetryConfig::default();
        assert_eq!(
            cfg.policy,
            RetryConfig::LimitedErrorCount { max_failures: 3 }
        );
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = GaxRetryConfig {
            policy: RetryConfig::LimitedDuration {
                max_duration_ms: 2500,
            },
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed = parse(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_error_count() {
        let toml = r#"
            [policy]
            kind = "limited_error_count"
            max_failures = 7
        "#;
        let cfg = parse(toml).unwrap();
        assert_eq!(cfg.policy, RetryConfig::LimitedErrorCount { max_failures: 7 });
    }

    #[test]
    fn config_toml_duration() {
        let toml = r#"
            [policy]
            kind = "limited_duration"
            max_duration_ms = 30000
        "#;
        let cfg = parse(toml).unwrap();
        assert_eq!(
            cfg.policy,
            RetryConfig::LimitedDuration {
                max_duration_ms: 30_000
            }
        );
    }

    #[test]
    fn config_missing_policy_uses_default() {
        let cfg = parse("").unwrap();
        assert_eq!(cfg.policy, RetryConfig::default());
    }

    #[test]
    fn config_rejects_negative_and_unknown() {
        let negative = r#"
            [policy]
            kind = "limited_error_count"
            max_failures = -1
        "#;
        assert!(matches!(parse(negative), Err(ConfigError::Parse(_))));

        let unknown = r#"
            [policy]
            kind = "exponential"
        "#;
        assert!(matches!(parse(unknown), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn into_policy_builds_configured_limits() {
        let cfg = RetryConfig::LimitedErrorCount { max_failures: 1 };
        let mut p = cfg.into_policy::<Status, CanonicalRetryable>();
        let unavailable = Status::from(StatusCode::Unavailable);
        assert!(p.on_failure(&unavailable));
        assert!(!p.on_failure(&unavailable));
        assert_eq!(p.remaining_time(), None);

        let cfg = RetryConfig::LimitedDuration {
            max_duration_ms: 60_000,
        };
        let mut p = cfg.into_policy::<Status, CanonicalRetryable>();
        assert!(p.on_failure(&unavailable));
        assert!(p.remaining_time().is_some());
    }

    #[test]
    fn load_or_init_writes_default_then_reads_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, GaxRetryConfig::default());

        fs::write(
            &path,
            "[policy]\nkind = \"limited_duration\"\nmax_duration_ms = 10\n",
        )
        .unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(
            loaded.policy,
            RetryConfig::LimitedDuration { max_duration_ms: 10 }
        );
    }

    #[test]
    fn load_from_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
