//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{LogFormat, MonitorConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidEnv {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from an optional TOML file plus the
/// process environment.
pub fn load_config(path: Option<&Path>) -> Result<MonitorConfig, ConfigError> {
    load_from_sources(path, |var| std::env::var(var).ok())
}

/// Same as [`load_config`] with an explicit environment lookup.
pub fn load_from_sources<F>(path: Option<&Path>, lookup: F) -> Result<MonitorConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => MonitorConfig::default(),
    };

    apply_env(&mut config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`. Empty values are ignored.
pub fn apply_env<F>(config: &mut MonitorConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("URL") {
        config.target.url = v;
    }
    if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
        config.target.timeout_secs = v.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::InvalidEnv {
                var: "REQUEST_TIMEOUT_SECS",
                value: v.clone(),
                reason: e.to_string(),
            }
        })?;
    }

    if let Some(v) = get("SLACK_API_TOKEN") {
        config.slack.api_token = v;
    }
    if let Some(v) = get("SLACK_CHANNEL_ID") {
        config.slack.channel_id = v;
    }
    if let Some(v) = get("SLACK_API_URL") {
        config.slack.api_url = v;
    }
    if let Some(v) = get("DOWN_TITLE") {
        config.slack.down_title = v;
    }
    if let Some(v) = get("RECOVERED_TITLE") {
        config.slack.recovered_title = v;
    }

    if let Some(v) = get("BUCKET_NAME") {
        config.storage.bucket_name = Some(v);
    }
    if let Some(v) = get("STATE_DIR") {
        config.storage.state_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = get("STORAGE_EMULATOR_HOST") {
        config.storage.emulator_host = Some(v);
    }

    if let Some(v) = get("PROJECT_ID") {
        config.pubsub.project_id = Some(v);
    }
    if let Some(v) = get("TOPIC_ID") {
        config.pubsub.topic_id = Some(v);
    }
    if let Some(v) = get("PUBSUB_EMULATOR_HOST") {
        config.pubsub.emulator_host = Some(v);
    }

    if let Some(v) = get("GOOGLE_OAUTH_ACCESS_TOKEN") {
        config.gcp.access_token = Some(v);
    }
    if let Some(v) = get("GCE_METADATA_HOST") {
        config.gcp.metadata_host = v;
    }

    if let Some(v) = get("LOG_LEVEL") {
        config.observability.log_level = v;
    }
    if let Some(v) = get("LOG_FORMAT") {
        config.observability.log_format = match v.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => {
                return Err(ConfigError::InvalidEnv {
                    var: "LOG_FORMAT",
                    value: v,
                    reason: "expected `pretty` or `json`".to_string(),
                })
            }
        };
    }

    Ok(())
}
