//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a monitor run.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for a single monitoring run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// The URL being health-checked.
    pub target: TargetConfig,

    /// Chat notification settings.
    pub slack: SlackConfig,

    /// Where the last-known status is persisted.
    pub storage: StorageConfig,

    /// Outage event publishing.
    pub pubsub: PubSubConfig,

    /// Google API credentials.
    pub gcp: GcpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Target URL (`URL`). Required.
    pub url: String,

    /// Timeout for the probe and for every API call, in seconds.
    pub timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Slack notifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlackConfig {
    /// Bot token (`SLACK_API_TOKEN`). Required.
    pub api_token: String,

    /// Channel to post to (`SLACK_CHANNEL_ID`). Required.
    pub channel_id: String,

    /// Web API base URL.
    pub api_url: String,

    /// Attachment title for down transitions.
    pub down_title: String,

    /// Attachment title for recoveries.
    pub recovered_title: String,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            channel_id: String::new(),
            api_url: "https://slack.com/api".to_string(),
            down_title: "Server is down".to_string(),
            recovered_title: "Server has recovered".to_string(),
        }
    }
}

/// State persistence configuration.
///
/// At most one backend may be selected. With neither set, the monitor runs
/// stateless and treats the target as previously healthy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// GCS bucket holding the status objects (`BUCKET_NAME`).
    pub bucket_name: Option<String>,

    /// Local directory holding the status files (`STATE_DIR`).
    pub state_dir: Option<PathBuf>,

    /// GCS emulator base URL (`STORAGE_EMULATOR_HOST`).
    pub emulator_host: Option<String>,
}

/// Pub/Sub configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PubSubConfig {
    /// Google Cloud project (`PROJECT_ID`).
    pub project_id: Option<String>,

    /// Topic receiving outage events (`TOPIC_ID`).
    pub topic_id: Option<String>,

    /// Emulator `host:port` (`PUBSUB_EMULATOR_HOST`).
    pub emulator_host: Option<String>,
}

impl PubSubConfig {
    /// Publishing is enabled once a topic is named.
    pub fn enabled(&self) -> bool {
        self.topic_id.is_some()
    }
}

/// Google credentials configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GcpConfig {
    /// Static OAuth access token (`GOOGLE_OAUTH_ACCESS_TOKEN`).
    pub access_token: Option<String>,

    /// Metadata server host (`GCE_METADATA_HOST`).
    pub metadata_host: String,
}

impl Default for GcpConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            metadata_host: "metadata.google.internal".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.target.timeout_secs, 30);
        assert_eq!(config.slack.api_url, "https://slack.com/api");
        assert!(config.storage.bucket_name.is_none());
        assert!(!config.pubsub.enabled());
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_toml() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [target]
            url = "https://example.com/health"

            [pubsub]
            project_id = "acme"
            topic_id = "outages"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.target.url, "https://example.com/health");
        assert_eq!(config.target.timeout_secs, 30);
        assert!(config.pubsub.enabled());
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.slack.down_title, "Server is down");
    }
}
