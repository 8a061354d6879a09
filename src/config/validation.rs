//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required fields are present
//! - The target is an absolute http(s) URL
//! - Optional integrations are configured consistently
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::MonitorConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("URL is not set")]
    MissingUrl,

    #[error("URL {url:?} is invalid: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL scheme {0:?} is not supported (expected http or https)")]
    UnsupportedScheme(String),

    #[error("SLACK_API_TOKEN is not set")]
    MissingSlackToken,

    #[error("SLACK_CHANNEL_ID is not set")]
    MissingSlackChannel,

    #[error("TOPIC_ID is set but PROJECT_ID is not")]
    TopicWithoutProject,

    #[error("BUCKET_NAME and STATE_DIR are mutually exclusive")]
    ConflictingStateBackends,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.target.url.is_empty() {
        errors.push(ValidationError::MissingUrl);
    } else {
        match Url::parse(&config.target.url) {
            Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
                errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
            }
            Ok(url) if url.host_str().is_none() => {
                errors.push(ValidationError::InvalidUrl {
                    url: config.target.url.clone(),
                    reason: "missing host".to_string(),
                });
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::InvalidUrl {
                url: config.target.url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.target.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.slack.api_token.is_empty() {
        errors.push(ValidationError::MissingSlackToken);
    }
    if config.slack.channel_id.is_empty() {
        errors.push(ValidationError::MissingSlackChannel);
    }

    if config.pubsub.topic_id.is_some() && config.pubsub.project_id.is_none() {
        errors.push(ValidationError::TopicWithoutProject);
    }

    if config.storage.bucket_name.is_some() && config.storage.state_dir.is_some() {
        errors.push(ValidationError::ConflictingStateBackends);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid() -> MonitorConfig {
        let mut config = MonitorConfig::default();
        config.target.url = "https://example.com/health".into();
        config.slack.api_token = "xoxb-test".into();
        config.slack.channel_id = "C0123".into();
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = valid();
        config.target.url = "ftp://example.com/file".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::UnsupportedScheme("ftp".into())]);
    }

    #[test]
    fn test_rejects_relative_url() {
        let mut config = valid();
        config.target.url = "/health".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn test_topic_requires_project() {
        let mut config = valid();
        config.pubsub.topic_id = Some("outages".into());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::TopicWithoutProject]
        );

        config.pubsub.project_id = Some("acme".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_single_state_backend() {
        let mut config = valid();
        config.storage.bucket_name = Some("bucket".into());
        config.storage.state_dir = Some(PathBuf::from("/var/lib/uptime"));
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::ConflictingStateBackends]
        );
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = valid();
        config.target.timeout_secs = 0;
        assert_eq!(validate_config(&config).unwrap_err(), vec![ValidationError::ZeroTimeout]);
    }
}
