//! Chat notifications for status transitions.
//!
//! # Data Flow
//! ```text
//! Effect::Notify(severity)
//!     → Alert (title, color, target, status line)
//!     → Notifier::send
//!     → chat API
//! ```

pub mod slack;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SlackConfig;
use crate::health::{Severity, StatusLine};

pub use slack::SlackNotifier;

/// Errors raised while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("chat API returned HTTP {0}")]
    Status(u16),

    #[error("chat API rejected the message: {0}")]
    Api(String),

    #[error("invalid chat API URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Attachment titles per severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    pub down: String,
    pub recovered: String,
}

impl From<&SlackConfig> for Titles {
    fn from(config: &SlackConfig) -> Self {
        Self {
            down: config.down_title.clone(),
            recovered: config.recovered_title.clone(),
        }
    }
}

impl Default for Titles {
    fn default() -> Self {
        Self::from(&SlackConfig::default())
    }
}

/// A rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub title: String,
    pub color: &'static str,
    pub target: String,
    pub status: StatusLine,
}

impl Alert {
    /// Build the alert for a transition landing on `status`.
    pub fn new(severity: Severity, target: &str, status: &StatusLine, titles: &Titles) -> Self {
        let (title, color) = match severity {
            Severity::Down => (titles.down.clone(), "danger"),
            Severity::Recovered => (titles.recovered.clone(), "good"),
        };
        Self {
            severity,
            title,
            color,
            target: target.to_string(),
            status: status.clone(),
        }
    }
}

/// Sends alerts to a chat channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError>;
}
