//! Outage event publishing.
//!
//! A down transition emits one message whose payload is the target URL.
//! Downstream consumers subscribe to the topic.

pub mod pubsub;

use async_trait::async_trait;
use thiserror::Error;

use crate::gcp::AuthError;

pub use pubsub::PubSubPublisher;

/// Errors raised while publishing an event.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publish request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("publish returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("publish response carried no message id")]
    NoMessageId,

    #[error("publisher authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("invalid publish URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Emits messages to a topic.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish `payload`, returning the server-assigned message id.
    async fn publish(&self, payload: &[u8]) -> Result<String, PublishError>;
}
