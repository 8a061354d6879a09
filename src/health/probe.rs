//! Active health probe.
//!
//! # Responsibilities
//! - Issue exactly one GET to the target
//! - Render the response status as a [`StatusLine`]
//!
//! # Design Decisions
//! - Transport errors and timeouts are fatal, not "down"
//! - The body is never read
//! - Redirects follow the client's default policy

use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::health::status::StatusLine;

/// Errors raised while probing the target.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Something that can report the target's current status line.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn observe(&self) -> Result<StatusLine, ProbeError>;
}

/// GETs the target over HTTP(S).
pub struct HttpProbe {
    client: reqwest::Client,
    url: Url,
}

impl HttpProbe {
    /// `client` should already carry the run's timeout and user agent.
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl StatusProbe for HttpProbe {
    async fn observe(&self) -> Result<StatusLine, ProbeError> {
        let started = Instant::now();

        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout {
                        url: self.url.to_string(),
                    }
                } else {
                    ProbeError::Request {
                        url: self.url.to_string(),
                        source: e,
                    }
                }
            })?;

        let status = StatusLine::from_status(response.status());
        tracing::info!(
            url = %self.url,
            status = %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Probe completed"
        );

        Ok(status)
    }
}
