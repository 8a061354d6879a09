//! Google Pub/Sub REST publisher.
//!
//! `POST {base}/v1/projects/{project}/topics/{topic}:publish`
//! with `{"messages":[{"data":"<base64>"}]}`.

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::gcp::Credentials;
use crate::publish::{EventPublisher, PublishError};

pub const DEFAULT_BASE_URL: &str = "https://pubsub.googleapis.com";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    #[serde(default)]
    message_ids: Vec<String>,
}

#[derive(Debug)]
pub struct PubSubPublisher {
    client: reqwest::Client,
    credentials: Arc<Credentials>,
    endpoint: Url,
}

impl PubSubPublisher {
    pub fn new(
        client: reqwest::Client,
        credentials: Arc<Credentials>,
        base: &str,
        project: &str,
        topic: &str,
    ) -> Result<Self, PublishError> {
        let publish = format!("{topic}:publish");
        let mut endpoint = Url::parse(base)?;
        endpoint
            .path_segments_mut()
            .map_err(|_| PublishError::Url(url::ParseError::RelativeUrlWithoutBase))?
            .pop_if_empty()
            .extend(["v1", "projects", project, "topics", publish.as_str()]);

        Ok(Self {
            client,
            credentials,
            endpoint,
        })
    }

    /// The emulator speaks plain HTTP on `host:port`.
    pub fn resolve_base(emulator_host: Option<&str>) -> String {
        match emulator_host {
            Some(host) => format!("http://{}", host.trim_end_matches('/')),
            None => DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn body(payload: &[u8]) -> Value {
        json!({
            "messages": [{ "data": STANDARD.encode(payload) }],
        })
    }
}

#[async_trait]
impl EventPublisher for PubSubPublisher {
    async fn publish(&self, payload: &[u8]) -> Result<String, PublishError> {
        let request = self
            .client
            .post(self.endpoint.clone())
            .json(&Self::body(payload));
        let response = self.credentials.authorize(request).await?.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: PublishResponse = response.json().await?;
        let message_id = parsed
            .message_ids
            .into_iter()
            .next()
            .ok_or(PublishError::NoMessageId)?;

        tracing::info!(message_id = %message_id, "Message published");
        Ok(message_id)
    }
}
