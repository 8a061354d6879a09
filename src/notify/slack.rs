//! Slack `chat.postMessage` notifier.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::notify::{Alert, NotifyError, Notifier};

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

/// Posts one attachment per alert.
pub struct SlackNotifier {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
    channel: String,
}

impl std::fmt::Debug for SlackNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackNotifier")
            .field("endpoint", &self.endpoint.as_str())
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl SlackNotifier {
    pub fn new(
        client: reqwest::Client,
        api_url: &str,
        token: impl Into<String>,
        channel: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let base = format!("{}/", api_url.trim_end_matches('/'));
        let endpoint = Url::parse(&base)?.join("chat.postMessage")?;
        Ok(Self {
            client,
            endpoint,
            token: token.into(),
            channel: channel.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request body for `alert`.
    pub fn payload(&self, alert: &Alert) -> Value {
        json!({
            "channel": self.channel,
            "attachments": [{
                "title": alert.title,
                "color": alert.color,
                "text": alert.target,
                "fields": [{
                    "title": "Status",
                    "value": alert.status.as_str(),
                    "short": true,
                }],
            }],
        })
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&self.payload(alert))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        let body: PostMessageResponse = response.json().await?;
        if !body.ok {
            return Err(NotifyError::Api(
                body.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        tracing::info!(
            channel = body.channel.as_deref().unwrap_or(&self.channel),
            ts = body.ts.as_deref().unwrap_or_default(),
            severity = alert.severity.as_str(),
            "Notification sent"
        );
        Ok(())
    }
}
