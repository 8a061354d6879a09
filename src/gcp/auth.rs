//! OAuth access tokens for Google APIs.

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::OnceCell;

use crate::config::GcpConfig;

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Errors raised while obtaining a token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("metadata server request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("metadata server returned status {0}")]
    Status(u16),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Where bearer tokens come from.
pub enum Credentials {
    /// No Authorization header (emulators).
    Anonymous,
    /// A token supplied up front.
    Static(String),
    /// Fetched lazily from the GCE/Cloud Run metadata server.
    Metadata {
        client: reqwest::Client,
        token_url: String,
        cached: OnceCell<String>,
    },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Anonymous => f.write_str("Anonymous"),
            Credentials::Static(_) => f.write_str("Static(<redacted>)"),
            Credentials::Metadata { token_url, .. } => {
                f.debug_struct("Metadata").field("token_url", token_url).finish()
            }
        }
    }
}

impl Credentials {
    pub fn from_config(config: &GcpConfig, client: reqwest::Client) -> Self {
        match &config.access_token {
            Some(token) => Credentials::Static(token.clone()),
            None => Credentials::Metadata {
                client,
                token_url: format!("http://{}{}", config.metadata_host, TOKEN_PATH),
                cached: OnceCell::new(),
            },
        }
    }

    /// The token to send, if any.
    pub async fn bearer(&self) -> Result<Option<String>, AuthError> {
        match self {
            Credentials::Anonymous => Ok(None),
            Credentials::Static(token) => Ok(Some(token.clone())),
            Credentials::Metadata {
                client,
                token_url,
                cached,
            } => {
                let token = cached
                    .get_or_try_init(|| fetch_metadata_token(client, token_url))
                    .await?;
                Ok(Some(token.clone()))
            }
        }
    }

    /// Attach the Authorization header to `request` when a token is available.
    pub async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, AuthError> {
        Ok(match self.bearer().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }
}

async fn fetch_metadata_token(client: &reqwest::Client, url: &str) -> Result<String, AuthError> {
    let response = client
        .get(url)
        .header("Metadata-Flavor", "Google")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::Status(status.as_u16()));
    }

    let token: TokenResponse = response.json().await?;
    tracing::debug!("Fetched access token from metadata server");
    Ok(token.access_token)
}
