//! Cloud Storage state store (JSON API).
//!
//! # Requests
//! - read:  `GET  {base}/storage/v1/b/{bucket}/o/{object}?alt=media`
//! - write: `POST {base}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={object}`
//!
//! A 404 on read means the object has never been written.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::gcp::Credentials;
use crate::state::{StateError, StateKey, StateStore};

pub const DEFAULT_BASE_URL: &str = "https://storage.googleapis.com";

/// Status blobs as objects in one bucket.
#[derive(Debug)]
pub struct GcsStore {
    client: reqwest::Client,
    credentials: Arc<Credentials>,
    base: Url,
    bucket: String,
}

impl GcsStore {
    pub fn new(
        client: reqwest::Client,
        credentials: Arc<Credentials>,
        base: &str,
        bucket: impl Into<String>,
    ) -> Result<Self, StateError> {
        Ok(Self {
            client,
            credentials,
            base: Url::parse(base)?,
            bucket: bucket.into(),
        })
    }

    /// The emulator convention allows `host:port` without a scheme.
    pub fn resolve_base(emulator_host: Option<&str>) -> String {
        match emulator_host {
            Some(host) if host.starts_with("http://") || host.starts_with("https://") => {
                host.trim_end_matches('/').to_string()
            }
            Some(host) => format!("http://{}", host.trim_end_matches('/')),
            None => DEFAULT_BASE_URL.to_string(),
        }
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, StateError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| StateError::Url(url::ParseError::RelativeUrlWithoutBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn download_url(&self, key: &StateKey) -> Result<Url, StateError> {
        let mut url =
            self.url_with_segments(&["storage", "v1", "b", self.bucket.as_str(), "o", key.as_str()])?;
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }

    pub(crate) fn upload_url(&self, key: &StateKey) -> Result<Url, StateError> {
        let mut url = self.url_with_segments(&["upload", "storage", "v1", "b", self.bucket.as_str(), "o"])?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", key.as_str());
        Ok(url)
    }
}

async fn status_error(key: &StateKey, response: reqwest::Response) -> StateError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    StateError::Status {
        key: key.to_string(),
        status,
        body,
    }
}

#[async_trait]
impl StateStore for GcsStore {
    async fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StateError> {
        let request = self.client.get(self.download_url(key)?);
        let response = self.credentials.authorize(request).await?.send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::info!(bucket = %self.bucket, object = %key, "Status object does not exist yet");
                Ok(None)
            }
            status if status.is_success() => {
                let bytes = response.bytes().await?;
                tracing::debug!(bucket = %self.bucket, object = %key, bytes = bytes.len(), "Status object read");
                Ok(Some(bytes.to_vec()))
            }
            _ => Err(status_error(key, response).await),
        }
    }

    async fn put(&self, key: &StateKey, value: &[u8]) -> Result<(), StateError> {
        let request = self
            .client
            .post(self.upload_url(key)?)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(value.to_vec());
        let response = self.credentials.authorize(request).await?.send().await?;

        if !response.status().is_success() {
            return Err(status_error(key, response).await);
        }

        tracing::debug!(bucket = %self.bucket, object = %key, "Status object written");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "gcs"
    }
}
