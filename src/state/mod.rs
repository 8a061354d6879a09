//! Last-known status persistence.
//!
//! # Data Flow
//! ```text
//! target URL
//!     → key.rs (deterministic object name, e.g. example_com_health.txt)
//!     → StateStore::get  (previous status blob, if any)
//!     → transition detection
//!     → StateStore::put  (new status blob, only when it changed)
//! ```
//!
//! # Backends
//! - `gcs`: Cloud Storage bucket (`BUCKET_NAME`)
//! - `file`: local directory (`STATE_DIR`)
//! - `baseline`: nothing persisted, previous status assumed healthy
//! - `memory`: in-process map for tests and embedding
//!
//! # Design Decisions
//! - Blobs are opaque bytes; only the detector interprets them
//! - Concurrent runs against the same key are not coordinated

pub mod baseline;
pub mod file;
pub mod gcs;
pub mod key;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::gcp::AuthError;

pub use baseline::BaselineStore;
pub use file::FileStore;
pub use gcs::GcsStore;
pub use key::StateKey;
pub use memory::MemoryStore;

/// Errors raised by state backends.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state IO error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("state request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("state backend returned status {status} for {key}: {body}")]
    Status { key: String, status: u16, body: String },

    #[error("state backend authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("invalid state backend URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Reads and writes one status blob per key.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// The stored blob, or `None` if nothing was stored yet.
    async fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StateError>;

    /// Replace the stored blob.
    async fn put(&self, key: &StateKey, value: &[u8]) -> Result<(), StateError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
