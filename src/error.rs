//! Top-level error type for a monitor run.

use thiserror::Error;

use crate::config::ConfigError;
use crate::health::ProbeError;
use crate::notify::NotifyError;
use crate::publish::PublishError;
use crate::state::StateError;

/// Any failure that ends a run.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("startup failed: {0}")]
    Startup(String),

    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("state store failed: {0}")]
    State(#[from] StateError),

    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),

    #[error("event publish failed: {0}")]
    Publish(#[from] PublishError),
}

impl MonitorError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            MonitorError::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Result type for monitor operations.
pub type MonitorResult<T> = Result<T, MonitorError>;
