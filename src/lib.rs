//! Single-shot uptime monitor library.
//!
//! One run probes a URL, compares the status line with the last one stored
//! and, on a change, notifies Slack and optionally publishes an outage event.

pub mod config;
pub mod error;
pub mod gcp;
pub mod health;
pub mod lifecycle;
pub mod monitor;
pub mod notify;
pub mod observability;
pub mod publish;
pub mod state;

pub use config::MonitorConfig;
pub use error::{MonitorError, MonitorResult};
pub use monitor::{Monitor, RunReport};
