//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → HTTP client → probe → state store
//!     → notifier → optional publisher → Monitor
//!
//! Run:
//!     Monitor::run_once → RunReport | MonitorError → exit code
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then shared client, then adapters
//! - One shared HTTP client so every outbound call gets the same timeout
//! - There is no shutdown phase; a run ends when its last call returns

pub mod startup;

pub use startup::{build_http_client, build_monitor};
