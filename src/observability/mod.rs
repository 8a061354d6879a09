//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, never secrets)
//!     → inside the per-run span (run_id, target)
//!
//! Consumers:
//!     → stdout, picked up by the job runner's log collector
//! ```
//!
//! # Design Decisions
//! - JSON lines for production, pretty format for development
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
