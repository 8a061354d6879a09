//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Probe (probe.rs):
//!     One GET to the target
//!     → StatusLine ("200 OK", "503 Service Unavailable", ...)
//!
//! Transition detection (transition.rs):
//!     StatusLine + previously stored blob
//!     → Outcome (NoPriorState | Unchanged | Transitioned)
//!     → ordered list of requested effects
//! ```
//!
//! # Design Decisions
//! - The detector is pure; it never touches network or storage
//! - Health is binary: the success line is healthy, anything else is down
//! - State comparison is on the raw stored bytes, not on parsed codes

pub mod probe;
pub mod status;
pub mod transition;

pub use probe::{HttpProbe, ProbeError, StatusProbe};
pub use status::StatusLine;
pub use transition::{detect, Decision, Effect, Outcome, Severity};
