//! Status transition detection.
//!
//! # States
//! - Healthy: the last stored line is the success line
//! - Down: the last stored line is anything else
//!
//! # State Transitions
//! ```text
//! (absent)  → any:      NoPriorState, record the line, stay silent
//! X         → X:        Unchanged, nothing happens
//! X         → Y (≠ X):  Transitioned, record Y and notify
//!                       severity = Recovered if Y is the success line, else Down
//! ```
//!
//! A change between two failure lines (`503` → `502`) is still a transition
//! and alerts as Down.

use crate::health::status::StatusLine;

/// Which way a transition went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Down,
    Recovered,
}

impl Severity {
    /// Severity of a transition that lands on `observed`.
    pub fn of(observed: &StatusLine) -> Self {
        if observed.is_success() {
            Severity::Recovered
        } else {
            Severity::Down
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Down => "down",
            Severity::Recovered => "recovered",
        }
    }
}

/// Result of comparing the observed line with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoPriorState,
    Unchanged,
    Transitioned(Severity),
}

/// A side effect the run should perform, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Overwrite the stored status with this line.
    WriteState(StatusLine),
    /// Send a chat notification.
    Notify(Severity),
    /// Emit an outage event carrying the target URL.
    Publish,
}

/// The detector's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub outcome: Outcome,
    pub effects: Vec<Effect>,
}

impl Decision {
    pub fn notification(&self) -> Option<Severity> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Notify(severity) => Some(*severity),
            _ => None,
        })
    }
}

/// Compare `observed` against the previously stored blob.
///
/// An empty blob is treated like a missing one.
pub fn detect(observed: &StatusLine, stored: Option<&[u8]>) -> Decision {
    let stored = stored.filter(|blob| !blob.is_empty());

    match stored {
        None => Decision {
            outcome: Outcome::NoPriorState,
            effects: vec![Effect::WriteState(observed.clone())],
        },
        Some(previous) if previous == observed.as_bytes() => Decision {
            outcome: Outcome::Unchanged,
            effects: Vec::new(),
        },
        Some(_) => {
            let severity = Severity::of(observed);
            let mut effects = vec![
                Effect::WriteState(observed.clone()),
                Effect::Notify(severity),
            ];
            if severity == Severity::Down {
                effects.push(Effect::Publish);
            }
            Decision {
                outcome: Outcome::Transitioned(severity),
                effects,
            }
        }
    }
}
