//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (URL, SLACK_API_TOKEN, ...)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → passed by reference to every adapter
//! ```
//!
//! # Design Decisions
//! - Config is populated once at startup; nothing reads the environment later
//! - All fields have defaults so a file may be partial or absent
//! - Empty environment values count as unset
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    GcpConfig, LogFormat, MonitorConfig, ObservabilityConfig, PubSubConfig, SlackConfig,
    StorageConfig, TargetConfig,
};
