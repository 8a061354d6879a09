//! Google Cloud access shared by the GCS store and the Pub/Sub publisher.
//!
//! # Responsibilities
//! - Produce a bearer token for Google APIs
//! - Resolve API base URLs, including emulator overrides
//!
//! # Design Decisions
//! - A static token wins over the metadata server
//! - The metadata token is fetched at most once per run
//! - Emulators get no Authorization header at all

pub mod auth;

pub use auth::{AuthError, Credentials};
