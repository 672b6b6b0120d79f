//! Touchless Common Utilities
//!
//! Shared infrastructure for all Touchless crates:
//! - Error types and result aliases
//! - Session clock used for gesture cooldowns
//! - Tracing/logging initialization
//! - Configuration loading and validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
