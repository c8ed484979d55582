//! # spmb-core
//!
//! Core types shared by every crate of the SPMB registration portal.
//! This crate has no portal dependencies and provides the foundation for
//! the form engine, the portal collaborators, and the CLI.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Portal settings with defaults
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FileConstraintError, SpmbError, SpmbResult, ValidationError};
pub use settings::Settings;
