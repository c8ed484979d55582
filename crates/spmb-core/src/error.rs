//! Core error types for the SPMB portal.
//!
//! This module provides the error enum [`SpmbError`] covering validation,
//! lookup, file constraint, schema, session, and collaborator failures.
//! Every variant is local and recoverable; callers surface them as
//! user-facing messages.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A rejected input, either one message or a map of per-field messages.
///
/// The form engine reports a failed submission as a map keyed by field id;
/// builder and session checks report a single message.
///
/// ```
/// use std::collections::HashMap;
/// use spmb_core::error::ValidationError;
///
/// let err = ValidationError::new("Label harus diisi", "required");
/// assert_eq!(err.to_string(), "Label harus diisi");
///
/// let messages = HashMap::from([("f1".to_string(), "Nama Lengkap harus diisi".to_string())]);
/// let err = ValidationError::from_field_messages(&messages);
/// assert_eq!(err.to_string(), "f1: Nama Lengkap harus diisi");
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
    /// Machine-readable reason, e.g. `required` or `empty_selection`.
    pub code: String,
    pub params: HashMap<String, String>,
    /// Per-field errors keyed by field id or attribute name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: HashMap::new(),
        }
    }

    /// A compound error with no top-level message.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            field_errors,
            ..Self::new("", "")
        }
    }

    /// Builds a compound error from a one-message-per-field error map.
    pub fn from_field_messages(messages: &HashMap<String, String>) -> Self {
        Self::with_field_errors(
            messages
                .iter()
                .map(|(field, message)| (field.clone(), vec![Self::new(message.as_str(), "invalid")]))
                .collect(),
        )
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    /// The top-level message, or `field: message` pairs sorted by field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            return f.write_str(&self.message);
        }
        let mut fields: Vec<_> = self.field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        let parts: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, errors)| errors.iter().map(move |e| format!("{field}: {e}")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// A rejected file assignment.
///
/// The display text is the message shown next to the file input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileConstraintError {
    /// The file exceeds the maximum upload size.
    #[error("Ukuran file maksimal 5MB")]
    TooLarge {
        /// The size of the rejected file in bytes.
        size: u64,
        /// The maximum allowed size in bytes.
        max: u64,
    },

    /// The file's MIME type is not in the allowed set.
    #[error("Format file harus JPG, PNG, atau PDF")]
    UnsupportedType(String),
}

/// The primary error type for the SPMB portal.
///
/// Each variant maps to an HTTP-like status code via [`SpmbError::status_code`]
/// for the submission and persistence boundaries.
#[derive(Error, Debug)]
pub enum SpmbError {
    // ── Input ────────────────────────────────────────────────────────

    /// User input violates a required or format constraint.
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// A file was rejected by the upload policy.
    #[error("File rejected for field '{field_id}': {source}")]
    FileConstraint {
        /// The field the file was assigned to.
        field_id: String,
        /// The violated constraint.
        #[source]
        source: FileConstraintError,
    },

    /// A template or field schema is malformed, or cannot be rendered.
    #[error("Schema error: {0}")]
    Schema(String),

    // ── Lookup ───────────────────────────────────────────────────────

    /// The referenced field, entity, or index does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same identifier already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    // ── Session ──────────────────────────────────────────────────────

    /// Credentials were rejected or the session is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // ── Collaborators ────────────────────────────────────────────────

    /// A submission or persistence call failed.
    #[error("API error: {0}")]
    Api(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SpmbError {
    /// Shorthand for a simple [`SpmbError::Validation`].
    pub fn validation(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(message, code))
    }

    /// Returns the HTTP status code associated with this error.
    ///
    /// - `Validation`, `FileConstraint`, `Schema` -> 400
    /// - `Unauthorized` -> 401
    /// - `NotFound` -> 404
    /// - `Conflict` -> 409
    /// - `Api` -> 502
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::FileConstraint { .. } | Self::Schema(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Api(_) => 502,
            Self::ConfigurationError(_) | Self::SerializationError(_) | Self::IoError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for SpmbError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, SpmbError>`.
pub type SpmbResult<T> = Result<T, SpmbError>;
