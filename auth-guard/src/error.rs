//! Error types for the auth-guard validation engine.
//!
//! Validation *outcomes* (an empty field, a weak password, a disposable
//! domain) are never errors: they are reported through
//! [`ValidationResult`](crate::core::ValidationResult). `GuardError` is reserved
//! for contract violations by the caller, such as contradictory options or a
//! failing duplicate-email backend.

use thiserror::Error;

/// The main error type for the auth-guard library.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Options that contradict themselves (e.g. `min_length > max_length`).
    #[error("Invalid options for '{field}': {message}")]
    InvalidOptions {
        /// Option group or option name that was rejected
        field: String,
        /// Detailed error message
        message: String,
    },

    /// Error from serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error raised by a caller-supplied email availability backend.
    #[error("Email availability check failed: {message}")]
    AvailabilityCheck {
        /// Human-readable error message
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error related to logging or subscriber configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, GuardError>`.
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates a new invalid-options error.
    pub fn invalid_options(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new availability error without an underlying source.
    pub fn availability(message: impl Into<String>) -> Self {
        Self::AvailabilityCheck {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new availability error wrapping the backend's own error.
    pub fn availability_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::AvailabilityCheck {
            message: message.into(),
            source: Some(source),
        }
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for GuardError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Internal(format!("formatting failed: {err}"))
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<GuardError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            GuardError::Internal(inner) => GuardError::Internal(format!("{msg}: {inner}")),
            other => GuardError::Internal(format!("{msg}: {other}")),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            match e.into() {
                GuardError::Internal(inner) => GuardError::Internal(format!("{msg}: {inner}")),
                other => GuardError::Internal(format!("{msg}: {other}")),
            }
        })
    }
}
