//! Prelude for commonly used types and traits in auth-guard.

pub use crate::core::{
    ErrorCode, Field, FieldError, FieldWarning, Locale, Severity, UserContext,
    ValidationMetadata, ValidationOptions, ValidationResult, WarningCode,
};
pub use crate::error::{ErrorContext, GuardError, Result};
pub use crate::formatters::{FormatterConfig, ResultFormatter};
pub use crate::forms::{check_email_availability, EmailAvailability, FormReport, FormValidator};
pub use crate::logging::LogConfig;
pub use crate::validators::{EmailValidator, NameValidator, PasswordValidator};
