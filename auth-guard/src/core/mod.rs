//! Core types shared by every validator.
//!
//! ## Overview
//!
//! - **[`ValidationResult`]**: the return value of every validator, holding
//!   ordered [`FieldError`]s, [`FieldWarning`]s and [`ValidationMetadata`]
//! - **[`Severity`]**: critical, major or minor, controlling whether an error
//!   blocks submission
//! - **[`UserContext`]**: cross-field input (email, display name, current
//!   password fingerprint) for the password validator
//! - **[`ValidationOptions`]**: per-call policy, production by default
//! - **[`Locale`]**: language of the message table
//!
//! ## Example
//!
//! ```rust
//! use auth_guard::core::{ErrorCode, Severity, ValidationOptions};
//! use auth_guard::validators::PasswordValidator;
//!
//! let validator = PasswordValidator::new();
//! let result = validator.validate("password", None, &ValidationOptions::default());
//!
//! assert!(!result.is_valid());
//! let primary = result.primary_error().unwrap();
//! assert_eq!(primary.code, ErrorCode::PasswordCommonPassword);
//! assert_eq!(primary.severity, Severity::Critical);
//! ```

mod codes;
mod context;
mod messages;
mod metrics;
mod options;
mod result;
mod severity;

pub use codes::{ErrorCode, Field, ImprovementTip, WarningCode};
pub use context::{fingerprint, UserContext};
pub use messages::{error_message, tip_message, warning_message, Locale};
pub use metrics::{
    CrackTime, EmailMetrics, NameMetrics, NameShape, PasswordMetrics, Script, StrengthTier,
    ValidationMetadata,
};
pub use options::{
    EmailFormat, EmailOptions, EntropyCalibration, NameCharset, NameOptions, PasswordOptions,
    ValidationOptions, ValidationOptionsBuilder,
};
pub use result::{ErrorDetails, FieldError, FieldWarning, ValidationResult};
pub use severity::{RiskLevel, Severity};
