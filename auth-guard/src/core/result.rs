//! Validation result types.

use super::codes::{ErrorCode, Field, WarningCode};
use super::messages::{error_message, warning_message, Locale};
use super::metrics::ValidationMetadata;
use super::severity::{RiskLevel, Severity};
use serde::{Deserialize, Serialize};

/// Extra detail attached to a [`FieldError`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// The offending fragment or value, when safe to echo back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<String>,
    /// Human-readable description of what is accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_format: Option<String>,
    /// Name of the rule that fired (e.g. `min_length=8`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violated_rule: Option<String>,
}

impl ErrorDetails {
    pub fn rejected(value: impl Into<String>) -> Self {
        Self {
            rejected_value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn rule(rule: impl Into<String>) -> Self {
        Self {
            violated_rule: Some(rule.into()),
            ..Self::default()
        }
    }

    pub fn with_expected_format(mut self, format: impl Into<String>) -> Self {
        self.expected_format = Some(format.into());
        self
    }

    pub fn with_violated_rule(mut self, rule: impl Into<String>) -> Self {
        self.violated_rule = Some(rule.into());
        self
    }
}

/// A blocking validation problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub code: ErrorCode,
    /// Localized message
    pub message: String,
    pub field: Field,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

impl FieldError {
    /// Creates an error whose message is taken from the locale table.
    pub fn new(code: ErrorCode, field: Field, severity: Severity, locale: Locale) -> Self {
        Self {
            code,
            message: error_message(code, locale).to_string(),
            field,
            severity,
            details: None,
        }
    }

    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// A non-blocking advisory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldWarning {
    pub code: WarningCode,
    /// Localized message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub risk_level: RiskLevel,
}

impl FieldWarning {
    /// Creates a warning whose message and suggestion come from the locale table.
    pub fn new(code: WarningCode, risk_level: RiskLevel, locale: Locale) -> Self {
        let (message, suggestion) = warning_message(code, locale);
        Self {
            code,
            message: message.to_string(),
            suggestion: suggestion.map(str::to_string),
            risk_level,
        }
    }
}

/// The return value of every validator.
///
/// `is_valid` is kept equal to `field_errors.is_empty()` by every mutating
/// method and recomputed on deserialization; warnings never affect it.
///
/// # Examples
///
/// ```rust
/// use auth_guard::core::{ErrorCode, Field, FieldError, Locale, Severity, ValidationResult};
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid());
///
/// result.push_error(FieldError::new(
///     ErrorCode::EmailAlreadyExists,
///     Field::Email,
///     Severity::Major,
///     Locale::En,
/// ));
/// assert!(!result.is_valid());
/// assert!(result.has_error(ErrorCode::EmailAlreadyExists));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawValidationResult")]
pub struct ValidationResult {
    is_valid: bool,
    field_errors: Vec<FieldError>,
    field_warnings: Vec<FieldWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<ValidationMetadata>,
    timing_ms: f64,
}

impl ValidationResult {
    /// Creates an empty, valid result.
    pub fn new() -> Self {
        Self {
            is_valid: true,
            field_errors: Vec::new(),
            field_warnings: Vec::new(),
            metadata: None,
            timing_ms: 0.0,
        }
    }

    /// Builds a result from accumulated findings.
    pub fn from_parts(
        field_errors: Vec<FieldError>,
        field_warnings: Vec<FieldWarning>,
        metadata: Option<ValidationMetadata>,
    ) -> Self {
        Self {
            is_valid: field_errors.is_empty(),
            field_errors,
            field_warnings,
            metadata,
            timing_ms: 0.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Errors in evaluation order.
    pub fn errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    pub fn warnings(&self) -> &[FieldWarning] {
        &self.field_warnings
    }

    pub fn metadata(&self) -> Option<&ValidationMetadata> {
        self.metadata.as_ref()
    }

    /// Wall-clock cost of the call in milliseconds. Diagnostic only.
    pub fn timing_ms(&self) -> f64 {
        self.timing_ms
    }

    pub(crate) fn set_timing_ms(&mut self, timing_ms: f64) {
        self.timing_ms = timing_ms;
    }

    pub(crate) fn metadata_mut(&mut self) -> Option<&mut ValidationMetadata> {
        self.metadata.as_mut()
    }

    /// Appends an error and marks the result invalid.
    pub fn push_error(&mut self, error: FieldError) {
        self.field_errors.push(error);
        self.is_valid = false;
    }

    pub fn push_warning(&mut self, warning: FieldWarning) {
        self.field_warnings.push(warning);
    }

    /// Returns the error a single-message UI should show: the first critical
    /// error, else the first major one, else the first error.
    pub fn primary_error(&self) -> Option<&FieldError> {
        self.first_with(Severity::Critical)
            .or_else(|| self.first_with(Severity::Major))
            .or_else(|| self.field_errors.first())
    }

    /// Returns the highest-severity error, preferring the earliest on ties.
    pub fn most_severe_error(&self) -> Option<&FieldError> {
        self.field_errors
            .iter()
            .fold(None, |best: Option<&FieldError>, e| match best {
                Some(b) if b.severity >= e.severity => Some(b),
                _ => Some(e),
            })
    }

    /// Returns true if any error would block form submission.
    pub fn has_blocking_errors(&self) -> bool {
        self.field_errors
            .iter()
            .any(|e| e.severity.blocks_submission())
    }

    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.field_errors.iter().any(|e| e.code == code)
    }

    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.field_warnings.iter().any(|w| w.code == code)
    }

    /// Returns the errors of a given severity, in evaluation order.
    pub fn errors_by_severity(&self, severity: Severity) -> Vec<&FieldError> {
        self.field_errors
            .iter()
            .filter(|e| e.severity == severity)
            .collect()
    }

    /// Formats the result as JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        use crate::formatters::{JsonFormatter, ResultFormatter};
        JsonFormatter::new().format(self)
    }

    /// Formats the result for console display.
    pub fn to_human(&self) -> crate::Result<String> {
        use crate::formatters::{HumanFormatter, ResultFormatter};
        HumanFormatter::new().format(self)
    }

    fn first_with(&self, severity: Severity) -> Option<&FieldError> {
        self.field_errors.iter().find(|e| e.severity == severity)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire form of [`ValidationResult`]. A stored `is_valid` flag is ignored.
#[derive(Deserialize)]
struct RawValidationResult {
    #[serde(default)]
    field_errors: Vec<FieldError>,
    #[serde(default)]
    field_warnings: Vec<FieldWarning>,
    #[serde(default)]
    metadata: Option<ValidationMetadata>,
    #[serde(default)]
    timing_ms: f64,
}

impl From<RawValidationResult> for ValidationResult {
    fn from(raw: RawValidationResult) -> Self {
        let mut result = Self::from_parts(raw.field_errors, raw.field_warnings, raw.metadata);
        result.timing_ms = raw.timing_ms;
        result
    }
}
