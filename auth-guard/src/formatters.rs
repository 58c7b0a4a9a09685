//! Renderings of validation results for transport and display.
//!
//! [`JsonFormatter`] produces the wire shape handed to a UI layer;
//! [`HumanFormatter`] produces console text for logs, debugging and the
//! benchmarks.
//!
//! # Examples
//!
//! ```rust
//! use auth_guard::core::ValidationOptions;
//! use auth_guard::formatters::{FormatterConfig, HumanFormatter, ResultFormatter};
//! use auth_guard::validators::PasswordValidator;
//!
//! let result = PasswordValidator::new().validate("short", None, &ValidationOptions::default());
//! let text = HumanFormatter::with_config(FormatterConfig::minimal())
//!     .format(&result)
//!     .unwrap();
//! assert!(text.contains("PASSWORD_TOO_SHORT"));
//! ```

use std::fmt::Write;

use serde_json::Value;

use crate::core::{Locale, Severity, ValidationMetadata, ValidationResult};
use crate::error::{ErrorContext, Result};
use crate::forms::FormReport;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Configuration options for formatting validation results.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include validator metadata (strength, risk score, sanitized value)
    pub include_metadata: bool,
    /// Include warnings
    pub include_warnings: bool,
    /// Include error details
    pub include_details: bool,
    /// Maximum number of errors to show per field (`None` for all)
    pub max_errors: Option<usize>,
    /// Whether to use colorized output (human formatter only)
    pub use_colors: bool,
    /// Include the call's timing
    pub include_timing: bool,
    /// Locale for labels rendered by the formatter itself
    pub locale: Locale,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_metadata: true,
            include_warnings: true,
            include_details: true,
            max_errors: None,
            use_colors: true,
            include_timing: true,
            locale: Locale::default(),
        }
    }
}

impl FormatterConfig {
    /// Errors only, without colors.
    pub fn minimal() -> Self {
        Self {
            include_metadata: false,
            include_warnings: false,
            include_details: false,
            max_errors: None,
            use_colors: false,
            include_timing: false,
            locale: Locale::default(),
        }
    }

    /// The single error a UI would show per field, plus warnings.
    pub fn ui() -> Self {
        Self {
            include_metadata: true,
            include_warnings: true,
            include_details: false,
            max_errors: Some(1),
            use_colors: false,
            include_timing: false,
            locale: Locale::default(),
        }
    }

    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn with_warnings(mut self, include: bool) -> Self {
        self.include_warnings = include;
        self
    }

    pub fn with_max_errors(mut self, max: usize) -> Self {
        self.max_errors = Some(max);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Converts results into an output format.
///
/// # Examples
///
/// ```rust
/// use auth_guard::core::ValidationResult;
/// use auth_guard::forms::FormReport;
/// use auth_guard::formatters::ResultFormatter;
///
/// struct Verdict;
///
/// impl ResultFormatter for Verdict {
///     fn format(&self, result: &ValidationResult) -> auth_guard::Result<String> {
///         Ok(if result.is_valid() { "ok" } else { "rejected" }.to_string())
///     }
///
///     fn format_form(&self, report: &FormReport) -> auth_guard::Result<String> {
///         Ok(report.is_submittable().to_string())
///     }
/// }
///
/// assert_eq!(Verdict.format(&ValidationResult::new()).unwrap(), "ok");
/// ```
pub trait ResultFormatter {
    /// Formats one field result.
    fn format(&self, result: &ValidationResult) -> Result<String>;

    /// Formats one field result with a one-off configuration.
    fn format_with_config(
        &self,
        result: &ValidationResult,
        _config: &FormatterConfig,
    ) -> Result<String> {
        self.format(result)
    }

    /// Formats every field of a form.
    fn format_form(&self, report: &FormReport) -> Result<String>;
}

/// Formats results as JSON in the serde shape of [`ValidationResult`].
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    config: FormatterConfig,
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a compact JSON formatter that keeps every field.
    pub fn new() -> Self {
        Self {
            config: FormatterConfig::default(),
            pretty: false,
        }
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self {
            config,
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render(&self, value: &Value) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(value).context("Failed to serialize result to JSON")
        } else {
            serde_json::to_string(value).context("Failed to serialize result to JSON")
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &ValidationResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let value = filtered_value(result, config)?;
        self.render(&value)
    }

    fn format_form(&self, report: &FormReport) -> Result<String> {
        let mut fields = serde_json::Map::new();
        for field in report.fields() {
            fields.insert(
                field.slot.as_str().to_string(),
                filtered_value(&field.result, &self.config)?,
            );
        }
        let value = serde_json::json!({
            "is_submittable": report.is_submittable(),
            "fields": fields,
        });
        self.render(&value)
    }
}

/// Serializes `result` and drops the parts `config` excludes.
fn filtered_value(result: &ValidationResult, config: &FormatterConfig) -> Result<Value> {
    let mut value = serde_json::to_value(result)?;
    if let Value::Object(map) = &mut value {
        if !config.include_metadata {
            map.remove("metadata");
        }
        if !config.include_warnings {
            map.remove("field_warnings");
        }
        if !config.include_timing {
            map.remove("timing_ms");
        }
        if let Some(Value::Array(errors)) = map.get_mut("field_errors") {
            if let Some(max) = config.max_errors {
                errors.truncate(max);
            }
            if !config.include_details {
                for error in errors.iter_mut() {
                    if let Value::Object(e) = error {
                        e.remove("details");
                    }
                }
            }
        }
    }
    Ok(value)
}

/// Formats results as indented console text.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn paint(&self, config: &FormatterConfig, color: &str, text: &str) -> String {
        if config.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn write_result(
        &self,
        out: &mut String,
        result: &ValidationResult,
        config: &FormatterConfig,
        indent: &str,
    ) -> std::fmt::Result {
        if result.is_valid() {
            writeln!(out, "{indent}✅ {}", self.paint(config, GREEN, "Valid"))?;
        } else {
            let label = format!("Invalid ({} errors)", result.errors().len());
            writeln!(out, "{indent}❌ {}", self.paint(config, RED, &label))?;
        }

        let shown = config.max_errors.unwrap_or(usize::MAX);
        for error in result.errors().iter().take(shown) {
            let symbol = match error.severity {
                Severity::Critical => "🚨",
                Severity::Major => "❗",
                Severity::Minor => "•",
            };
            writeln!(
                out,
                "{indent}   {symbol} [{}] {}: {}",
                error.severity,
                error.code,
                error.message
            )?;
            if let (true, Some(details)) = (config.include_details, &error.details) {
                if let Some(rule) = &details.violated_rule {
                    writeln!(out, "{indent}      rule: {rule}")?;
                }
                if let Some(format) = &details.expected_format {
                    writeln!(out, "{indent}      expected: {format}")?;
                }
                if let Some(rejected) = &details.rejected_value {
                    writeln!(out, "{indent}      rejected: {rejected}")?;
                }
            }
        }
        if result.errors().len() > shown {
            writeln!(
                out,
                "{indent}   ... and {} more errors",
                result.errors().len() - shown
            )?;
        }

        if config.include_warnings {
            for warning in result.warnings() {
                let line = format!(
                    "⚠️  [{}] {}: {}",
                    warning.risk_level, warning.code, warning.message
                );
                writeln!(out, "{indent}   {}", self.paint(config, YELLOW, &line))?;
                if let Some(suggestion) = &warning.suggestion {
                    writeln!(out, "{indent}      → {suggestion}")?;
                }
            }
        }

        if config.include_metadata {
            match result.metadata() {
                Some(ValidationMetadata::Email(m)) => writeln!(
                    out,
                    "{indent}   domain: {}, disposable: {}, risk: {}/100",
                    m.domain.as_deref().unwrap_or("-"),
                    m.is_disposable,
                    m.risk_score
                )?,
                Some(ValidationMetadata::Password(m)) => writeln!(
                    out,
                    "{indent}   strength: {}, entropy: {:.1} bits, crack time: {}",
                    m.strength,
                    m.entropy,
                    m.crack_time.label(config.locale)
                )?,
                Some(ValidationMetadata::Name(m)) => writeln!(
                    out,
                    "{indent}   sanitized: {}, scripts: {}",
                    m.sanitized_value,
                    m.detected_scripts.len()
                )?,
                None => {}
            }
        }

        if config.include_timing {
            writeln!(out, "{indent}   time: {:.3}ms", result.timing_ms())?;
        }
        Ok(())
    }
}

impl ResultFormatter for HumanFormatter {
    fn format(&self, result: &ValidationResult) -> Result<String> {
        self.format_with_config(result, &self.config)
    }

    fn format_with_config(
        &self,
        result: &ValidationResult,
        config: &FormatterConfig,
    ) -> Result<String> {
        let mut out = String::new();
        self.write_result(&mut out, result, config, "")
            .context("Failed to render result")?;
        Ok(out)
    }

    fn format_form(&self, report: &FormReport) -> Result<String> {
        let config = &self.config;
        let mut out = String::new();
        let header = if report.is_submittable() {
            self.paint(config, GREEN, "Form is submittable")
        } else {
            self.paint(config, RED, "Form is blocked")
        };
        writeln!(out, "{header}")?;
        for field in report.fields() {
            writeln!(out, "[{}]", field.slot.as_str())?;
            self.write_result(&mut out, &field.result, config, "  ")
                .context("Failed to render form field")?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        ErrorCode, ErrorDetails, Field, FieldError, FieldWarning, RiskLevel, WarningCode,
    };
    use crate::forms::{FieldReport, FormSlot};

    fn sample() -> ValidationResult {
        ValidationResult::from_parts(
            vec![
                FieldError::new(
                    ErrorCode::PasswordTooShort,
                    Field::Password,
                    Severity::Major,
                    Locale::En,
                )
                .with_details(ErrorDetails::rule("min_length=8")),
                FieldError::new(
                    ErrorCode::PasswordEntropyTooLow,
                    Field::Password,
                    Severity::Critical,
                    Locale::En,
                ),
            ],
            vec![FieldWarning::new(
                WarningCode::KeyboardPattern,
                RiskLevel::Medium,
                Locale::En,
            )],
            None,
        )
    }

    #[test]
    fn test_json_keeps_everything_by_default() {
        let json: Value = serde_json::from_str(&JsonFormatter::new().format(&sample()).unwrap())
            .unwrap();
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["field_errors"].as_array().unwrap().len(), 2);
        assert_eq!(json["field_warnings"][0]["code"], "KEYBOARD_PATTERN");
        assert!(json.get("timing_ms").is_some());
    }

    #[test]
    fn test_json_ui_config_trims() {
        let formatter = JsonFormatter::with_config(FormatterConfig::ui());
        let json: Value = serde_json::from_str(&formatter.format(&sample()).unwrap()).unwrap();
        let errors = json["field_errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].get("details").is_none());
        assert!(json.get("timing_ms").is_none());
    }

    #[test]
    fn test_human_without_colors() {
        let formatter = HumanFormatter::with_config(FormatterConfig::default().with_colors(false));
        let text = formatter.format(&sample()).unwrap();
        assert!(text.contains("Invalid (2 errors)"));
        assert!(text.contains("[critical] PASSWORD_ENTROPY_TOO_LOW"));
        assert!(text.contains("rule: min_length=8"));
        assert!(text.contains("KEYBOARD_PATTERN"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_human_truncates_errors() {
        let formatter = HumanFormatter::with_config(FormatterConfig::minimal().with_max_errors(1));
        let text = formatter.format(&sample()).unwrap();
        assert!(text.contains("... and 1 more errors"));
    }

    #[test]
    fn test_form_rendering() {
        let report = FormReport::new(vec![
            FieldReport {
                slot: FormSlot::Email,
                result: ValidationResult::new(),
            },
            FieldReport {
                slot: FormSlot::Password,
                result: sample(),
            },
        ]);

        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["is_submittable"], false);
        assert_eq!(json["fields"]["email"]["is_valid"], true);

        let text = HumanFormatter::with_config(FormatterConfig::minimal())
            .format_form(&report)
            .unwrap();
        assert!(text.starts_with("Form is blocked"));
        assert!(text.contains("[password]"));
    }
}
