//! Display-name validation.

use std::time::Instant;

use tracing::instrument;
use unicode_normalization::UnicodeNormalization;

use super::password::patterns::has_repeated_run;
use crate::core::{
    ErrorCode, ErrorDetails, Field, FieldError, FieldWarning, NameCharset, NameMetrics,
    NameShape, RiskLevel, Script, Severity, ValidationMetadata, ValidationOptions,
    ValidationResult, WarningCode,
};
use crate::logging::LogConfig;
use crate::rules::name::{
    is_emoji, is_hangul_syllable, BIDI_OVERRIDES, EMAIL_SHAPE, HTML_FRAGMENTS, HTML_TAG_SHAPE,
    NEWLINE_CHARS, NULL_CHARS, PATH_TRAVERSAL, SQL_KEYWORDS, STANDARD_CHARSET, STRICT_CHARSET,
    SUSPICIOUS_REPEAT_RUN, SUSPICIOUS_SPECIAL_LIMIT, URL_SHAPE, XSS_FRAGMENTS, ZERO_WIDTH_CHARS,
};
use crate::security::{escape_html, strip_fragments, CaseFold, PatternScanner};
use crate::{log_rule, perf_debug};

const HTML: PatternScanner = PatternScanner::new(HTML_FRAGMENTS, CaseFold::Lower);
const SQL: PatternScanner = PatternScanner::new(SQL_KEYWORDS, CaseFold::Upper);
const XSS: PatternScanner = PatternScanner::new(XSS_FRAGMENTS, CaseFold::Lower);
const TRAVERSAL: PatternScanner = PatternScanner::new(PATH_TRAVERSAL, CaseFold::Exact);

/// Control-character tables in scan order.
const CONTROL: [PatternScanner; 4] = [
    PatternScanner::new(NULL_CHARS, CaseFold::Exact),
    PatternScanner::new(NEWLINE_CHARS, CaseFold::Exact),
    PatternScanner::new(ZERO_WIDTH_CHARS, CaseFold::Exact),
    PatternScanner::new(BIDI_OVERRIDES, CaseFold::Exact),
];

/// Validates display names.
///
/// Only an empty or blank name returns early. The length, character-set,
/// injection and control-character stages all run so every problem is
/// reported at once.
///
/// # Examples
///
/// ```rust
/// use auth_guard::core::{ErrorCode, Severity, ValidationOptions};
/// use auth_guard::validators::NameValidator;
///
/// let validator = NameValidator::new();
/// let options = ValidationOptions::default();
///
/// assert!(validator.validate("홍길동", &options).is_valid());
///
/// let result = validator.validate("1=1 OR DROP TABLE", &options);
/// let sql = result.errors().iter().find(|e| e.code == ErrorCode::NameSqlKeywords).unwrap();
/// assert_eq!(sql.severity, Severity::Critical);
/// ```
#[derive(Debug, Default)]
pub struct NameValidator {
    log_config: LogConfig,
}

impl NameValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    #[instrument(skip_all, fields(field = "name"))]
    pub fn validate(&self, name: &str, options: &ValidationOptions) -> ValidationResult {
        let start = Instant::now();
        let mut result = self.run(name, options);
        result.set_timing_ms(start.elapsed().as_secs_f64() * 1000.0);

        perf_debug!(
            self.log_config,
            value = %self.log_config.field_value(name),
            is_valid = result.is_valid(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            timing_ms = result.timing_ms(),
            "Name validated"
        );
        result
    }

    fn run(&self, name: &str, options: &ValidationOptions) -> ValidationResult {
        let locale = options.locale();
        let policy = options.name();
        let error = |code, severity| FieldError::new(code, Field::Name, severity, locale);

        if name.is_empty() {
            return ValidationResult::from_parts(
                vec![error(ErrorCode::NameFieldEmpty, Severity::Critical)],
                vec![],
                None,
            );
        }

        let normalized = normalize(name);
        if normalized.trim().is_empty() {
            return ValidationResult::from_parts(
                vec![error(ErrorCode::NameWhitespaceOnly, Severity::Major)],
                vec![],
                None,
            );
        }

        let mut errors = Vec::new();
        let length = normalized.chars().count();

        if length < policy.min_length {
            errors.push(
                error(ErrorCode::NameTooShort, Severity::Major)
                    .with_details(ErrorDetails::rule(format!("min_length={}", policy.min_length))),
            );
        } else if length > policy.max_length {
            errors.push(
                error(ErrorCode::NameTooLong, Severity::Major)
                    .with_details(ErrorDetails::rule(format!("max_length={}", policy.max_length))),
            );
        }

        if policy.ascii_only && !normalized.is_ascii() {
            errors.push(
                error(ErrorCode::NameInvalidCharacters, Severity::Major)
                    .with_details(ErrorDetails::rule("ascii_only")),
            );
        } else {
            let charset = match policy.charset {
                NameCharset::Standard => &*STANDARD_CHARSET,
                NameCharset::Strict => &*STRICT_CHARSET,
            };
            if !charset.is_match(&normalized) {
                errors.push(
                    error(ErrorCode::NameInvalidCharacters, Severity::Major).with_details(
                        ErrorDetails::default().with_expected_format(match policy.charset {
                            NameCharset::Standard => "Hangul, Latin letters, digits, spaces, . - '",
                            NameCharset::Strict => "Hangul, Latin letters, digits, spaces",
                        }),
                    ),
                );
            }
        }

        let html = HTML
            .first_match(&normalized)
            .or_else(|| HTML_TAG_SHAPE.find(&normalized).map(|_| "<...>"));
        let injection_checks = [
            (ErrorCode::NameHtmlTags, html),
            (ErrorCode::NameSqlKeywords, SQL.first_match(&normalized)),
            (ErrorCode::NameXssPattern, XSS.first_match(&normalized)),
            (ErrorCode::NamePathTraversal, TRAVERSAL.first_match(&normalized)),
        ];
        for (code, fragment) in injection_checks {
            if let Some(fragment) = fragment {
                log_rule!(self.log_config, rule = ?code, "Name rule fired");
                errors.push(error(code, Severity::Critical).with_details(blocked(fragment)));
            }
        }

        if let Some(fragment) = CONTROL.iter().find_map(|scanner| scanner.first_match(&normalized)) {
            log_rule!(self.log_config, rule = "control_chars", "Name rule fired");
            errors.push(error(ErrorCode::NameControlChars, Severity::Major).with_details(blocked(fragment)));
        }

        if !policy.allow_emojis && normalized.chars().any(is_emoji) {
            errors.push(error(ErrorCode::NameEmojiNotAllowed, Severity::Minor));
        }

        let scripts = detect_scripts(&normalized);
        let shapes = detect_shapes(&normalized);

        let mut warnings = Vec::new();
        if scripts.len() > 1 {
            warnings.push(FieldWarning::new(WarningCode::MixedLanguages, RiskLevel::Low, locale));
        }
        if is_hangul_dominant(&normalized) && length > policy.hangul_recommended_max {
            warnings.push(FieldWarning::new(
                WarningCode::HangulNameTooLong,
                RiskLevel::Low,
                locale,
            ));
        }
        if !shapes.is_empty() {
            warnings.push(FieldWarning::new(
                WarningCode::SuspiciousPatterns,
                RiskLevel::Medium,
                locale,
            ));
        }

        let metrics = NameMetrics {
            sanitized_value: sanitize(&normalized),
            normalized_value: normalized,
            detected_scripts: scripts,
            suspicious_patterns: shapes,
        };
        ValidationResult::from_parts(errors, warnings, Some(ValidationMetadata::Name(metrics)))
    }
}

fn blocked(fragment: &str) -> ErrorDetails {
    ErrorDetails::rule(format!("blocked_fragment={}", fragment.escape_debug()))
}

/// Trims, collapses runs of ordinary whitespace to one space and applies NFC.
///
/// Control characters such as `\n` are whitespace too, but they are kept so
/// the control-character check can see them.
pub fn normalize(name: &str) -> String {
    let ordinary = |c: char| c.is_whitespace() && !c.is_control();
    let mut collapsed = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.trim_matches(ordinary).chars() {
        if ordinary(c) {
            if !in_run {
                collapsed.push(' ');
            }
            in_run = true;
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }
    collapsed.nfc().collect()
}

/// HTML-escapes the name and strips control characters.
pub fn sanitize(name: &str) -> String {
    let escaped = escape_html(name);
    [NULL_CHARS, NEWLINE_CHARS, ZERO_WIDTH_CHARS, BIDI_OVERRIDES]
        .iter()
        .fold(escaped, |acc, table| strip_fragments(&acc, table))
}

fn detect_scripts(name: &str) -> Vec<Script> {
    let mut scripts = Vec::new();
    if name.chars().any(is_hangul_syllable) {
        scripts.push(Script::Hangul);
    }
    if name.chars().any(|c| c.is_ascii_alphabetic()) {
        scripts.push(Script::Latin);
    }
    if name.chars().any(|c| c.is_ascii_digit()) {
        scripts.push(Script::Digit);
    }
    scripts
}

fn is_hangul_dominant(name: &str) -> bool {
    let hangul = name.chars().filter(|c| is_hangul_syllable(*c)).count();
    let latin = name.chars().filter(|c| c.is_ascii_alphabetic()).count();
    hangul > latin
}

fn detect_shapes(name: &str) -> Vec<NameShape> {
    let mut shapes = Vec::new();
    let specials = name
        .chars()
        .filter(|c| !(is_hangul_syllable(*c) || c.is_ascii_alphanumeric() || c.is_whitespace()))
        .count();
    if specials > SUSPICIOUS_SPECIAL_LIMIT {
        shapes.push(NameShape::ExcessiveSpecials);
    }
    if name.chars().all(|c| c.is_ascii_digit()) {
        shapes.push(NameShape::DigitsOnly);
    }
    if has_repeated_run(name, SUSPICIOUS_REPEAT_RUN) {
        shapes.push(NameShape::RepeatedChars);
    }
    if URL_SHAPE.is_match(name) {
        shapes.push(NameShape::UrlLike);
    }
    if EMAIL_SHAPE.is_match(name) {
        shapes.push(NameShape::EmailLike);
    }
    shapes
}
