//! Registration email validation.

use std::sync::Mutex;
use std::time::Instant;

use tracing::instrument;

use crate::cache::{CacheStats, ExpiringCache};
use crate::core::{
    EmailFormat, EmailMetrics, ErrorCode, ErrorDetails, Field, FieldError, FieldWarning,
    RiskLevel, Severity, ValidationMetadata, ValidationOptions, ValidationResult, WarningCode,
};
use crate::logging::LogConfig;
use crate::rules::email::{
    is_disposable_domain, SuspiciousKind, BASIC_PATTERN, DANGEROUS_SUBSTRINGS, MAX_DOMAIN_LENGTH,
    MAX_LENGTH, MAX_LOCAL_LENGTH, MIN_LENGTH, RFC5322_PATTERN, RISK_DISPOSABLE,
    RISK_PER_SUSPICIOUS, RISK_SHORT_LOCAL, RISK_SPECIAL_HEAVY_LOCAL, SUSPICIOUS_PATTERNS,
};
use crate::security::{CaseFold, PatternScanner};
use crate::{log_cache, log_rule, perf_debug};

const DANGEROUS: PatternScanner = PatternScanner::new(DANGEROUS_SUBSTRINGS, CaseFold::Lower);

/// Validates email addresses and memoizes full-pipeline results.
///
/// The pipeline stops at the first failing structural stage (empty, length,
/// format, split). Once the address is well formed, the disposable-domain,
/// dangerous-pattern and suspicious-shape stages all run and their findings
/// accumulate.
///
/// # Examples
///
/// ```rust
/// use auth_guard::core::{ErrorCode, ValidationOptions};
/// use auth_guard::validators::EmailValidator;
///
/// let validator = EmailValidator::new();
/// let result = validator.validate("abc@sub.mailinator.com", &ValidationOptions::default());
/// assert!(result.has_error(ErrorCode::EmailDisposableBlocked));
///
/// // Existing accounts may sign in with a disposable address
/// let login = validator.validate("abc@mailinator.com", &ValidationOptions::login());
/// assert!(login.is_valid());
/// ```
#[derive(Debug)]
pub struct EmailValidator {
    cache: Mutex<ExpiringCache<ValidationResult>>,
    log_config: LogConfig,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(ExpiringCache::new()),
            log_config: LogConfig::default(),
        }
    }

    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Replaces the result cache, e.g. with a shorter TTL.
    pub fn with_cache(mut self, cache: ExpiringCache<ValidationResult>) -> Self {
        self.cache = Mutex::new(cache);
        self
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).stats()
    }

    pub fn clear_cache(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Validates `email` against the email policy in `options`.
    #[instrument(skip_all, fields(field = "email"))]
    pub fn validate(&self, email: &str, options: &ValidationOptions) -> ValidationResult {
        let start = Instant::now();
        let submitted = email.trim();
        let normalized = submitted.to_lowercase();
        let key = format!("{normalized}|{}", options.fingerprint());

        let cached = self
            .cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key);

        let mut result = match cached {
            Some(mut hit) => {
                log_cache!(self.log_config, cache = "email", "Cache hit");
                // The key is case-insensitive; echo this call's casing.
                if let Some(ValidationMetadata::Email(metrics)) = hit.metadata_mut() {
                    metrics.submitted_value = submitted.to_string();
                }
                hit
            }
            None => {
                log_cache!(self.log_config, cache = "email", "Cache miss");
                let (result, complete) = self.run(submitted, &normalized, options);
                if complete {
                    self.cache
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .insert(key, result.clone());
                }
                result
            }
        };
        result.set_timing_ms(start.elapsed().as_secs_f64() * 1000.0);

        perf_debug!(
            self.log_config,
            value = %self.log_config.field_value(submitted),
            is_valid = result.is_valid(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            timing_ms = result.timing_ms(),
            "Email validated"
        );
        result
    }

    /// Runs the pipeline. The flag is true when every stage ran.
    fn run(
        &self,
        submitted: &str,
        normalized: &str,
        options: &ValidationOptions,
    ) -> (ValidationResult, bool) {
        let locale = options.locale();
        let policy = options.email();
        let error = |code, severity| FieldError::new(code, Field::Email, severity, locale);
        let early_metadata = || {
            Some(ValidationMetadata::Email(EmailMetrics {
                domain: None,
                is_disposable: false,
                risk_score: 0,
                submitted_value: submitted.to_string(),
            }))
        };

        if normalized.is_empty() {
            let result = ValidationResult::from_parts(
                vec![error(ErrorCode::EmailFieldEmpty, Severity::Critical)],
                vec![],
                None,
            );
            return (result, false);
        }

        if let Some(length_error) = length_error(normalized) {
            log_rule!(self.log_config, rule = ?length_error.code, "Email rule fired");
            let mut e = error(length_error.code, Severity::Major);
            if let Some(rule) = length_error.rule {
                e = e.with_details(ErrorDetails::rule(rule));
            }
            return (
                ValidationResult::from_parts(vec![e], vec![], early_metadata()),
                false,
            );
        }

        let pattern = match policy.format {
            EmailFormat::Rfc5322 => &*RFC5322_PATTERN,
            EmailFormat::Basic => &*BASIC_PATTERN,
        };
        if !pattern.is_match(normalized) {
            log_rule!(self.log_config, rule = "format", "Email rule fired");
            let e = error(ErrorCode::EmailFormatInvalid, Severity::Major)
                .with_details(ErrorDetails::default().with_expected_format("user@domain.com"));
            return (
                ValidationResult::from_parts(vec![e], vec![], early_metadata()),
                false,
            );
        }

        let Some((local, domain)) = split_address(normalized) else {
            let e = error(ErrorCode::EmailFormatInvalid, Severity::Major)
                .with_details(ErrorDetails::rule("exactly_one_at"));
            return (
                ValidationResult::from_parts(vec![e], vec![], early_metadata()),
                false,
            );
        };

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let is_disposable = is_disposable_domain(domain);

        if policy.block_disposable && is_disposable {
            log_rule!(self.log_config, rule = "disposable", domain, "Email rule fired");
            errors.push(
                error(ErrorCode::EmailDisposableBlocked, Severity::Major)
                    .with_details(ErrorDetails::rejected(domain)),
            );
        }

        if let Some(fragment) = DANGEROUS.first_match(normalized) {
            log_rule!(self.log_config, rule = "dangerous", "Email rule fired");
            errors.push(
                error(ErrorCode::EmailDangerousPattern, Severity::Critical)
                    .with_details(ErrorDetails::rule(format!("contains '{}'", fragment.escape_debug()))),
            );
        }

        let mut suspicious_hits = 0u32;
        for (kind, regex) in SUSPICIOUS_PATTERNS.iter() {
            if !regex.is_match(normalized) {
                continue;
            }
            suspicious_hits += 1;
            let code = match kind {
                SuspiciousKind::ConsecutiveDots => WarningCode::ConsecutiveDots,
                SuspiciousKind::DotPosition => WarningCode::DotPosition,
                SuspiciousKind::ExcessiveSpecialChars => WarningCode::ExcessiveSpecialChars,
                SuspiciousKind::NumericOnlyLocal => WarningCode::NumericOnlyLocal,
                SuspiciousKind::ExcessiveSubdomains => continue,
            };
            let risk = match kind {
                SuspiciousKind::ExcessiveSpecialChars => RiskLevel::Medium,
                _ => RiskLevel::Low,
            };
            warnings.push(FieldWarning::new(code, risk, locale));
        }

        if !policy.allow_plus_addressing && local.contains('+') {
            warnings.push(FieldWarning::new(
                WarningCode::PlusAddressing,
                RiskLevel::Low,
                locale,
            ));
        }

        let metrics = EmailMetrics {
            domain: Some(domain.to_string()),
            is_disposable,
            risk_score: risk_score(local, is_disposable, suspicious_hits),
            submitted_value: submitted.to_string(),
        };

        (
            ValidationResult::from_parts(
                errors,
                warnings,
                Some(ValidationMetadata::Email(metrics)),
            ),
            true,
        )
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

struct LengthError {
    code: ErrorCode,
    rule: Option<&'static str>,
}

fn length_error(email: &str) -> Option<LengthError> {
    let length = email.chars().count();
    if length < MIN_LENGTH {
        return Some(LengthError {
            code: ErrorCode::EmailTooShort,
            rule: None,
        });
    }
    if length > MAX_LENGTH {
        return Some(LengthError {
            code: ErrorCode::EmailTooLong,
            rule: None,
        });
    }
    let (local, domain) = email.split_once('@')?;
    if local.chars().count() > MAX_LOCAL_LENGTH {
        return Some(LengthError {
            code: ErrorCode::EmailFormatInvalid,
            rule: Some("local_part_max=64"),
        });
    }
    if domain.chars().count() > MAX_DOMAIN_LENGTH {
        return Some(LengthError {
            code: ErrorCode::EmailFormatInvalid,
            rule: Some("domain_max=253"),
        });
    }
    None
}

/// Splits into local part and domain; fails unless there is exactly one `@`.
fn split_address(email: &str) -> Option<(&str, &str)> {
    let (local, domain) = email.split_once('@')?;
    if domain.contains('@') {
        return None;
    }
    Some((local, domain))
}

fn risk_score(local: &str, is_disposable: bool, suspicious_hits: u32) -> u8 {
    let mut score = suspicious_hits * RISK_PER_SUSPICIOUS;
    if is_disposable {
        score += RISK_DISPOSABLE;
    }
    if local.chars().count() < 3 {
        score += RISK_SHORT_LOCAL;
    }
    if local.chars().filter(|c| !c.is_ascii_alphanumeric()).count() > 3 {
        score += RISK_SPECIAL_HEAVY_LOCAL;
    }
    score.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(email: &str) -> ValidationResult {
        EmailValidator::new().validate(email, &ValidationOptions::default())
    }

    fn email_metrics(result: &ValidationResult) -> EmailMetrics {
        result
            .metadata()
            .and_then(ValidationMetadata::as_email)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_length_stage_short_circuits() {
        let result = validate("a@");
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code, ErrorCode::EmailTooShort);

        let long_local = format!("{}@example.com", "a".repeat(65));
        let result = validate(&long_local);
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code, ErrorCode::EmailFormatInvalid);
        assert_eq!(
            result.errors()[0]
                .details
                .as_ref()
                .and_then(|d| d.violated_rule.as_deref()),
            Some("local_part_max=64")
        );
    }

    #[test]
    fn test_dangerous_pattern_reports_first_only() {
        let result = validate("a|b&c@example.com");
        let dangerous: Vec<_> = result
            .errors()
            .iter()
            .filter(|e| e.code == ErrorCode::EmailDangerousPattern)
            .collect();
        assert_eq!(dangerous.len(), 1);
        assert_eq!(dangerous[0].severity, Severity::Critical);
    }

    #[test]
    fn test_disposable_keeps_scanning() {
        let result = validate("12345@yopmail.com");
        assert!(result.has_error(ErrorCode::EmailDisposableBlocked));
        assert!(result.has_warning(WarningCode::NumericOnlyLocal));

        let metrics = email_metrics(&result);
        assert!(metrics.is_disposable);
        // 30 disposable + 10 numeric-only local
        assert_eq!(metrics.risk_score, 40);
    }

    #[test]
    fn test_risk_score_components() {
        assert_eq!(risk_score("ab", false, 0), 15);
        assert_eq!(risk_score("a.b.c.d.e", false, 0), 10);
        assert_eq!(risk_score("ab", true, 10), 100);
    }

    #[test]
    fn test_plus_addressing_warning_is_opt_in() {
        let options = ValidationOptions::builder()
            .allow_plus_addressing(false)
            .build()
            .unwrap();
        let validator = EmailValidator::new();
        let result = validator.validate("jane+news@example.com", &options);
        assert!(result.is_valid());
        assert!(result.has_warning(WarningCode::PlusAddressing));

        let result = validator.validate("jane+news@example.com", &ValidationOptions::default());
        assert!(!result.has_warning(WarningCode::PlusAddressing));
    }

    #[test]
    fn test_excessive_subdomains_only_scores() {
        let result = validate("jane@a.b.c.d.example.com");
        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
        assert_eq!(email_metrics(&result).risk_score, 10);
    }

    #[test]
    fn test_cache_hit_echoes_current_casing() {
        let validator = EmailValidator::new();
        let options = ValidationOptions::default();

        let first = validator.validate("Jane.Doe@Example.com", &options);
        let second = validator.validate("jane.doe@EXAMPLE.com", &options);

        assert_eq!(first.errors(), second.errors());
        assert_eq!(email_metrics(&second).submitted_value, "jane.doe@EXAMPLE.com");
        assert_eq!(validator.cache_stats().hits, 1);
    }

    #[test]
    fn test_options_are_part_of_cache_key() {
        let validator = EmailValidator::new();
        let strict = validator.validate("x@tempmail.com", &ValidationOptions::default());
        let lenient = validator.validate("x@tempmail.com", &ValidationOptions::login());
        assert!(!strict.is_valid());
        assert!(lenient.is_valid());
        assert_eq!(validator.cache_stats().total_entries, 2);
    }
}
