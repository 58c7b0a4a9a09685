//! Integration tests for the email validator.

use auth_guard::core::{
    EmailFormat, ErrorCode, Severity, ValidationMetadata, ValidationOptions, ValidationResult,
    WarningCode,
};
use auth_guard::validators::EmailValidator;

fn validate(email: &str) -> ValidationResult {
    EmailValidator::new().validate(email, &ValidationOptions::default())
}

#[test]
fn test_disposable_domain_is_major() {
    let result = validate("user@tempmail.com");
    assert!(!result.is_valid());
    let disposable = result
        .errors()
        .iter()
        .find(|e| e.code == ErrorCode::EmailDisposableBlocked)
        .unwrap();
    assert_eq!(disposable.severity, Severity::Major);
    assert_eq!(
        disposable
            .details
            .as_ref()
            .and_then(|d| d.rejected_value.as_deref()),
        Some("tempmail.com")
    );
}

#[test]
fn test_disposable_matching_covers_subdomains() {
    let direct = validate("abc@mailinator.com");
    let nested = validate("abc@sub.mailinator.com");
    let codes = |r: &ValidationResult| r.errors().iter().map(|e| e.code).collect::<Vec<_>>();
    assert_eq!(codes(&direct), vec![ErrorCode::EmailDisposableBlocked]);
    assert_eq!(codes(&direct), codes(&nested));
}

#[test]
fn test_original_casing_is_echoed() {
    let result = validate("  Test.User+promo@GMAIL.com ");
    assert!(result.is_valid());
    let metrics = result
        .metadata()
        .and_then(ValidationMetadata::as_email)
        .unwrap();
    assert_eq!(metrics.submitted_value, "Test.User+promo@GMAIL.com");
    assert_eq!(metrics.domain.as_deref(), Some("gmail.com"));
    assert!(!metrics.is_disposable);
}

#[test]
fn test_empty_email_stops_early() {
    let result = validate("   ");
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].code, ErrorCode::EmailFieldEmpty);
    assert_eq!(result.errors()[0].severity, Severity::Critical);
    assert!(result.warnings().is_empty());
    assert!(result.metadata().is_none());
}

#[test]
fn test_format_failures() {
    for email in ["plainaddress", "a@b@c.com", "jane@", "@example.com", "jane@exa mple.com"] {
        let result = validate(email);
        assert_eq!(
            result.errors().iter().map(|e| e.code).collect::<Vec<_>>(),
            vec![ErrorCode::EmailFormatInvalid],
            "{email}"
        );
    }
}

#[test]
fn test_too_long() {
    let email = format!("{}@{}.com", "a".repeat(60), "b".repeat(200));
    let result = validate(&email);
    assert_eq!(result.errors()[0].code, ErrorCode::EmailTooLong);
}

#[test]
fn test_basic_format_rejects_bare_host() {
    let options = ValidationOptions::builder()
        .email_format(EmailFormat::Basic)
        .build()
        .unwrap();
    let validator = EmailValidator::new();
    assert!(validator.validate("jane@localhost", &ValidationOptions::default()).is_valid());
    assert!(validator
        .validate("jane@localhost", &options)
        .has_error(ErrorCode::EmailFormatInvalid));
}

#[test]
fn test_suspicious_shapes_warn_without_blocking() {
    let result = validate("jane..doe@example.com");
    assert!(result.is_valid());
    assert!(result.has_warning(WarningCode::ConsecutiveDots));

    let result = validate("jane.@example.com");
    assert!(result.has_warning(WarningCode::DotPosition));
}

#[test]
fn test_dangerous_and_disposable_both_reported() {
    let result = validate("a&b@yopmail.com");
    let codes: Vec<_> = result.errors().iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::EmailDisposableBlocked,
            ErrorCode::EmailDangerousPattern
        ]
    );
    assert_eq!(
        result.primary_error().map(|e| e.code),
        Some(ErrorCode::EmailDangerousPattern)
    );
}

#[test]
fn test_cache_only_holds_complete_runs() {
    let validator = EmailValidator::new();
    let options = ValidationOptions::default();
    validator.validate("", &options);
    validator.validate("not-an-email", &options);
    assert_eq!(validator.cache_stats().total_entries, 0);

    validator.validate("jane@example.com", &options);
    validator.validate("JANE@example.com", &options);
    let stats = validator.cache_stats();
    assert_eq!(stats.total_entries, 1);
    assert_eq!(stats.hits, 1);

    validator.clear_cache();
    assert_eq!(validator.cache_stats().total_entries, 0);
}
