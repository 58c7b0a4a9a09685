//! Integration tests for the password validator.

use auth_guard::core::{
    CrackTime, ErrorCode, ImprovementTip, Locale, Severity, StrengthTier, UserContext,
    ValidationMetadata, ValidationOptions, ValidationResult, WarningCode,
};
use auth_guard::validators::PasswordValidator;

fn validate(password: &str) -> ValidationResult {
    PasswordValidator::new().validate(password, None, &ValidationOptions::default())
}

fn strength(result: &ValidationResult) -> StrengthTier {
    result
        .metadata()
        .and_then(ValidationMetadata::as_password)
        .map(|m| m.strength)
        .unwrap()
}

#[test]
fn test_common_password_is_critical() {
    let result = validate("password");
    assert!(!result.is_valid());
    let common = result
        .errors()
        .iter()
        .find(|e| e.code == ErrorCode::PasswordCommonPassword)
        .unwrap();
    assert_eq!(common.severity, Severity::Critical);
}

#[test]
fn test_decorated_common_password_passes() {
    let result = validate("Password123!");
    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert!(result.errors().is_empty());
    assert!(strength(&result) >= StrengthTier::Moderate);
    assert!(result.has_warning(WarningCode::CommonBaseWord));
}

#[test]
fn test_sequential_pattern() {
    let result = validate("abcd1234");
    assert!(!result.is_valid());
    let sequential = result
        .errors()
        .iter()
        .find(|e| e.code == ErrorCode::PasswordSequentialPattern)
        .unwrap();
    assert_eq!(sequential.severity, Severity::Major);
}

#[test]
fn test_repeated_pattern() {
    let result = validate("aaa111!!");
    assert!(!result.is_valid());
    assert!(result.has_error(ErrorCode::PasswordRepeatedPattern));
}

fn warning_codes(result: &ValidationResult) -> Vec<WarningCode> {
    result.warnings().iter().map(|w| w.code).collect()
}

#[test]
fn test_keyboard_run_only_warns() {
    let result = validate("Qwer#7Zx9mLp2");
    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert_eq!(warning_codes(&result), vec![WarningCode::KeyboardPattern]);
}

#[test]
fn test_below_recommended_length_only_warns() {
    let result = validate("Xk9#mQ2$vB");
    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert_eq!(warning_codes(&result), vec![WarningCode::ShortPassword]);
    let metrics = result
        .metadata()
        .and_then(ValidationMetadata::as_password)
        .unwrap();
    assert_eq!(metrics.improvement_tips, vec![ImprovementTip::AddLength]);
}

#[test]
fn test_entropy_between_minimum_and_weak_threshold_warns() {
    // 8 chars over a 72-symbol alphabet scores about 37 bits
    let result = validate("Xk9#mQ2$");
    assert!(result.is_valid(), "errors: {:?}", result.errors());
    assert_eq!(
        warning_codes(&result),
        vec![WarningCode::ShortPassword, WarningCode::LowEntropy]
    );
}

#[test]
fn test_personal_info_from_email() {
    let context = UserContext::new().with_email("john@x.com");
    let result = PasswordValidator::new().validate(
        "john123!@#",
        Some(&context),
        &ValidationOptions::default(),
    );
    assert!(!result.is_valid());
    assert!(result.has_error(ErrorCode::PasswordPersonalInfoIncluded));
}

#[test]
fn test_personal_info_check_can_be_disabled() {
    let context = UserContext::new().with_email("john@x.com");
    let options = ValidationOptions::builder()
        .check_personal_info(false)
        .build()
        .unwrap();
    let result = PasswordValidator::new().validate("john123!@#", Some(&context), &options);
    assert!(!result.has_error(ErrorCode::PasswordPersonalInfoIncluded));
}

#[test]
fn test_errors_accumulate_in_evaluation_order() {
    let result = validate("ab cd");
    let codes: Vec<_> = result.errors().iter().map(|e| e.code).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::PasswordTooShort,
            ErrorCode::PasswordContainsSpace,
            ErrorCode::PasswordCharTypesInsufficient,
            ErrorCode::PasswordEntropyTooLow,
        ]
    );
    assert_eq!(
        result.primary_error().map(|e| e.code),
        Some(ErrorCode::PasswordEntropyTooLow)
    );
}

#[test]
fn test_too_long() {
    let long = "Ab1!xY9@".repeat(17);
    let result = validate(&long);
    assert!(result.has_error(ErrorCode::PasswordTooLong));
}

#[test]
fn test_same_as_current_password() {
    let context = UserContext::new().with_current_password("Secure@789Key");
    let result = PasswordValidator::new().validate(
        "Secure@789Key",
        Some(&context),
        &ValidationOptions::default(),
    );
    assert_eq!(
        result.errors().iter().map(|e| e.code).collect::<Vec<_>>(),
        vec![ErrorCode::PasswordSameAsCurrent]
    );
}

#[test]
fn test_strong_password_metadata() {
    let result = validate("Secure@789Key");
    assert!(result.is_valid());
    let metrics = result
        .metadata()
        .and_then(ValidationMetadata::as_password)
        .unwrap();
    assert_eq!(metrics.strength, StrengthTier::VeryStrong);
    assert_eq!(metrics.crack_time, CrackTime::Years);
    assert_eq!(metrics.character_set_diversity, 4);
    assert!(metrics.improvement_tips.is_empty());
}

#[test]
fn test_messages_follow_locale() {
    let validator = PasswordValidator::new();
    let ko = validator.validate("", None, &ValidationOptions::default());
    let en = validator.validate("", None, &ValidationOptions::default().with_locale(Locale::En));
    assert_eq!(ko.errors()[0].code, en.errors()[0].code);
    assert_ne!(ko.errors()[0].message, en.errors()[0].message);
}

#[test]
fn test_validator_is_shareable_across_threads() {
    use std::sync::Arc;

    let validator = Arc::new(PasswordValidator::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let validator = Arc::clone(&validator);
            std::thread::spawn(move || {
                validator
                    .validate("Secure@789Key", None, &ValidationOptions::default())
                    .is_valid()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(validator.cache_stats().total_entries, 1);
}
