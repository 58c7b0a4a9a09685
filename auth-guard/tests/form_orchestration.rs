//! Integration tests for whole-form validation and the availability seam.

use async_trait::async_trait;
use auth_guard::core::{ErrorCode, Locale, UserContext, ValidationOptions};
use auth_guard::forms::{
    check_email_availability, EmailAvailability, FormSlot, FormValidator, InMemoryAvailability,
    PasswordChangeInput, RegistrationInput,
};
use auth_guard::{GuardError, Result};

fn registration<'a>(email: &'a str, password: &'a str, confirm: &'a str) -> RegistrationInput<'a> {
    RegistrationInput {
        email,
        password,
        confirm_password: confirm,
        name: "Jane Doe",
    }
}

#[test]
fn test_registration_passes_context_to_password() {
    let forms = FormValidator::new();
    let report = forms.validate_registration_form(
        registration("janedoe@example.com", "Janedoe#2024x", "Janedoe#2024x"),
        &ValidationOptions::default(),
    );
    assert!(!report.is_submittable());
    assert_eq!(report.invalid_slots(), vec![FormSlot::Password]);
    assert!(report
        .field(FormSlot::Password)
        .unwrap()
        .has_error(ErrorCode::PasswordPersonalInfoIncluded));
}

#[test]
fn test_registration_confirmation_mismatch() {
    let forms = FormValidator::new();
    let report = forms.validate_registration_form(
        registration("jane@example.com", "Secure@789Key", "Secure@789Kez"),
        &ValidationOptions::default(),
    );
    assert_eq!(report.invalid_slots(), vec![FormSlot::ConfirmPassword]);
    assert!(report
        .field(FormSlot::ConfirmPassword)
        .unwrap()
        .has_error(ErrorCode::PasswordMismatch));
}

#[test]
fn test_warnings_do_not_block_submission() {
    let forms = FormValidator::new();
    let report = forms.validate_registration_form(
        RegistrationInput {
            email: "jane@example.com",
            password: "Password123!",
            confirm_password: "Password123!",
            name: "김민수 Kim",
        },
        &ValidationOptions::default(),
    );
    assert!(report.is_submittable());
    assert!(!report.field(FormSlot::Name).unwrap().warnings().is_empty());
}

#[test]
fn test_password_change_rejects_reuse() {
    let forms = FormValidator::new();
    let report = forms.validate_password_change_form(
        PasswordChangeInput {
            current_password: "Secure@789Key",
            new_password: "Secure@789Key",
            confirm_password: "Secure@789Key",
        },
        None,
        &ValidationOptions::default(),
    );
    assert_eq!(report.invalid_slots(), vec![FormSlot::NewPassword]);
    assert!(report
        .field(FormSlot::NewPassword)
        .unwrap()
        .has_error(ErrorCode::PasswordSameAsCurrent));
}

#[test]
fn test_password_change_requires_every_field() {
    let forms = FormValidator::new();
    let context = UserContext::new().with_display_name("Jane Doe");
    let report = forms.validate_password_change_form(
        PasswordChangeInput::default(),
        Some(&context),
        &ValidationOptions::default(),
    );
    assert_eq!(
        report.invalid_slots(),
        vec![
            FormSlot::CurrentPassword,
            FormSlot::NewPassword,
            FormSlot::ConfirmPassword
        ]
    );
    assert!(report
        .field(FormSlot::CurrentPassword)
        .unwrap()
        .has_error(ErrorCode::CurrentPasswordRequired));
    assert!(report
        .field(FormSlot::ConfirmPassword)
        .unwrap()
        .has_error(ErrorCode::ConfirmPasswordRequired));
}

#[tokio::test]
async fn test_registered_email_is_reported() {
    let backend = InMemoryAvailability::new(["Taken@Example.com"]);
    let forms = FormValidator::new();
    let options = ValidationOptions::default();

    let mut result = forms.email_validator().validate("taken@example.com", &options);
    let consulted = check_email_availability(&mut result, "taken@example.com", &backend, Locale::Ko)
        .await
        .unwrap();
    assert!(consulted);
    assert!(!result.is_valid());
    assert!(result.has_error(ErrorCode::EmailAlreadyExists));

    let mut fresh = forms.email_validator().validate("new@example.com", &options);
    check_email_availability(&mut fresh, "new@example.com", &backend, Locale::Ko)
        .await
        .unwrap();
    assert!(fresh.is_valid());
}

#[tokio::test]
async fn test_invalid_email_skips_backend() {
    struct Unreachable;

    #[async_trait]
    impl EmailAvailability for Unreachable {
        async fn is_registered(&self, _email: &str) -> Result<bool> {
            panic!("backend must not be called for an invalid email");
        }
    }

    let mut result = FormValidator::new()
        .email_validator()
        .validate("user@tempmail.com", &ValidationOptions::default());
    let consulted = check_email_availability(&mut result, "user@tempmail.com", &Unreachable, Locale::En)
        .await
        .unwrap();
    assert!(!consulted);
    assert!(!result.has_error(ErrorCode::EmailAlreadyExists));
}

#[tokio::test]
async fn test_backend_failure_propagates() {
    struct Failing;

    #[async_trait]
    impl EmailAvailability for Failing {
        async fn is_registered(&self, _email: &str) -> Result<bool> {
            Err(GuardError::availability("service unavailable"))
        }
    }

    let mut result = FormValidator::new()
        .email_validator()
        .validate("jane@example.com", &ValidationOptions::default());
    let before = result.clone();
    let err = check_email_availability(&mut result, "jane@example.com", &Failing, Locale::En)
        .await
        .unwrap_err();
    assert!(matches!(err, GuardError::AvailabilityCheck { .. }));
    assert_eq!(result, before);
}
