//! Whole-form validation.
//!
//! Composes the field validators into the three credential forms and folds
//! the per-field results into one submittable verdict. A form is submittable
//! only when every field result is valid; warnings never block.
//!
//! Duplicate-email detection needs the network, so it is not part of
//! [`FormValidator::validate_registration_form`]. Callers run
//! [`check_email_availability`] as a separate async step once the email is
//! well formed and merge its outcome into the same result.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::{
    ErrorCode, Field, FieldError, Locale, Severity, UserContext, ValidationOptions,
    ValidationResult,
};
use crate::error::Result;
use crate::validators::{EmailValidator, NameValidator, PasswordValidator};

/// Input slot a [`FieldReport`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormSlot {
    Email,
    /// Login identifier: an email or a plain username
    Username,
    Password,
    ConfirmPassword,
    Name,
    CurrentPassword,
    NewPassword,
}

impl FormSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormSlot::Email => "email",
            FormSlot::Username => "username",
            FormSlot::Password => "password",
            FormSlot::ConfirmPassword => "confirm_password",
            FormSlot::Name => "name",
            FormSlot::CurrentPassword => "current_password",
            FormSlot::NewPassword => "new_password",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub slot: FormSlot,
    pub result: ValidationResult,
}

/// Per-field results of one form, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormReport {
    fields: Vec<FieldReport>,
    is_submittable: bool,
}

impl FormReport {
    pub fn new(fields: Vec<FieldReport>) -> Self {
        let is_submittable = fields.iter().all(|f| f.result.is_valid());
        Self {
            fields,
            is_submittable,
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.is_submittable
    }

    pub fn fields(&self) -> &[FieldReport] {
        &self.fields
    }

    /// Returns the result for `slot`, if the form has that slot.
    pub fn field(&self, slot: FormSlot) -> Option<&ValidationResult> {
        self.fields
            .iter()
            .find(|f| f.slot == slot)
            .map(|f| &f.result)
    }

    /// Slots whose results are invalid, in display order.
    pub fn invalid_slots(&self) -> Vec<FormSlot> {
        self.fields
            .iter()
            .filter(|f| !f.result.is_valid())
            .map(|f| f.slot)
            .collect()
    }

    /// Total number of errors across every field.
    pub fn error_count(&self) -> usize {
        self.fields.iter().map(|f| f.result.errors().len()).sum()
    }

    /// Formats the report as JSON.
    pub fn to_json(&self) -> Result<String> {
        use crate::formatters::{JsonFormatter, ResultFormatter};
        JsonFormatter::new().format_form(self)
    }
}

/// Fields of a registration form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationInput<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub name: &'a str,
}

/// Fields of a password-change form.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordChangeInput<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
    pub confirm_password: &'a str,
}

/// Owns one instance of each field validator, so their caches are shared
/// across every form this value checks.
///
/// # Examples
///
/// ```rust
/// use auth_guard::core::ValidationOptions;
/// use auth_guard::forms::{FormSlot, FormValidator, RegistrationInput};
///
/// let forms = FormValidator::new();
/// let report = forms.validate_registration_form(
///     RegistrationInput {
///         email: "jane.doe@example.com",
///         password: "Secure@789Key",
///         confirm_password: "Secure@789Key",
///         name: "Jane Doe",
///     },
///     &ValidationOptions::default(),
/// );
/// assert!(report.is_submittable());
/// assert!(report.field(FormSlot::Email).unwrap().is_valid());
/// ```
#[derive(Debug, Default)]
pub struct FormValidator {
    email: EmailValidator,
    password: PasswordValidator,
    name: NameValidator,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_validators(
        email: EmailValidator,
        password: PasswordValidator,
        name: NameValidator,
    ) -> Self {
        Self {
            email,
            password,
            name,
        }
    }

    pub fn email_validator(&self) -> &EmailValidator {
        &self.email
    }

    pub fn password_validator(&self) -> &PasswordValidator {
        &self.password
    }

    pub fn name_validator(&self) -> &NameValidator {
        &self.name
    }

    /// Validates a sign-up form. The email and name feed the password's
    /// personal-information check.
    #[instrument(skip_all, fields(form = "registration"))]
    pub fn validate_registration_form(
        &self,
        input: RegistrationInput<'_>,
        options: &ValidationOptions,
    ) -> FormReport {
        let context = UserContext::new()
            .with_email(input.email)
            .with_display_name(input.name);

        let report = FormReport::new(vec![
            FieldReport {
                slot: FormSlot::Email,
                result: self.email.validate(input.email, options),
            },
            FieldReport {
                slot: FormSlot::Password,
                result: self.password.validate(input.password, Some(&context), options),
            },
            FieldReport {
                slot: FormSlot::ConfirmPassword,
                result: confirmation(input.password, input.confirm_password, options.locale()),
            },
            FieldReport {
                slot: FormSlot::Name,
                result: self.name.validate(input.name, options),
            },
        ]);
        debug!(submittable = report.is_submittable(), "Registration form validated");
        report
    }

    /// Validates a sign-in form.
    ///
    /// Only presence is checked for the password. A username containing `@`
    /// is checked as an email with disposable domains allowed and the basic
    /// format, since the account already exists.
    #[instrument(skip_all, fields(form = "login"))]
    pub fn validate_login_form(
        &self,
        username: &str,
        password: &str,
        options: &ValidationOptions,
    ) -> FormReport {
        let locale = options.locale();

        let username_result = if username.is_empty() {
            required(ErrorCode::UsernameRequired, Field::Email, Severity::Critical, locale)
        } else if username.contains('@') {
            self.email
                .validate(username, &ValidationOptions::login().with_locale(locale))
        } else {
            ValidationResult::new()
        };

        let password_result = if password.is_empty() {
            required(ErrorCode::PasswordRequired, Field::Password, Severity::Critical, locale)
        } else {
            ValidationResult::new()
        };

        let report = FormReport::new(vec![
            FieldReport {
                slot: FormSlot::Username,
                result: username_result,
            },
            FieldReport {
                slot: FormSlot::Password,
                result: password_result,
            },
        ]);
        debug!(submittable = report.is_submittable(), "Login form validated");
        report
    }

    /// Validates a password-change form.
    ///
    /// The new password is checked with the full password policy against
    /// `context` plus the fingerprint of the current password, so reusing it
    /// yields `PASSWORD_SAME_AS_CURRENT`.
    #[instrument(skip_all, fields(form = "password_change"))]
    pub fn validate_password_change_form(
        &self,
        input: PasswordChangeInput<'_>,
        context: Option<&UserContext>,
        options: &ValidationOptions,
    ) -> FormReport {
        let locale = options.locale();

        let current_result = if input.current_password.is_empty() {
            required(
                ErrorCode::CurrentPasswordRequired,
                Field::Password,
                Severity::Critical,
                locale,
            )
        } else {
            ValidationResult::new()
        };

        let mut context = context.cloned().unwrap_or_default();
        if !input.current_password.is_empty() {
            context = context.with_current_password(input.current_password);
        }
        let new_result = self
            .password
            .validate(input.new_password, Some(&context), options);

        let report = FormReport::new(vec![
            FieldReport {
                slot: FormSlot::CurrentPassword,
                result: current_result,
            },
            FieldReport {
                slot: FormSlot::NewPassword,
                result: new_result,
            },
            FieldReport {
                slot: FormSlot::ConfirmPassword,
                result: confirmation(input.new_password, input.confirm_password, locale),
            },
        ]);
        debug!(submittable = report.is_submittable(), "Password change form validated");
        report
    }
}

fn required(code: ErrorCode, field: Field, severity: Severity, locale: Locale) -> ValidationResult {
    ValidationResult::from_parts(vec![FieldError::new(code, field, severity, locale)], vec![], None)
}

fn confirmation(password: &str, confirm: &str, locale: Locale) -> ValidationResult {
    if confirm.is_empty() {
        required(ErrorCode::ConfirmPasswordRequired, Field::Password, Severity::Major, locale)
    } else if password != confirm {
        required(ErrorCode::PasswordMismatch, Field::Password, Severity::Major, locale)
    } else {
        ValidationResult::new()
    }
}

/// Backend lookup for already-registered emails.
///
/// # Example
///
/// ```rust,ignore
/// struct ApiAvailability { client: ApiClient }
///
/// #[async_trait]
/// impl EmailAvailability for ApiAvailability {
///     async fn is_registered(&self, email: &str) -> Result<bool> {
///         self.client
///             .email_exists(email)
///             .await
///             .map_err(|e| GuardError::availability_with_source("lookup failed", Box::new(e)))
///     }
/// }
/// ```
#[async_trait]
pub trait EmailAvailability: Send + Sync {
    /// Returns true if an account already uses `email` (normalized: trimmed
    /// and lowercased).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not answer.
    async fn is_registered(&self, email: &str) -> Result<bool>;
}

/// Fixed set of registered emails, compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailability {
    registered: HashSet<String>,
}

impl InMemoryAvailability {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            registered: emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .collect(),
        }
    }
}

#[async_trait]
impl EmailAvailability for InMemoryAvailability {
    async fn is_registered(&self, email: &str) -> Result<bool> {
        Ok(self.registered.contains(email))
    }
}

/// Merges a duplicate-email lookup into an email result.
///
/// The backend is consulted only when `result` is valid. A registered email
/// appends `EMAIL_ALREADY_EXISTS` (major). Returns whether the backend was
/// consulted.
///
/// # Errors
///
/// Propagates the backend's failure; `result` is left untouched.
#[instrument(skip_all, fields(field = "email"))]
pub async fn check_email_availability(
    result: &mut ValidationResult,
    email: &str,
    backend: &dyn EmailAvailability,
    locale: Locale,
) -> Result<bool> {
    if !result.is_valid() {
        return Ok(false);
    }

    let normalized = email.trim().to_lowercase();
    let registered = backend.is_registered(&normalized).await?;

    if registered {
        result.push_error(FieldError::new(
            ErrorCode::EmailAlreadyExists,
            Field::Email,
            Severity::Major,
            locale,
        ));
    }
    debug!(registered, "Email availability checked");
    Ok(true)
}
