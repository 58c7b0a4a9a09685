//! # auth-guard - Credential Input Validation for Rust
//!
//! auth-guard checks the three fields of a credential form (email, password
//! and display name) as the user types, and reaches the same accept/reject
//! decision the backend will reach, without a network round trip per
//! keystroke.
//!
//! ## Overview
//!
//! Every validator returns a [`ValidationResult`](core::ValidationResult):
//! an ordered list of severity-ranked errors, advisory warnings, and
//! validator-specific metadata such as a password's entropy or an email's
//! risk score. Rejections are values, never `Err`; [`GuardError`] is reserved
//! for caller mistakes such as contradictory options.
//!
//! ## Quick Start
//!
//! ```rust
//! use auth_guard::prelude::*;
//!
//! let options = ValidationOptions::default();
//!
//! let email = EmailValidator::new().validate("Test.User+promo@GMAIL.com", &options);
//! assert!(email.is_valid());
//!
//! let context = UserContext::new()
//!     .with_email("jane.doe@example.com")
//!     .with_display_name("Jane Doe");
//! let password = PasswordValidator::new().validate("Secure@789Key", Some(&context), &options);
//! assert!(password.is_valid());
//!
//! let name = NameValidator::new().validate("<script>alert(1)</script>", &options);
//! assert_eq!(
//!     name.primary_error().map(|e| e.code),
//!     Some(ErrorCode::NameHtmlTags)
//! );
//! ```
//!
//! ## Whole Forms
//!
//! [`forms::FormValidator`] composes the validators into registration, login
//! and password-change checks and reports one submittable verdict. The async
//! [`forms::check_email_availability`] merges a caller-supplied duplicate
//! lookup into an email result.
//!
//! ## Architecture
//!
//! - **`core`**: result, error and warning types, options, user context and
//!   the localized message table
//! - **`rules`**: rule tables (disposable domains, keyword lists, keyboard
//!   rows, the common-password corpus)
//! - **`validators`**: the email, password and name validators
//! - **`forms`**: form orchestration and the availability seam
//! - **`formatters`**: JSON and console renderings
//! - **`cache`**: the bounded expiring cache used by the validators
//! - **`logging`**: `tracing` configuration and subscriber setup

pub mod cache;
pub mod core;
pub mod error;
pub mod formatters;
pub mod forms;
pub mod logging;
pub mod prelude;
pub mod rules;
pub mod security;
pub mod validators;

pub use error::{GuardError, Result};
