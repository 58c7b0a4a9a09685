//! Field validators.
//!
//! Each validator is a plain value: construct one per form (or share one
//! behind an `Arc`) and call `validate` on every keystroke. Caches live inside
//! the validator, so two instances never observe each other's entries.

pub mod email;
pub mod name;
pub mod password;

pub use email::EmailValidator;
pub use name::NameValidator;
pub use password::{describe_tips, PasswordValidator};
