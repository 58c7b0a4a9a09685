//! Stable identifiers for fields, errors, warnings and improvement tips.
//!
//! These codes are the contract with the UI and with the server's rule table;
//! their serialized form (`SCREAMING_SNAKE_CASE`) must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The credential field a result refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Password,
    Name,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::Name => "name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blocking error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Email
    EmailFieldEmpty,
    EmailTooShort,
    EmailTooLong,
    EmailFormatInvalid,
    EmailDisposableBlocked,
    EmailDangerousPattern,
    EmailAlreadyExists,
    UsernameRequired,

    // Password
    PasswordFieldEmpty,
    PasswordTooShort,
    PasswordTooLong,
    PasswordContainsSpace,
    PasswordCharTypesInsufficient,
    PasswordSequentialPattern,
    PasswordRepeatedPattern,
    PasswordRepeatedSequence,
    PasswordPersonalInfoIncluded,
    PasswordCommonPassword,
    PasswordEntropyTooLow,
    PasswordSameAsCurrent,
    PasswordRequired,
    CurrentPasswordRequired,
    ConfirmPasswordRequired,
    PasswordMismatch,

    // Name
    NameFieldEmpty,
    NameWhitespaceOnly,
    NameTooShort,
    NameTooLong,
    NameInvalidCharacters,
    NameHtmlTags,
    NameSqlKeywords,
    NameXssPattern,
    NamePathTraversal,
    NameControlChars,
    NameEmojiNotAllowed,
}

impl ErrorCode {
    /// Returns the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::EmailFieldEmpty => "EMAIL_FIELD_EMPTY",
            ErrorCode::EmailTooShort => "EMAIL_TOO_SHORT",
            ErrorCode::EmailTooLong => "EMAIL_TOO_LONG",
            ErrorCode::EmailFormatInvalid => "EMAIL_FORMAT_INVALID",
            ErrorCode::EmailDisposableBlocked => "EMAIL_DISPOSABLE_BLOCKED",
            ErrorCode::EmailDangerousPattern => "EMAIL_DANGEROUS_PATTERN",
            ErrorCode::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            ErrorCode::UsernameRequired => "USERNAME_REQUIRED",
            ErrorCode::PasswordFieldEmpty => "PASSWORD_FIELD_EMPTY",
            ErrorCode::PasswordTooShort => "PASSWORD_TOO_SHORT",
            ErrorCode::PasswordTooLong => "PASSWORD_TOO_LONG",
            ErrorCode::PasswordContainsSpace => "PASSWORD_CONTAINS_SPACE",
            ErrorCode::PasswordCharTypesInsufficient => "PASSWORD_CHAR_TYPES_INSUFFICIENT",
            ErrorCode::PasswordSequentialPattern => "PASSWORD_SEQUENTIAL_PATTERN",
            ErrorCode::PasswordRepeatedPattern => "PASSWORD_REPEATED_PATTERN",
            ErrorCode::PasswordRepeatedSequence => "PASSWORD_REPEATED_SEQUENCE",
            ErrorCode::PasswordPersonalInfoIncluded => "PASSWORD_PERSONAL_INFO_INCLUDED",
            ErrorCode::PasswordCommonPassword => "PASSWORD_COMMON_PASSWORD",
            ErrorCode::PasswordEntropyTooLow => "PASSWORD_ENTROPY_TOO_LOW",
            ErrorCode::PasswordSameAsCurrent => "PASSWORD_SAME_AS_CURRENT",
            ErrorCode::PasswordRequired => "PASSWORD_REQUIRED",
            ErrorCode::CurrentPasswordRequired => "CURRENT_PASSWORD_REQUIRED",
            ErrorCode::ConfirmPasswordRequired => "CONFIRM_PASSWORD_REQUIRED",
            ErrorCode::PasswordMismatch => "PASSWORD_MISMATCH",
            ErrorCode::NameFieldEmpty => "NAME_FIELD_EMPTY",
            ErrorCode::NameWhitespaceOnly => "NAME_WHITESPACE_ONLY",
            ErrorCode::NameTooShort => "NAME_TOO_SHORT",
            ErrorCode::NameTooLong => "NAME_TOO_LONG",
            ErrorCode::NameInvalidCharacters => "NAME_INVALID_CHARACTERS",
            ErrorCode::NameHtmlTags => "NAME_HTML_TAGS",
            ErrorCode::NameSqlKeywords => "NAME_SQL_KEYWORDS",
            ErrorCode::NameXssPattern => "NAME_XSS_PATTERN",
            ErrorCode::NamePathTraversal => "NAME_PATH_TRAVERSAL",
            ErrorCode::NameControlChars => "NAME_CONTROL_CHARS",
            ErrorCode::NameEmojiNotAllowed => "NAME_EMOJI_NOT_ALLOWED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-blocking warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    // Email
    ConsecutiveDots,
    DotPosition,
    ExcessiveSpecialChars,
    NumericOnlyLocal,
    PlusAddressing,

    // Password
    ShortPassword,
    KeyboardPattern,
    CommonBaseWord,
    LowEntropy,

    // Name
    MixedLanguages,
    HangulNameTooLong,
    SuspiciousPatterns,
}

impl WarningCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::ConsecutiveDots => "CONSECUTIVE_DOTS",
            WarningCode::DotPosition => "DOT_POSITION",
            WarningCode::ExcessiveSpecialChars => "EXCESSIVE_SPECIAL_CHARS",
            WarningCode::NumericOnlyLocal => "NUMERIC_ONLY_LOCAL",
            WarningCode::PlusAddressing => "PLUS_ADDRESSING",
            WarningCode::ShortPassword => "SHORT_PASSWORD",
            WarningCode::KeyboardPattern => "KEYBOARD_PATTERN",
            WarningCode::CommonBaseWord => "COMMON_BASE_WORD",
            WarningCode::LowEntropy => "LOW_ENTROPY",
            WarningCode::MixedLanguages => "MIXED_LANGUAGES",
            WarningCode::HangulNameTooLong => "HANGUL_NAME_TOO_LONG",
            WarningCode::SuspiciousPatterns => "SUSPICIOUS_PATTERNS",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Password improvement suggestions surfaced next to the strength meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImprovementTip {
    AddUppercase,
    AddSpecial,
    AddNumbers,
    AddLength,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_wire_format_matches_as_str() {
        for code in [
            ErrorCode::EmailDisposableBlocked,
            ErrorCode::PasswordCharTypesInsufficient,
            ErrorCode::NameSqlKeywords,
            ErrorCode::UsernameRequired,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_warning_code_wire_format_matches_as_str() {
        for code in [
            WarningCode::KeyboardPattern,
            WarningCode::HangulNameTooLong,
            WarningCode::PlusAddressing,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_field_serde() {
        assert_eq!(serde_json::to_string(&Field::Name).unwrap(), "\"name\"");
    }
}
