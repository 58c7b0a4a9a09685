//! Error severities and warning risk levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a [`FieldError`](super::FieldError).
///
/// Severities are ordered: `Critical > Major > Minor`.
///
/// - **Critical**: security or structural violations (injection patterns, an
///   empty required field, a common password, entropy below the server floor)
/// - **Major**: policy violations (length, character coverage, patterns,
///   personal-information leakage, disposable domains)
/// - **Minor**: advisory errors that a lenient form may choose to ignore
///   (emoji in a name when emojis are disallowed)
///
/// # Examples
///
/// ```rust
/// use auth_guard::core::Severity;
///
/// assert!(Severity::Critical > Severity::Major);
/// assert!(Severity::Major.is_at_least(Severity::Minor));
/// assert!(Severity::Major.blocks_submission());
/// assert!(!Severity::Minor.blocks_submission());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory; does not block submission on its own
    Minor = 0,
    /// Policy violation that should block submission
    Major = 1,
    /// Security or structural violation that must block submission
    Critical = 2,
}

impl Severity {
    /// Returns the string representation of the severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }

    /// Checks if this severity is at least as severe as another.
    pub fn is_at_least(&self, other: Severity) -> bool {
        *self >= other
    }

    /// Returns true for severities that should stop a form from submitting.
    pub fn blocks_submission(&self) -> bool {
        self.is_at_least(Severity::Major)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk attached to a non-blocking [`FieldWarning`](super::FieldWarning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Returns the string representation of the risk level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
