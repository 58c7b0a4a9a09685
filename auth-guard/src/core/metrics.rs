//! Validator-specific metadata attached to a [`ValidationResult`](super::ValidationResult).

use super::codes::ImprovementTip;
use super::messages::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse password strength bucket used by strength meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthTier {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthTier::VeryWeak => "very_weak",
            StrengthTier::Weak => "weak",
            StrengthTier::Moderate => "moderate",
            StrengthTier::Strong => "strong",
            StrengthTier::VeryStrong => "very_strong",
        }
    }
}

impl fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated offline crack time, bucketed by entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrackTime {
    Instant,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
    PracticallyImpossible,
}

impl CrackTime {
    /// Returns the display label in the given locale.
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ko => match self {
                CrackTime::Instant => "즉시",
                CrackTime::Seconds => "몇 초",
                CrackTime::Minutes => "몇 분",
                CrackTime::Hours => "몇 시간",
                CrackTime::Days => "며칠",
                CrackTime::Weeks => "몇 주",
                CrackTime::Months => "몇 달",
                CrackTime::Years => "몇 년",
                CrackTime::Decades => "수십 년",
                CrackTime::Centuries => "수백 년",
                CrackTime::Millennia => "수천 년",
                CrackTime::PracticallyImpossible => "사실상 불가능",
            },
            Locale::En => match self {
                CrackTime::Instant => "instant",
                CrackTime::Seconds => "seconds",
                CrackTime::Minutes => "minutes",
                CrackTime::Hours => "hours",
                CrackTime::Days => "days",
                CrackTime::Weeks => "weeks",
                CrackTime::Months => "months",
                CrackTime::Years => "years",
                CrackTime::Decades => "decades",
                CrackTime::Centuries => "centuries",
                CrackTime::Millennia => "millennia",
                CrackTime::PracticallyImpossible => "practically impossible",
            },
        }
    }
}

/// Script detected in a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hangul,
    Latin,
    Digit,
}

/// Suspicious name shape recorded by the name heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameShape {
    ExcessiveSpecials,
    DigitsOnly,
    RepeatedChars,
    UrlLike,
    EmailLike,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMetrics {
    /// Lowercased domain part, absent when the address never split cleanly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub is_disposable: bool,
    /// Risk score in `0..=100`
    pub risk_score: u8,
    /// Trimmed input with its original casing
    pub submitted_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordMetrics {
    pub strength: StrengthTier,
    /// Entropy estimate in bits after scaling and penalties
    pub entropy: f64,
    pub crack_time: CrackTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvement_tips: Vec<ImprovementTip>,
    /// Number of character classes present (0..=4)
    pub character_set_diversity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameMetrics {
    pub normalized_value: String,
    /// HTML-escaped value with control characters stripped
    pub sanitized_value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_scripts: Vec<Script>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suspicious_patterns: Vec<NameShape>,
}

/// Metadata produced by one of the three validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ValidationMetadata {
    Email(EmailMetrics),
    Password(PasswordMetrics),
    Name(NameMetrics),
}

impl ValidationMetadata {
    pub fn as_email(&self) -> Option<&EmailMetrics> {
        match self {
            ValidationMetadata::Email(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_password(&self) -> Option<&PasswordMetrics> {
        match self {
            ValidationMetadata::Password(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&NameMetrics> {
        match self {
            ValidationMetadata::Name(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(StrengthTier::VeryStrong > StrengthTier::Moderate);
        assert!(StrengthTier::Weak > StrengthTier::VeryWeak);
    }

    #[test]
    fn test_metadata_tagging() {
        let meta = ValidationMetadata::Email(EmailMetrics {
            domain: Some("example.com".to_string()),
            is_disposable: false,
            risk_score: 0,
            submitted_value: "Jane@Example.com".to_string(),
        });
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["kind"], "email");
        assert_eq!(json["submitted_value"], "Jane@Example.com");
        assert!(meta.as_password().is_none());
    }

    #[test]
    fn test_crack_time_labels() {
        assert_eq!(CrackTime::Instant.label(Locale::Ko), "즉시");
        assert_eq!(
            CrackTime::PracticallyImpossible.label(Locale::En),
            "practically impossible"
        );
    }
}
