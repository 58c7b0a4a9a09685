//! Per-call validation options.
//!
//! [`ValidationOptions::default()`] is the production policy and mirrors the
//! server's rule table. Relaxed policies are built through presets such as
//! [`ValidationOptions::login()`], through [`ValidationOptionsBuilder`], or
//! loaded from a JSON fixture shared with the server via
//! [`ValidationOptions::from_json`]. All three paths reject contradictory
//! settings.

use super::context::fingerprint;
use super::messages::Locale;
use crate::error::{GuardError, Result};
use serde::{Deserialize, Serialize};

/// Email pattern strictness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailFormat {
    /// RFC 5322 addr-spec equivalent
    #[default]
    Rfc5322,
    /// `local@domain.tld` with a restricted local-part alphabet
    Basic,
}

/// Allowed character set for display names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCharset {
    /// Hangul, Latin, digits, whitespace and `. - '`
    #[default]
    Standard,
    /// Hangul, Latin, digits and whitespace only
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailOptions {
    pub block_disposable: bool,
    pub format: EmailFormat,
    pub allow_plus_addressing: bool,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            block_disposable: true,
            format: EmailFormat::Rfc5322,
            allow_plus_addressing: true,
        }
    }
}

/// Entropy calibration constants.
///
/// These are pinned to the backend's estimator and must be changed together
/// with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyCalibration {
    pub scale: f64,
    pub sequential_penalty: f64,
    pub repeated_penalty: f64,
    pub repeated_sequence_penalty: f64,
    pub keyboard_penalty: f64,
}

impl Default for EntropyCalibration {
    fn default() -> Self {
        Self {
            scale: 0.75,
            sequential_penalty: 5.0,
            repeated_penalty: 5.0,
            repeated_sequence_penalty: 15.0,
            keyboard_penalty: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordOptions {
    pub min_length: usize,
    pub max_length: usize,
    pub recommended_length: usize,
    pub optimal_length: usize,
    /// Required number of classes among upper, lower, digit, special
    pub min_character_classes: u8,
    pub sequential_run: usize,
    pub repeated_run: usize,
    pub keyboard_run: usize,
    pub check_personal_info: bool,
    pub check_common_passwords: bool,
    /// Below this the password is rejected
    pub min_entropy: f64,
    /// Below this a warning is raised
    pub weak_entropy: f64,
    /// At or above this no improvement tips are generated
    pub strong_entropy: f64,
    pub calibration: EntropyCalibration,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            recommended_length: 12,
            optimal_length: 14,
            min_character_classes: 3,
            sequential_run: 4,
            repeated_run: 3,
            keyboard_run: 4,
            check_personal_info: true,
            check_common_passwords: true,
            min_entropy: 35.0,
            weak_entropy: 40.0,
            strong_entropy: 60.0,
            calibration: EntropyCalibration::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameOptions {
    pub min_length: usize,
    pub max_length: usize,
    pub charset: NameCharset,
    pub allow_emojis: bool,
    pub ascii_only: bool,
    /// Hangul-dominant names longer than this produce a warning
    pub hangul_recommended_max: usize,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            min_length: 2,
            max_length: 50,
            charset: NameCharset::Standard,
            allow_emojis: true,
            ascii_only: false,
            hangul_recommended_max: 10,
        }
    }
}

/// Options for one validation call.
///
/// # Examples
///
/// ```rust
/// use auth_guard::core::{Locale, ValidationOptions};
///
/// let options = ValidationOptions::builder()
///     .locale(Locale::En)
///     .password_length(10, 64)
///     .allow_emojis(false)
///     .build()
///     .unwrap();
/// assert_eq!(options.password().min_length, 10);
///
/// assert!(ValidationOptions::builder().password_length(20, 10).build().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    locale: Locale,
    email: EmailOptions,
    password: PasswordOptions,
    name: NameOptions,
}

impl ValidationOptions {
    pub fn builder() -> ValidationOptionsBuilder {
        ValidationOptionsBuilder::default()
    }

    /// Login policy: existing accounts may use disposable domains and any
    /// basic-shaped address.
    pub fn login() -> Self {
        Self {
            email: EmailOptions {
                block_disposable: false,
                format: EmailFormat::Basic,
                allow_plus_addressing: true,
            },
            ..Self::default()
        }
    }

    /// Parses options from a JSON rule fixture. Missing keys take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn email(&self) -> &EmailOptions {
        &self.email
    }

    pub fn password(&self) -> &PasswordOptions {
        &self.password
    }

    pub fn name(&self) -> &NameOptions {
        &self.name
    }

    /// Returns a copy with a different locale. The locale cannot make options
    /// inconsistent, so no validation is needed.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Stable digest of the options, used as part of result-cache keys.
    pub fn fingerprint(&self) -> String {
        let encoded = serde_json::to_string(self).unwrap_or_default();
        fingerprint(&encoded)
    }

    fn validate(&self) -> Result<()> {
        let p = &self.password;
        if p.min_length == 0 {
            return Err(GuardError::invalid_options(
                "password.min_length",
                "must be at least 1",
            ));
        }
        if p.min_length > p.max_length {
            return Err(GuardError::invalid_options(
                "password.min_length",
                format!("{} exceeds max_length {}", p.min_length, p.max_length),
            ));
        }
        if !(1..=4).contains(&p.min_character_classes) {
            return Err(GuardError::invalid_options(
                "password.min_character_classes",
                "must be between 1 and 4",
            ));
        }
        for (field, run) in [
            ("password.sequential_run", p.sequential_run),
            ("password.repeated_run", p.repeated_run),
            ("password.keyboard_run", p.keyboard_run),
        ] {
            if run < 2 {
                return Err(GuardError::invalid_options(field, "must be at least 2"));
            }
        }
        let thresholds = [p.min_entropy, p.weak_entropy, p.strong_entropy];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(GuardError::invalid_options(
                "password.entropy",
                "thresholds must be finite and non-negative",
            ));
        }
        if p.min_entropy > p.weak_entropy || p.weak_entropy > p.strong_entropy {
            return Err(GuardError::invalid_options(
                "password.entropy",
                "thresholds must satisfy min <= weak <= strong",
            ));
        }
        let c = &p.calibration;
        if !c.scale.is_finite() || c.scale <= 0.0 {
            return Err(GuardError::invalid_options(
                "password.calibration.scale",
                "must be finite and positive",
            ));
        }
        let penalties = [
            c.sequential_penalty,
            c.repeated_penalty,
            c.repeated_sequence_penalty,
            c.keyboard_penalty,
        ];
        if penalties.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(GuardError::invalid_options(
                "password.calibration",
                "penalties must be finite and non-negative",
            ));
        }

        let n = &self.name;
        if n.min_length == 0 || n.min_length > n.max_length {
            return Err(GuardError::invalid_options(
                "name.min_length",
                format!(
                    "must be between 1 and max_length {} (got {})",
                    n.max_length, n.min_length
                ),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`ValidationOptions`].
#[derive(Debug, Clone, Default)]
pub struct ValidationOptionsBuilder {
    options: ValidationOptions,
}

impl ValidationOptionsBuilder {
    /// Starts from an existing policy instead of the production default.
    pub fn from_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.options.locale = locale;
        self
    }

    pub fn email(mut self, email: EmailOptions) -> Self {
        self.options.email = email;
        self
    }

    pub fn password(mut self, password: PasswordOptions) -> Self {
        self.options.password = password;
        self
    }

    pub fn name(mut self, name: NameOptions) -> Self {
        self.options.name = name;
        self
    }

    pub fn block_disposable(mut self, block: bool) -> Self {
        self.options.email.block_disposable = block;
        self
    }

    pub fn email_format(mut self, format: EmailFormat) -> Self {
        self.options.email.format = format;
        self
    }

    pub fn allow_plus_addressing(mut self, allow: bool) -> Self {
        self.options.email.allow_plus_addressing = allow;
        self
    }

    pub fn password_length(mut self, min: usize, max: usize) -> Self {
        self.options.password.min_length = min;
        self.options.password.max_length = max;
        self
    }

    pub fn min_character_classes(mut self, classes: u8) -> Self {
        self.options.password.min_character_classes = classes;
        self
    }

    pub fn check_personal_info(mut self, enabled: bool) -> Self {
        self.options.password.check_personal_info = enabled;
        self
    }

    pub fn check_common_passwords(mut self, enabled: bool) -> Self {
        self.options.password.check_common_passwords = enabled;
        self
    }

    pub fn min_entropy(mut self, bits: f64) -> Self {
        self.options.password.min_entropy = bits;
        self
    }

    pub fn entropy_calibration(mut self, calibration: EntropyCalibration) -> Self {
        self.options.password.calibration = calibration;
        self
    }

    pub fn name_length(mut self, min: usize, max: usize) -> Self {
        self.options.name.min_length = min;
        self.options.name.max_length = max;
        self
    }

    pub fn name_charset(mut self, charset: NameCharset) -> Self {
        self.options.name.charset = charset;
        self
    }

    pub fn allow_emojis(mut self, allow: bool) -> Self {
        self.options.name.allow_emojis = allow;
        self
    }

    pub fn ascii_only(mut self, ascii_only: bool) -> Self {
        self.options.name.ascii_only = ascii_only;
        self
    }

    /// Validates and returns the options.
    pub fn build(self) -> Result<ValidationOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}
