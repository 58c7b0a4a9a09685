//! Password validation.
//!
//! Checks accumulate rather than short-circuit (only an empty password
//! returns early), so a single result lists every policy the password
//! violates, in evaluation order:
//!
//! 1. length, then whitespace, then character-class coverage
//! 2. sequential, repeated and repeated-sequence patterns (errors) and
//!    keyboard runs (warning)
//! 3. personal information from the [`UserContext`]
//! 4. the common-password corpus and base words
//! 5. entropy against the minimum and weak thresholds
//! 6. reuse of the current password
//!
//! Strength tier, crack time and improvement tips are reported as
//! [`PasswordMetrics`] metadata.

pub mod entropy;
pub mod patterns;

use std::sync::Mutex;
use std::time::Instant;

use tracing::instrument;

use crate::cache::{CacheStats, ExpiringCache};
use crate::core::{
    fingerprint, ErrorCode, ErrorDetails, Field, FieldError, FieldWarning, ImprovementTip,
    Locale, PasswordMetrics, PasswordOptions, RiskLevel, Severity, UserContext,
    ValidationMetadata, ValidationOptions, ValidationResult, WarningCode,
};
use crate::logging::LogConfig;
use crate::rules::password::{
    BASE_WORDS, COMMON_PASSWORDS, DECORATION_CHARS, MAX_IMPROVEMENT_TIPS,
    PERSONAL_INFO_MIN_FRAGMENT,
};
use crate::{log_cache, log_rule, perf_debug};

use patterns::{CharClasses, PatternFlags};

/// Validates passwords and memoizes entropy estimates.
///
/// # Examples
///
/// ```rust
/// use auth_guard::core::{ErrorCode, UserContext, ValidationOptions};
/// use auth_guard::validators::PasswordValidator;
///
/// let validator = PasswordValidator::new();
/// let options = ValidationOptions::default();
///
/// assert!(validator.validate("Secure@789Key", None, &options).is_valid());
///
/// let context = UserContext::new().with_email("john@x.com");
/// let result = validator.validate("john123!@#", Some(&context), &options);
/// assert!(result.has_error(ErrorCode::PasswordPersonalInfoIncluded));
/// ```
#[derive(Debug)]
pub struct PasswordValidator {
    entropy_cache: Mutex<ExpiringCache<f64>>,
    log_config: LogConfig,
}

impl PasswordValidator {
    pub fn new() -> Self {
        Self {
            entropy_cache: Mutex::new(ExpiringCache::new()),
            log_config: LogConfig::default(),
        }
    }

    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    /// Replaces the entropy cache, e.g. with a shorter TTL.
    pub fn with_cache(mut self, cache: ExpiringCache<f64>) -> Self {
        self.entropy_cache = Mutex::new(cache);
        self
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.entropy_cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .stats()
    }

    pub fn clear_cache(&self) {
        self.entropy_cache
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Validates `password` against the password policy in `options`.
    #[instrument(skip_all, fields(field = "password"))]
    pub fn validate(
        &self,
        password: &str,
        context: Option<&UserContext>,
        options: &ValidationOptions,
    ) -> ValidationResult {
        let start = Instant::now();
        let mut result = self.run(password, context, options);
        result.set_timing_ms(start.elapsed().as_secs_f64() * 1000.0);

        perf_debug!(
            self.log_config,
            value = %self.log_config.field_value(password),
            is_valid = result.is_valid(),
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            timing_ms = result.timing_ms(),
            "Password validated"
        );
        result
    }

    fn run(
        &self,
        password: &str,
        context: Option<&UserContext>,
        options: &ValidationOptions,
    ) -> ValidationResult {
        let locale = options.locale();
        let policy = options.password();
        let error = |code, severity| FieldError::new(code, Field::Password, severity, locale);
        let warning = |code, risk| FieldWarning::new(code, risk, locale);

        if password.is_empty() {
            return ValidationResult::from_parts(
                vec![error(ErrorCode::PasswordFieldEmpty, Severity::Critical)],
                vec![],
                None,
            );
        }

        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let length = password.chars().count();

        if length < policy.min_length {
            log_rule!(self.log_config, rule = "min_length", length, "Password rule fired");
            errors.push(
                error(ErrorCode::PasswordTooShort, Severity::Major).with_details(
                    ErrorDetails::rule(format!("min_length={}", policy.min_length)),
                ),
            );
        } else if length > policy.max_length {
            log_rule!(self.log_config, rule = "max_length", length, "Password rule fired");
            errors.push(
                error(ErrorCode::PasswordTooLong, Severity::Major).with_details(
                    ErrorDetails::rule(format!("max_length={}", policy.max_length)),
                ),
            );
        } else if length < policy.recommended_length {
            warnings.push(warning(WarningCode::ShortPassword, RiskLevel::Medium));
        }

        let classes = CharClasses::detect(password);
        if classes.whitespace {
            errors.push(error(ErrorCode::PasswordContainsSpace, Severity::Major));
        }

        if classes.count() < policy.min_character_classes {
            log_rule!(
                self.log_config,
                rule = "character_classes",
                present = classes.count(),
                "Password rule fired"
            );
            errors.push(
                error(ErrorCode::PasswordCharTypesInsufficient, Severity::Major).with_details(
                    ErrorDetails::rule(format!(
                        "{}/{} types",
                        classes.count(),
                        policy.min_character_classes
                    )),
                ),
            );
        }

        let flags = PatternFlags::detect(password, policy);
        if flags.sequential {
            errors.push(
                error(ErrorCode::PasswordSequentialPattern, Severity::Major).with_details(
                    ErrorDetails::rule(format!("sequential_run={}", policy.sequential_run)),
                ),
            );
        }
        if flags.repeated {
            errors.push(
                error(ErrorCode::PasswordRepeatedPattern, Severity::Major).with_details(
                    ErrorDetails::rule(format!("repeated_run={}", policy.repeated_run)),
                ),
            );
        }
        if flags.repeated_sequence {
            errors.push(error(ErrorCode::PasswordRepeatedSequence, Severity::Major));
        }
        if flags.keyboard {
            warnings.push(warning(WarningCode::KeyboardPattern, RiskLevel::Medium));
        }
        log_rule!(self.log_config, ?flags, "Password pattern scan");

        if policy.check_personal_info {
            if let Some(rule) = context.and_then(|ctx| personal_info_leak(password, ctx)) {
                errors.push(
                    error(ErrorCode::PasswordPersonalInfoIncluded, Severity::Major)
                        .with_details(ErrorDetails::rule(rule)),
                );
            }
        }

        if policy.check_common_passwords {
            match common_password_check(password) {
                Some(CommonMatch::Corpus) => {
                    errors.push(error(ErrorCode::PasswordCommonPassword, Severity::Critical));
                }
                Some(CommonMatch::BaseWord(word)) => {
                    errors.push(
                        error(ErrorCode::PasswordCommonPassword, Severity::Major)
                            .with_details(ErrorDetails::rule(format!("base_word={word}"))),
                    );
                }
                Some(CommonMatch::DecoratedBaseWord) => {
                    warnings.push(warning(WarningCode::CommonBaseWord, RiskLevel::Medium));
                }
                None => {}
            }
        }

        let entropy = self.cached_entropy(password, &classes, &flags, policy);
        if entropy < policy.min_entropy {
            errors.push(
                error(ErrorCode::PasswordEntropyTooLow, Severity::Critical).with_details(
                    ErrorDetails::rule(format!(
                        "entropy={entropy:.1} < {}",
                        policy.min_entropy
                    )),
                ),
            );
        } else if entropy < policy.weak_entropy {
            warnings.push(warning(WarningCode::LowEntropy, RiskLevel::Medium));
        }

        if context.is_some_and(|ctx| ctx.matches_current_password(password)) {
            errors.push(error(ErrorCode::PasswordSameAsCurrent, Severity::Major));
        }

        let improvement_tips = if entropy < policy.strong_entropy {
            improvement_tips(&classes, length, policy)
        } else {
            Vec::new()
        };

        let metrics = PasswordMetrics {
            strength: entropy::strength_tier(entropy),
            entropy,
            crack_time: entropy::crack_time(entropy),
            improvement_tips,
            character_set_diversity: classes.count(),
        };

        ValidationResult::from_parts(
            errors,
            warnings,
            Some(ValidationMetadata::Password(metrics)),
        )
    }

    fn cached_entropy(
        &self,
        password: &str,
        classes: &CharClasses,
        flags: &PatternFlags,
        policy: &PasswordOptions,
    ) -> f64 {
        // Calibration and run lengths change the estimate, so they are part of the key.
        let key = format!(
            "{}:{}:{}:{}:{:?}",
            fingerprint(password),
            policy.sequential_run,
            policy.repeated_run,
            policy.keyboard_run,
            policy.calibration
        );

        let mut cache = self
            .entropy_cache
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if let Some(hit) = cache.get(&key) {
            log_cache!(self.log_config, cache = "entropy", "Cache hit");
            return hit;
        }
        log_cache!(self.log_config, cache = "entropy", "Cache miss");

        let value = entropy::estimate(password, classes, flags, &policy.calibration);
        cache.insert(key, value);
        value
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of the common-password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommonMatch {
    /// Exact corpus hit, case-sensitive or lowercased
    Corpus,
    /// Lowercased password equals a base word
    BaseWord(&'static str),
    /// Mixed-case base word decorated with a special character
    DecoratedBaseWord,
}

fn common_password_check(password: &str) -> Option<CommonMatch> {
    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS
        .iter()
        .any(|common| *common == password || *common == lowered)
    {
        return Some(CommonMatch::Corpus);
    }

    let decorated = password != lowered && password.chars().any(|c| DECORATION_CHARS.contains(c));
    for word in BASE_WORDS {
        if lowered == *word {
            return Some(CommonMatch::BaseWord(word));
        }
        // Policy: a decorated variant is only worth a warning.
        if decorated && lowered.contains(word) {
            return Some(CommonMatch::DecoratedBaseWord);
        }
    }
    None
}

/// Returns the violated rule if the password embeds the user's email local
/// part or a display-name token.
fn personal_info_leak(password: &str, context: &UserContext) -> Option<&'static str> {
    let lowered = password.to_lowercase();
    let long_enough = |fragment: &str| fragment.chars().count() >= PERSONAL_INFO_MIN_FRAGMENT;

    if let Some(email) = &context.email {
        let local = email.split('@').next().unwrap_or_default().trim().to_lowercase();
        if long_enough(&local) && lowered.contains(&local) {
            return Some("contains_email");
        }
    }

    if let Some(name) = &context.display_name {
        let name = name.to_lowercase();
        if name
            .split_whitespace()
            .any(|token| long_enough(token) && lowered.contains(token))
        {
            return Some("contains_name");
        }
    }

    None
}

/// First unmet suggestions in priority order: uppercase, special, digits,
/// length.
///
/// The cap applies after ordering, so a short password missing two character
/// classes gets no length tip even though it carries the short-password
/// warning.
fn improvement_tips(
    classes: &CharClasses,
    length: usize,
    policy: &PasswordOptions,
) -> Vec<ImprovementTip> {
    [
        (!classes.upper, ImprovementTip::AddUppercase),
        (!classes.special, ImprovementTip::AddSpecial),
        (!classes.digit, ImprovementTip::AddNumbers),
        (length < policy.optimal_length, ImprovementTip::AddLength),
    ]
    .into_iter()
    .filter_map(|(unmet, tip)| unmet.then_some(tip))
    .take(MAX_IMPROVEMENT_TIPS)
    .collect()
}

/// Returns the localized text of each tip in `metrics`.
pub fn describe_tips(metrics: &PasswordMetrics, locale: Locale) -> Vec<&'static str> {
    metrics
        .improvement_tips
        .iter()
        .map(|tip| crate::core::tip_message(*tip, locale))
        .collect()
}
