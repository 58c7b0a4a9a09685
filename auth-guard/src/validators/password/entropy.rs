//! Entropy estimation, strength tiers and crack-time buckets.
//!
//! The estimator is deliberately conservative and must agree with the
//! server's: charset size is the sum of per-class bumps (special characters
//! count as 10 no matter how many are used), the raw bit count is scaled by
//! [`EntropyCalibration::scale`], and each detected pattern subtracts a fixed
//! penalty.

use super::patterns::{CharClasses, PatternFlags};
use crate::core::{CrackTime, EntropyCalibration, StrengthTier};
use crate::rules::password::{
    CHARSET_DIGIT, CHARSET_LOWER, CHARSET_SPACE, CHARSET_SPECIAL, CHARSET_UPPER,
    CRACK_TIME_TABLE, TIER_MODERATE, TIER_STRONG, TIER_VERY_STRONG, TIER_WEAK,
};

/// Size of the alphabet implied by the classes present.
pub fn charset_size(classes: &CharClasses) -> u32 {
    let mut size = 0;
    if classes.lower {
        size += CHARSET_LOWER;
    }
    if classes.upper {
        size += CHARSET_UPPER;
    }
    if classes.digit {
        size += CHARSET_DIGIT;
    }
    if classes.special {
        size += CHARSET_SPECIAL;
    }
    if classes.whitespace {
        size += CHARSET_SPACE;
    }
    size
}

/// Scores `length` symbols drawn from `charset` with the given penalties.
/// Never negative.
pub fn score(
    length: usize,
    charset: u32,
    flags: &PatternFlags,
    calibration: &EntropyCalibration,
) -> f64 {
    if length == 0 || charset == 0 {
        return 0.0;
    }
    let base = length as f64 * f64::from(charset).log2() * calibration.scale;

    let mut penalty = 0.0;
    if flags.sequential {
        penalty += calibration.sequential_penalty;
    }
    if flags.repeated {
        penalty += calibration.repeated_penalty;
    }
    if flags.repeated_sequence {
        penalty += calibration.repeated_sequence_penalty;
    }
    if flags.keyboard {
        penalty += calibration.keyboard_penalty;
    }

    (base - penalty).max(0.0)
}

/// Estimates the entropy of `password` in bits. Length counts Unicode scalar
/// values.
pub fn estimate(
    password: &str,
    classes: &CharClasses,
    flags: &PatternFlags,
    calibration: &EntropyCalibration,
) -> f64 {
    score(
        password.chars().count(),
        charset_size(classes),
        flags,
        calibration,
    )
}

pub fn strength_tier(entropy: f64) -> StrengthTier {
    if entropy >= TIER_VERY_STRONG {
        StrengthTier::VeryStrong
    } else if entropy >= TIER_STRONG {
        StrengthTier::Strong
    } else if entropy >= TIER_MODERATE {
        StrengthTier::Moderate
    } else if entropy >= TIER_WEAK {
        StrengthTier::Weak
    } else {
        StrengthTier::VeryWeak
    }
}

/// Highest crack-time bucket whose threshold `entropy` meets.
pub fn crack_time(entropy: f64) -> CrackTime {
    CRACK_TIME_TABLE
        .iter()
        .rev()
        .find(|(threshold, _)| entropy >= *threshold)
        .map(|(_, bucket)| *bucket)
        .unwrap_or(CrackTime::Instant)
}
