//! Character-class and pattern detection for passwords.

use crate::core::PasswordOptions;
use crate::rules::password::{KEYBOARD_ROWS, SPECIAL_CHARS};

/// Character classes present in a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClasses {
    pub upper: bool,
    pub lower: bool,
    pub digit: bool,
    /// One of the common special characters
    pub special: bool,
    pub whitespace: bool,
}

impl CharClasses {
    pub fn detect(password: &str) -> Self {
        let mut classes = Self::default();
        for c in password.chars() {
            match c {
                'A'..='Z' => classes.upper = true,
                'a'..='z' => classes.lower = true,
                '0'..='9' => classes.digit = true,
                c if c.is_whitespace() => classes.whitespace = true,
                c if SPECIAL_CHARS.contains(c) => classes.special = true,
                _ => {}
            }
        }
        classes
    }

    /// Number of required classes present (upper, lower, digit, special).
    pub fn count(&self) -> u8 {
        [self.upper, self.lower, self.digit, self.special]
            .into_iter()
            .filter(|present| *present)
            .count() as u8
    }
}

/// Entropy-reducing patterns found in a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternFlags {
    pub sequential: bool,
    pub repeated: bool,
    pub repeated_sequence: bool,
    pub keyboard: bool,
}

impl PatternFlags {
    pub fn detect(password: &str, options: &PasswordOptions) -> Self {
        Self {
            sequential: has_sequential_run(password, options.sequential_run),
            repeated: has_repeated_run(password, options.repeated_run),
            repeated_sequence: has_repeated_sequence(password),
            keyboard: has_keyboard_run(password, options.keyboard_run),
        }
    }
}

/// Detects `run` consecutive ascending or descending code points, confined to
/// `[a-z]` or `[0-9]`, case-insensitively.
pub fn has_sequential_run(password: &str, run: usize) -> bool {
    if run < 2 {
        return false;
    }
    let chars: Vec<char> = password.to_lowercase().chars().collect();
    chars.windows(run).any(|window| {
        let same_class = window.iter().all(|c| c.is_ascii_lowercase())
            || window.iter().all(|c| c.is_ascii_digit());
        if !same_class {
            return false;
        }
        let ascending = window.windows(2).all(|p| p[1] as u32 == p[0] as u32 + 1);
        let descending = window.windows(2).all(|p| p[1] as u32 + 1 == p[0] as u32);
        ascending || descending
    })
}

/// Detects a single character repeated `run` or more times in a row.
pub fn has_repeated_run(password: &str, run: usize) -> bool {
    let mut previous = None;
    let mut length = 0;
    for c in password.chars() {
        if Some(c) == previous {
            length += 1;
        } else {
            previous = Some(c);
            length = 1;
        }
        if length >= run {
            return true;
        }
    }
    false
}

/// Detects identical halves, or a 3 or 4 character group immediately
/// followed by itself.
pub fn has_repeated_sequence(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() < 4 {
        return false;
    }

    if chars.len() % 2 == 0 {
        let (first, second) = chars.split_at(chars.len() / 2);
        if first == second {
            return true;
        }
    }

    (3..=4).any(|group| {
        chars.len() >= group * 2
            && (0..=chars.len() - group * 2)
                .any(|i| chars[i..i + group] == chars[i + group..i + group * 2])
    })
}

/// Detects `run` adjacent keys from any keyboard row, forward or reversed.
pub fn has_keyboard_run(password: &str, run: usize) -> bool {
    if run == 0 {
        return false;
    }
    let lowered = password.to_lowercase();
    KEYBOARD_ROWS.iter().any(|row| {
        let keys: Vec<char> = row.chars().collect();
        keys.windows(run).any(|segment| {
            let forward: String = segment.iter().collect();
            let reversed: String = segment.iter().rev().collect();
            lowered.contains(&forward) || lowered.contains(&reversed)
        })
    })
}
