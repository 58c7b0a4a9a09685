//! Password rule tables.

use crate::core::CrackTime;

/// Special characters that count toward the "special" class and the
/// conservative +10 charset bump.
pub const SPECIAL_CHARS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

/// Characters whose presence demotes a base-word match to a warning.
pub const DECORATION_CHARS: &str = "!@#$%^&*";

pub const CHARSET_LOWER: u32 = 26;
pub const CHARSET_UPPER: u32 = 26;
pub const CHARSET_DIGIT: u32 = 10;
pub const CHARSET_SPECIAL: u32 = 10;
pub const CHARSET_SPACE: u32 = 1;

/// Adjacent-key rows. Windows are matched forward and reversed.
pub const KEYBOARD_ROWS: &[&str] = &[
    "qwertyuiop",
    "asdfghjkl",
    "zxcvbnm",
    "1234567890",
    "0987654321",
    "qaz",
    "wsx",
    "edc",
    "rfv",
    "tgb",
    "yhn",
    "ujm",
    "ㅂㅈㄷㄱㅅㅛㅕㅑㅐㅔ",
    "ㅁㄴㅇㄹㅎㅗㅓㅏㅣ",
    "ㅋㅌㅊㅍㅠㅜㅡ",
];

/// Exact-match corpus, compared case-sensitively and lowercased.
pub const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "123456789",
    "12345678",
    "1234567890",
    "1234567",
    "123123",
    "111111",
    "000000",
    "password",
    "Password",
    "PASSWORD",
    "password1",
    "password123",
    "Password1",
    "Password123",
    "passw0rd",
    "p@ssw0rd",
    "P@ssw0rd",
    "qwerty",
    "qwerty123",
    "qwertyuiop",
    "asdfgh",
    "asdfghjkl",
    "zxcvbn",
    "qazwsx",
    "비밀번호",
    "admin",
    "Admin",
    "administrator",
    "root",
    "test",
    "Test",
    "test123",
    "demo",
    "Demo",
    "demo123",
    "user",
    "User",
    "user123",
    "guest",
    "Guest",
    "20242024",
    "20232023",
    "20222022",
    "12341234",
    "welcome",
    "Welcome",
    "welcome123",
    "hello",
    "Hello",
    "hello123",
    "letmein",
    "login",
    "Login",
    "abc123",
    "Abc123",
    "monkey",
    "dragon",
    "master",
    "Master",
];

/// Dictionary words that are rejected bare and warned about when decorated.
pub const BASE_WORDS: &[&str] = &[
    "password", "admin", "test", "demo", "user", "guest", "welcome", "hello", "login", "master",
    "monkey", "dragon", "football", "baseball", "soccer", "hockey", "iloveyou", "sunshine",
    "princess", "superman", "batman",
];

/// Strength tier lower bounds in bits.
pub const TIER_WEAK: f64 = 30.0;
pub const TIER_MODERATE: f64 = 40.0;
pub const TIER_STRONG: f64 = 50.0;
pub const TIER_VERY_STRONG: f64 = 60.0;

/// Crack-time buckets, ascending by threshold.
pub const CRACK_TIME_TABLE: &[(f64, CrackTime)] = &[
    (25.0, CrackTime::Instant),
    (30.0, CrackTime::Seconds),
    (35.0, CrackTime::Minutes),
    (40.0, CrackTime::Hours),
    (45.0, CrackTime::Days),
    (50.0, CrackTime::Weeks),
    (55.0, CrackTime::Months),
    (60.0, CrackTime::Years),
    (65.0, CrackTime::Decades),
    (70.0, CrackTime::Centuries),
    (75.0, CrackTime::Millennia),
    (80.0, CrackTime::PracticallyImpossible),
];

/// Minimum length of a personal-information fragment worth matching.
pub const PERSONAL_INFO_MIN_FRAGMENT: usize = 3;

/// Maximum number of improvement tips returned.
pub const MAX_IMPROVEMENT_TIPS: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crack_table_is_ascending() {
        assert!(CRACK_TIME_TABLE.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_base_words_are_lowercase() {
        assert!(BASE_WORDS.iter().all(|w| w.to_lowercase() == *w));
    }
}
