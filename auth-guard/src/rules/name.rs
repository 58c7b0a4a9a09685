//! Display-name rule tables.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tag and event-handler fragments, matched case-insensitively.
pub const HTML_FRAGMENTS: &[&str] = &[
    "<script",
    "</script>",
    "<javascript",
    "onclick",
    "onerror",
    "onload",
    "onmouseover",
    "onfocus",
    "onblur",
    "onchange",
    "<iframe",
    "<embed",
    "<object",
    "<applet",
    "<a ",
    "<img",
    "<link",
    "<style",
    "</style>",
    "<meta",
    "<base",
    "<form",
    "<input",
    "<textarea",
    "<button",
    "<select",
];

/// Generic tag shape, checked after the fragment list.
pub static HTML_TAG_SHAPE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"<[^>]+>").expect("Hard-coded regex pattern should be valid")
});

/// SQL keywords and operators, matched against the uppercased name.
pub const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "MERGE", "CREATE", "ALTER", "DROP", "TRUNCATE",
    "GRANT", "REVOKE", "COMMIT", "ROLLBACK", "SAVEPOINT", "UNION", "JOIN", "WHERE", "HAVING",
    "ORDER BY", "GROUP BY", "EXEC", "EXECUTE", "CAST", "CONVERT", "--", "/*", "*/", "OR 1=1",
    "AND 1=1", "' OR '", "\" OR \"", "1=1", "'='",
];

/// Script-injection fragments, matched case-insensitively.
pub const XSS_FRAGMENTS: &[&str] = &[
    "javascript:",
    "data:text/html",
    "vbscript:",
    "file://",
    "%3Cscript",
    "&#60;script",
    "\\x3cscript",
    "\\u003cscript",
    "expression(",
    "eval(",
    "alert(",
    "confirm(",
    "prompt(",
    "console.",
    "window.",
    "document.",
    "String.fromCharCode",
    "atob(",
    "btoa(",
    "fetch(",
    "XMLHttpRequest",
];

/// Directory traversal sequences, matched verbatim.
pub const PATH_TRAVERSAL: &[&str] = &[
    "../", "..\\", "..%2f", "..%2F", "..%5c", "..%5C", "%2e%2e%2f", "%2e%2e/", "..;/", "..//",
    "..\\..", "./../",
];

pub const NULL_CHARS: &[&str] = &["\0", "%00"];
pub const NEWLINE_CHARS: &[&str] = &["\n", "\r", "%0a", "%0d", "%0A", "%0D"];
pub const ZERO_WIDTH_CHARS: &[&str] = &["\u{200B}", "\u{200C}", "\u{200D}", "\u{FEFF}", "\u{2060}"];
pub const BIDI_OVERRIDES: &[&str] = &["\u{202E}", "\u{202D}", "\u{202C}"];

/// Emoji blocks (misc symbols, dingbats, pictographs, emoticons, transport,
/// supplemental symbols).
pub const EMOJI_RANGES: &[(char, char)] = &[
    ('\u{2600}', '\u{26FF}'),
    ('\u{2700}', '\u{27BF}'),
    ('\u{1F300}', '\u{1F5FF}'),
    ('\u{1F600}', '\u{1F64F}'),
    ('\u{1F680}', '\u{1F6FF}'),
    ('\u{1F900}', '\u{1F9FF}'),
];

pub static STANDARD_CHARSET: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[가-힣a-zA-Z0-9\s.\-']+$").expect("Hard-coded regex pattern should be valid")
});

pub static STRICT_CHARSET: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[가-힣a-zA-Z0-9\s]+$").expect("Hard-coded regex pattern should be valid")
});

/// More than this many specials counts as suspicious.
pub const SUSPICIOUS_SPECIAL_LIMIT: usize = 3;

/// Run length at which a repeated character counts as suspicious.
pub const SUSPICIOUS_REPEAT_RUN: usize = 5;

pub static URL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)https?://|www\.").expect("Hard-coded regex pattern should be valid")
});

pub static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Hard-coded regex pattern should be valid")
});

pub fn is_hangul_syllable(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

pub fn is_emoji(c: char) -> bool {
    EMOJI_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charsets() {
        assert!(STANDARD_CHARSET.is_match("Mary-Jane O'Neil"));
        assert!(!STRICT_CHARSET.is_match("Mary-Jane O'Neil"));
        assert!(STRICT_CHARSET.is_match("홍길동 Kim 2"));
        assert!(!STANDARD_CHARSET.is_match("name<"));
    }

    #[test]
    fn test_emoji_ranges() {
        assert!(is_emoji('😀'));
        assert!(is_emoji('☀'));
        assert!(!is_emoji('가'));
        assert!(is_hangul_syllable('한'));
    }
}
