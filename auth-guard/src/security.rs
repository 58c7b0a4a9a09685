//! Security utilities for credential validation.
//!
//! This module provides the secret wrapper used for password fingerprints,
//! the substring scanner behind every blocked-pattern table, and the HTML
//! escaping used for sanitized display values.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure string that automatically clears its contents when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecureString(String);

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(***)")
    }
}

impl SecureString {
    /// Create a new secure string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the string value. Use carefully and avoid storing the result.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Convert to a regular string. The SecureString will be zeroized.
    pub fn into_string(mut self) -> String {
        let value = std::mem::take(&mut self.0);
        self.0.zeroize();
        value
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// How input and patterns are folded before a containment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFold {
    /// Compare as-is
    Exact,
    /// Lowercase both sides
    Lower,
    /// Uppercase both sides
    Upper,
}

impl CaseFold {
    fn apply(&self, value: &str) -> String {
        match self {
            CaseFold::Exact => value.to_string(),
            CaseFold::Lower => value.to_lowercase(),
            CaseFold::Upper => value.to_uppercase(),
        }
    }
}

/// Scans text against a table of blocked substrings.
///
/// # Examples
///
/// ```rust
/// use auth_guard::security::{CaseFold, PatternScanner};
///
/// const BLOCKED: &[&str] = &["<script", "javascript:"];
/// let scanner = PatternScanner::new(BLOCKED, CaseFold::Lower);
///
/// assert_eq!(scanner.first_match("<SCRIPT>x"), Some("<script"));
/// assert_eq!(scanner.first_match("hello"), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PatternScanner {
    patterns: &'static [&'static str],
    fold: CaseFold,
}

impl PatternScanner {
    pub const fn new(patterns: &'static [&'static str], fold: CaseFold) -> Self {
        Self { patterns, fold }
    }

    /// Returns the first pattern in table order contained in `text`.
    pub fn first_match(&self, text: &str) -> Option<&'static str> {
        let haystack = self.fold.apply(text);
        self.patterns
            .iter()
            .copied()
            .find(|pattern| haystack.contains(self.fold.apply(pattern).as_str()))
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }
}

/// Escapes `& < > " ' /` as HTML entities.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '/' => escaped.push_str("&#x2F;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Removes every occurrence of each fragment from `value`.
pub fn strip_fragments(value: &str, fragments: &[&str]) -> String {
    fragments
        .iter()
        .fold(value.to_string(), |acc, fragment| acc.replace(fragment, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_zeroization() {
        let password = "secret123";
        let secure = SecureString::new(password);
        assert_eq!(secure.expose(), "secret123");

        let extracted = secure.into_string();
        assert_eq!(extracted, "secret123");
    }

    #[test]
    fn test_secure_string_debug_is_redacted() {
        let secure = SecureString::from("hunter2");
        assert_eq!(format!("{secure:?}"), "SecureString(***)");
    }

    #[test]
    fn test_scanner_respects_table_order() {
        const TABLE: &[&str] = &["|", "||", "&&"];
        let scanner = PatternScanner::new(TABLE, CaseFold::Exact);
        assert_eq!(scanner.first_match("a||b"), Some("|"));
        assert!(!scanner.is_match("plain"));
    }

    #[test]
    fn test_scanner_upper_fold() {
        const TABLE: &[&str] = &["DROP", "ORDER BY"];
        let scanner = PatternScanner::new(TABLE, CaseFold::Upper);
        assert_eq!(scanner.first_match("order by name"), Some("ORDER BY"));
        assert_eq!(scanner.first_match("Drop it"), Some("DROP"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="/x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;&#x2F;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;&#x2F;a&gt;"
        );
        assert_eq!(escape_html("홍길동"), "홍길동");
    }

    #[test]
    fn test_strip_fragments() {
        assert_eq!(strip_fragments("a\u{200B}b\0c", &["\u{200B}", "\0"]), "abc");
    }
}
