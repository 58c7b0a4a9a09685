//! Email rule tables.

use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_LENGTH: usize = 3;
pub const MAX_LENGTH: usize = 254;
pub const MAX_LOCAL_LENGTH: usize = 64;
pub const MAX_DOMAIN_LENGTH: usize = 253;

/// RFC 5322 addr-spec equivalent.
pub static RFC5322_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_\x60{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Hard-coded regex pattern should be valid")
});

/// Simplified `local@domain.tld` pattern.
pub static BASIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("Hard-coded regex pattern should be valid")
});

/// Domains that hand out throwaway inboxes. Subdomains match too.
pub const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "10minutemail.net",
    "tempmail.com",
    "temp-mail.org",
    "guerrillamail.com",
    "guerrillamail.net",
    "guerrillamail.org",
    "mailinator.com",
    "mailinator.net",
    "throwaway.email",
    "yopmail.com",
    "fakeinbox.com",
    "trashmail.com",
    "maildrop.cc",
    "getnada.com",
    "dispostable.com",
    "disposableemailaddresses.com",
    "tempinbox.com",
    "sharklasers.com",
    "spam4.me",
    "mailnesia.com",
    "mytemp.email",
];

/// Substrings rejected anywhere in the address, matched case-insensitively.
pub const DANGEROUS_SUBSTRINGS: &[&str] = &[
    // XSS
    "<script",
    "</script",
    "javascript:",
    "onclick=",
    "onerror=",
    "onload=",
    "onmouseover=",
    "onfocus=",
    "eval(",
    "alert(",
    // Path traversal
    "../",
    "..\\",
    "%2e%2e%2f",
    "%2e%2e\\",
    // Null bytes
    "%00",
    "\0",
    "\\x00",
    "\\0",
    // LDAP
    "*(",
    "*)(",
    // Command injection
    "|",
    "||",
    "&",
    "&&",
    ";",
    "`",
    "$(",
    "${",
];

/// Shape checks run on the normalized address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspiciousKind {
    ConsecutiveDots,
    DotPosition,
    ExcessiveSpecialChars,
    NumericOnlyLocal,
    /// Contributes to the risk score without a warning
    ExcessiveSubdomains,
}

/// Suspicious-shape patterns, in the order their warnings are emitted.
pub static SUSPICIOUS_PATTERNS: Lazy<Vec<(SuspiciousKind, Regex)>> = Lazy::new(|| {
    let table = [
        (SuspiciousKind::ConsecutiveDots, r"\.\."),
        (SuspiciousKind::DotPosition, r"^\.|\.@|@\.|\.$"),
        (
            SuspiciousKind::ExcessiveSpecialChars,
            r"[!#$%&'*+/=?^_\x60{|}~-]{3,}",
        ),
        (SuspiciousKind::NumericOnlyLocal, r"^[0-9]+@"),
        (SuspiciousKind::ExcessiveSubdomains, r"@[^.]+(\.[^.]+){4,}"),
    ];
    table
        .into_iter()
        .map(|(kind, pattern)| {
            #[allow(clippy::expect_used)]
            let regex = Regex::new(pattern).expect("Hard-coded regex pattern should be valid");
            (kind, regex)
        })
        .collect()
});

pub const RISK_DISPOSABLE: u32 = 30;
pub const RISK_PER_SUSPICIOUS: u32 = 10;
pub const RISK_SHORT_LOCAL: u32 = 15;
pub const RISK_SPECIAL_HEAVY_LOCAL: u32 = 10;

/// Returns true if `domain` or any parent of it is a disposable domain.
pub fn is_disposable_domain(domain: &str) -> bool {
    DISPOSABLE_DOMAINS.iter().any(|blocked| {
        domain == *blocked
            || domain
                .strip_suffix(blocked)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}
