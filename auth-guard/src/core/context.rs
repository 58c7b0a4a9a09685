//! Cross-field context supplied by the caller per validation call.

use crate::security::SecureString;
use sha2::{Digest, Sha256};

/// Values from other form fields that influence password validation.
///
/// The engine never stores a context; it is read for the duration of one
/// call. The current password is only ever held as a SHA-256 hex fingerprint.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub current_password_hash: Option<SecureString>,
}

impl UserContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Stores the fingerprint of the user's current password.
    pub fn with_current_password(mut self, password: &str) -> Self {
        self.current_password_hash = Some(SecureString::new(fingerprint(password)));
        self
    }

    /// Stores a fingerprint computed elsewhere (lowercase SHA-256 hex).
    pub fn with_current_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.current_password_hash = Some(SecureString::new(hash.into().to_ascii_lowercase()));
        self
    }

    /// Returns true if `password` hashes to the stored current-password fingerprint.
    pub fn matches_current_password(&self, password: &str) -> bool {
        self.current_password_hash
            .as_ref()
            .is_some_and(|hash| hash.expose() == fingerprint(password))
    }
}

/// Lowercase SHA-256 hex digest of `value`.
pub fn fingerprint(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let digest = fingerprint("abc");
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_matches_current_password() {
        let ctx = UserContext::new().with_current_password("Old#Pass2023");
        assert!(ctx.matches_current_password("Old#Pass2023"));
        assert!(!ctx.matches_current_password("New#Pass2024"));
        assert!(!UserContext::new().matches_current_password("anything"));
    }

    #[test]
    fn test_precomputed_hash_is_case_insensitive() {
        let upper = fingerprint("Old#Pass2023").to_uppercase();
        let ctx = UserContext::new().with_current_password_hash(upper);
        assert!(ctx.matches_current_password("Old#Pass2023"));
    }

    #[test]
    fn test_debug_hides_hash() {
        let ctx = UserContext::new().with_current_password("secret");
        let debug = format!("{ctx:?}");
        assert!(!debug.contains(&fingerprint("secret")));
    }
}
