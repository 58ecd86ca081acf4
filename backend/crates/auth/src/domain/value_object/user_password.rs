//! User Password Value Object
//!
//! Domain value object for user passwords. Delegates to
//! `platform::password` for the cryptographic operations.
//!
//! Any non-empty password is accepted for registration; there is no
//! complexity policy. Verification goes through the Argon2 verifier,
//! never string equality.

use std::fmt;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Wrapper around `ClearTextPassword` with domain-specific error handling.
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password with validation
    ///
    /// Rejects empty/whitespace-only input, control characters, and
    /// absurdly long input. Unicode is NFKC-normalized first.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text =
            ClearTextPassword::new(raw).map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(Self(clear_text))
    }

    /// Access the inner ClearTextPassword
    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Stored Hash)
// ============================================================================

/// Stored password hash (Argon2id, PHC string format)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password for storage
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        let hashed = raw
            .inner()
            .hash(pepper)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        Ok(Self(hashed))
    }

    /// Reconstruct from a stored PHC string
    pub fn from_db(phc: String) -> AuthResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;
        Ok(Self(hashed))
    }

    /// The PHC string for storage
    pub fn as_str(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (constant-time)
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verify_round_trip() {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, None).unwrap();

        assert!(stored.verify(&raw, None));

        let wrong = RawPassword::new("not it".to_string()).unwrap();
        assert!(!stored.verify(&wrong, None));
    }

    #[test]
    fn test_empty_password_is_validation_error() {
        let err = RawPassword::new("".to_string()).unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[test]
    fn test_round_trips_through_storage() {
        let raw = RawPassword::new("pw1".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, None).unwrap();

        let reloaded = UserPassword::from_db(stored.as_str().to_string()).unwrap();
        assert!(reloaded.verify(&raw, None));
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let raw = RawPassword::new("sekrit".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("sekrit"));
    }
}
