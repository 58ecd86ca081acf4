//! User Name Value Object
//!
//! The public handle a user registers and logs in with.
//!
//! ## Invariants
//! - NFKC-normalized, then trimmed
//! - Non-empty after trimming
//! - At most 64 characters
//! - No control characters
//! - Stored and compared case-sensitively; "Alice" and "alice" are
//!   distinct users

use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    /// User name is empty after normalization and trimming
    #[error("User name cannot be empty")]
    Empty,

    /// User name is too long
    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    /// User name contains control characters
    #[error("User name contains invalid control characters")]
    ContainsControl,
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    /// Create a user name from raw input
    ///
    /// Normalizes with NFKC, trims surrounding whitespace, and validates.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if trimmed.chars().any(|c| c.is_control()) {
            return Err(UserNameError::ContainsControl);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Reconstruct from a stored value (already validated at creation)
    pub fn from_db(stored: &str) -> Result<Self, UserNameError> {
        Self::new(stored)
    }

    /// The user name as stored
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let name = UserName::new("  alice  ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(UserName::new("").unwrap_err(), UserNameError::Empty);
        assert_eq!(UserName::new("   ").unwrap_err(), UserNameError::Empty);
        assert_eq!(UserName::new("\t\n").unwrap_err(), UserNameError::Empty);
    }

    #[test]
    fn test_case_is_preserved() {
        let upper = UserName::new("Alice").unwrap();
        let lower = UserName::new("alice").unwrap();
        assert_eq!(upper.as_str(), "Alice");
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_too_long_rejected() {
        let long = "x".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            UserName::new(&long).unwrap_err(),
            UserNameError::TooLong { .. }
        ));

        let exact = "x".repeat(USER_NAME_MAX_LENGTH);
        assert!(UserName::new(&exact).is_ok());
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(
            UserName::new("ali\u{0000}ce").unwrap_err(),
            UserNameError::ContainsControl
        );
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth "ａｌｉｃｅ" normalizes to "alice"
        let name = UserName::new("\u{ff41}\u{ff4c}\u{ff49}\u{ff43}\u{ff45}").unwrap();
        assert_eq!(name.as_str(), "alice");
    }
}
