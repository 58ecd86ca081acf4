//! Poll Title Value Object

use std::fmt;
use thiserror::Error;

/// Maximum length for a poll title (in characters)
pub const POLL_TITLE_MAX_LENGTH: usize = 200;

/// Error returned when poll title validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollTitleError {
    /// Title is empty after trimming
    #[error("Poll title cannot be empty")]
    Empty,

    /// Title is too long
    #[error("Poll title is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },
}

/// Validated poll title (trimmed, non-empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTitle(String);

impl PollTitle {
    /// Create a title from raw input, trimming surrounding whitespace
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PollTitleError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(PollTitleError::Empty);
        }

        let length = trimmed.chars().count();
        if length > POLL_TITLE_MAX_LENGTH {
            return Err(PollTitleError::TooLong {
                length,
                max: POLL_TITLE_MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Reconstruct from a stored value
    pub fn from_db(stored: &str) -> Result<Self, PollTitleError> {
        Self::new(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PollTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
