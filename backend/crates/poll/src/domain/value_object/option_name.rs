//! Option Name Value Object
//!
//! A single poll choice. Also hosts the parser for the "one option per
//! line" textarea the create form submits.

use std::fmt;
use thiserror::Error;

/// Maximum length for an option name (in characters)
pub const OPTION_NAME_MAX_LENGTH: usize = 120;

/// Error returned when option name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionNameError {
    /// Name is empty after trimming
    #[error("Option name cannot be empty")]
    Empty,

    /// Name is too long
    #[error("Option name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },
}

/// Validated option name (trimmed, non-empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionName(String);

impl OptionName {
    /// Create an option name from raw input, trimming surrounding whitespace
    pub fn new(raw: impl AsRef<str>) -> Result<Self, OptionNameError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(OptionNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > OPTION_NAME_MAX_LENGTH {
            return Err(OptionNameError::TooLong {
                length,
                max: OPTION_NAME_MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Parse a newline-separated block of option names
    ///
    /// Each line is trimmed (which also strips any `\r` from CRLF input);
    /// blank lines are discarded. Order is preserved and duplicates are
    /// allowed - two options may share a name, they are still addressed
    /// by position.
    pub fn parse_block(raw: &str) -> Result<Vec<OptionName>, OptionNameError> {
        raw.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(OptionName::new)
            .collect()
    }

    /// Reconstruct from a stored value
    pub fn from_db(stored: &str) -> Result<Self, OptionNameError> {
        Self::new(stored)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rejected() {
        assert_eq!(OptionName::new("").unwrap_err(), OptionNameError::Empty);
        assert_eq!(OptionName::new("  ").unwrap_err(), OptionNameError::Empty);
    }

    #[test]
    fn test_parse_block_preserves_order() {
        let names = OptionName::parse_block("Pizza\nTacos\nSushi").unwrap();
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Tacos", "Sushi"]);
    }

    #[test]
    fn test_parse_block_trims_and_drops_blanks() {
        let names = OptionName::parse_block("  Pizza  \n\n   \nTacos\n").unwrap();
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Tacos"]);
    }

    #[test]
    fn test_parse_block_handles_crlf() {
        let names = OptionName::parse_block("Pizza\r\nTacos\r\n").unwrap();
        let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Pizza", "Tacos"]);
    }

    #[test]
    fn test_parse_block_allows_duplicates() {
        let names = OptionName::parse_block("Yes\nYes").unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0], names[1]);
    }

    #[test]
    fn test_parse_block_empty_input() {
        assert!(OptionName::parse_block("").unwrap().is_empty());
        assert!(OptionName::parse_block("\n\n").unwrap().is_empty());
    }
}
