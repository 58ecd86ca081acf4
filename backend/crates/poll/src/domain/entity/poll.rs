//! Poll Entity

use chrono::{DateTime, Utc};
use kernel::id::{PollId, UserId};

use crate::domain::value_object::{option_name::OptionName, poll_title::PollTitle};
use crate::error::{PollError, PollResult};

/// Minimum number of options a poll is created with
pub const MIN_POLL_OPTIONS: usize = 2;

/// A single choice within a poll
///
/// Options are addressed by their 0-based position in the poll's option
/// list; they carry no identity of their own. Counters start at zero and
/// only ever grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub name: OptionName,
    pub votes: i64,
}

impl PollOption {
    /// A fresh option with no votes
    pub fn new(name: OptionName) -> Self {
        Self { name, votes: 0 }
    }
}

/// Poll entity
#[derive(Debug, Clone)]
pub struct Poll {
    pub poll_id: PollId,
    pub title: PollTitle,
    /// Ordered; position is the public voting selector
    pub options: Vec<PollOption>,
    /// The creating user; gates deletion
    pub created_by: UserId,
    /// Immutable; listings sort by this, newest first
    pub created_at: DateTime<Utc>,
}

impl Poll {
    /// Create a new poll
    ///
    /// Rejects fewer than [`MIN_POLL_OPTIONS`] options. All counters
    /// start at zero.
    pub fn new(
        title: PollTitle,
        option_names: Vec<OptionName>,
        created_by: UserId,
    ) -> PollResult<Self> {
        if option_names.len() < MIN_POLL_OPTIONS {
            return Err(PollError::Validation(format!(
                "A poll needs at least {} options",
                MIN_POLL_OPTIONS
            )));
        }

        Ok(Self {
            poll_id: PollId::new(),
            title,
            options: option_names.into_iter().map(PollOption::new).collect(),
            created_by,
            created_at: Utc::now(),
        })
    }

    /// Number of options
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Whether `index` addresses an existing option
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }

    /// Sum of all option counters
    pub fn total_votes(&self) -> i64 {
        self.options.iter().map(|o| o.votes).sum()
    }

    /// Whether `user_id` created this poll
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.created_by == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(s: &str) -> PollTitle {
        PollTitle::new(s).unwrap()
    }

    fn names(raw: &[&str]) -> Vec<OptionName> {
        raw.iter().map(|s| OptionName::new(s).unwrap()).collect()
    }

    #[test]
    fn test_new_poll_starts_with_zero_votes() {
        let poll = Poll::new(title("Lunch"), names(&["Pizza", "Tacos"]), UserId::new()).unwrap();
        assert_eq!(poll.option_count(), 2);
        assert!(poll.options.iter().all(|o| o.votes == 0));
        assert_eq!(poll.total_votes(), 0);
    }

    #[test]
    fn test_too_few_options_rejected() {
        let err = Poll::new(title("Lunch"), names(&["Pizza"]), UserId::new()).unwrap_err();
        assert!(matches!(err, PollError::Validation(_)));

        let err = Poll::new(title("Lunch"), vec![], UserId::new()).unwrap_err();
        assert!(matches!(err, PollError::Validation(_)));
    }

    #[test]
    fn test_has_option_bounds() {
        let poll = Poll::new(title("Lunch"), names(&["A", "B", "C"]), UserId::new()).unwrap();
        assert!(poll.has_option(0));
        assert!(poll.has_option(2));
        assert!(!poll.has_option(3));
    }

    #[test]
    fn test_ownership() {
        let owner = UserId::new();
        let poll = Poll::new(title("Lunch"), names(&["A", "B"]), owner).unwrap();
        assert!(poll.is_owned_by(&owner));
        assert!(!poll.is_owned_by(&UserId::new()));
    }
}
