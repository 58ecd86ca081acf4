//! Vote Use Case
//!
//! Anonymous voting is allowed, and nothing stops a caller voting
//! repeatedly; the poll is trust-based by design. The counter update is
//! a single atomic increment at the store so concurrent votes on the
//! same option are never lost.

use std::sync::Arc;

use auth::domain::identity::Identity;
use kernel::id::PollId;

use crate::domain::entity::poll::Poll;
use crate::domain::repository::PollRepository;
use crate::error::{PollError, PollResult};

/// Vote use case
pub struct VoteUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> VoteUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    /// Cast one vote for the option at `raw_option_index` (form input,
    /// may be non-numeric)
    pub async fn execute(
        &self,
        identity: &Identity,
        poll_id: &PollId,
        raw_option_index: &str,
    ) -> PollResult<Poll> {
        let poll = self
            .poll_repo
            .find_by_id(poll_id)
            .await?
            .ok_or(PollError::NotFound)?;

        let option_index: usize = raw_option_index
            .trim()
            .parse()
            .map_err(|_| PollError::Validation("Invalid option".to_string()))?;

        if !poll.has_option(option_index) {
            return Err(PollError::Validation("Invalid option".to_string()));
        }

        // Atomic at the store; the read above was only for validation
        let updated = self.poll_repo.increment_vote(poll_id, option_index).await?;
        if !updated {
            // The poll vanished between the read and the increment
            return Err(PollError::NotFound);
        }

        match identity.current_user() {
            Some(user) => tracing::debug!(
                poll_id = %poll_id,
                option_index,
                user_id = %user.user_id,
                "Vote recorded"
            ),
            None => tracing::debug!(poll_id = %poll_id, option_index, "Anonymous vote recorded"),
        }

        self.poll_repo
            .find_by_id(poll_id)
            .await?
            .ok_or(PollError::NotFound)
    }
}
