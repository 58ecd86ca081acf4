//! Delete Poll Use Case
//!
//! Only the creating user may delete a poll.

use std::sync::Arc;

use auth::domain::identity::Identity;
use kernel::id::PollId;

use crate::domain::repository::PollRepository;
use crate::error::{PollError, PollResult};

/// Delete poll use case
pub struct DeletePollUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> DeletePollUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    pub async fn execute(&self, identity: &Identity, poll_id: &PollId) -> PollResult<()> {
        let user = identity.require_authenticated()?;

        let poll = self
            .poll_repo
            .find_by_id(poll_id)
            .await?
            .ok_or(PollError::NotFound)?;

        if !poll.is_owned_by(&user.user_id) {
            return Err(PollError::Forbidden);
        }

        self.poll_repo.delete(poll_id).await?;

        tracing::info!(
            poll_id = %poll_id,
            user_id = %user.user_id,
            "Poll deleted"
        );

        Ok(())
    }
}
