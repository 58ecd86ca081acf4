//! Get Poll Use Case

use std::sync::Arc;

use kernel::id::PollId;

use crate::domain::entity::poll::Poll;
use crate::domain::repository::PollRepository;
use crate::error::{PollError, PollResult};

/// Get poll use case (no authentication required)
pub struct GetPollUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> GetPollUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    pub async fn execute(&self, poll_id: &PollId) -> PollResult<Poll> {
        self.poll_repo
            .find_by_id(poll_id)
            .await?
            .ok_or(PollError::NotFound)
    }
}
