//! Add Option Use Case
//!
//! Authenticated users may append a choice to any poll when they don't
//! like the existing ones. Options are append-only; nothing is ever
//! removed or reordered, so existing positions stay valid.

use std::sync::Arc;

use auth::domain::identity::Identity;
use kernel::id::PollId;

use crate::domain::entity::poll::Poll;
use crate::domain::repository::PollRepository;
use crate::domain::value_object::option_name::OptionName;
use crate::error::{PollError, PollResult};

/// Add option use case
pub struct AddOptionUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> AddOptionUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    pub async fn execute(
        &self,
        identity: &Identity,
        poll_id: &PollId,
        raw_name: &str,
    ) -> PollResult<Poll> {
        let user = identity.require_authenticated()?;

        let poll = self
            .poll_repo
            .find_by_id(poll_id)
            .await?
            .ok_or(PollError::NotFound)?;

        let name =
            OptionName::new(raw_name).map_err(|e| PollError::Validation(e.to_string()))?;

        let index = self.poll_repo.append_option(poll_id, &name).await?;

        tracing::info!(
            poll_id = %poll.poll_id,
            user_id = %user.user_id,
            option_index = index,
            "Option added"
        );

        self.poll_repo
            .find_by_id(poll_id)
            .await?
            .ok_or(PollError::NotFound)
    }
}
