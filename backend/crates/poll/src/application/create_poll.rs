//! Create Poll Use Case

use std::sync::Arc;

use auth::domain::identity::Identity;

use crate::domain::entity::poll::Poll;
use crate::domain::repository::PollRepository;
use crate::domain::value_object::{option_name::OptionName, poll_title::PollTitle};
use crate::error::{PollError, PollResult};

/// Create poll input
pub struct CreatePollInput {
    pub title: String,
    /// Newline-separated option names, as submitted by the textarea
    pub options_text: String,
}

/// Create poll use case
pub struct CreatePollUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> CreatePollUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    pub async fn execute(&self, identity: &Identity, input: CreatePollInput) -> PollResult<Poll> {
        let creator = identity.require_authenticated()?;

        let title =
            PollTitle::new(&input.title).map_err(|e| PollError::Validation(e.to_string()))?;
        let option_names = OptionName::parse_block(&input.options_text)
            .map_err(|e| PollError::Validation(e.to_string()))?;

        // Enforces the minimum option count; nothing is persisted on failure
        let poll = Poll::new(title, option_names, creator.user_id)?;

        self.poll_repo.create(&poll).await?;

        tracing::info!(
            poll_id = %poll.poll_id,
            user_id = %creator.user_id,
            options = poll.option_count(),
            "Poll created"
        );

        Ok(poll)
    }
}
