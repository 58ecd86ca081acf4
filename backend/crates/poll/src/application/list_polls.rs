//! List Polls Use Cases
//!
//! Listings are sorted by creation time, newest first. Ties fall back
//! to the poll ID so the order is stable across reads.

use std::sync::Arc;

use auth::domain::identity::Identity;

use crate::domain::entity::poll::Poll;
use crate::domain::repository::PollRepository;
use crate::error::PollResult;

/// List polls use case
pub struct ListPollsUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> ListPollsUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    /// All polls; no authentication required
    pub async fn all(&self) -> PollResult<Vec<Poll>> {
        self.poll_repo.list_all().await
    }

    /// Polls created by the caller; requires an authenticated identity
    pub async fn owned_by(&self, identity: &Identity) -> PollResult<Vec<Poll>> {
        let user = identity.require_authenticated()?;
        self.poll_repo.list_by_owner(&user.user_id).await
    }
}
