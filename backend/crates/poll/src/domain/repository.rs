//! Repository Trait
//!
//! Interface for poll persistence. Implementation is in infrastructure layer.

use crate::domain::entity::poll::Poll;
use crate::domain::value_object::option_name::OptionName;
use crate::error::PollResult;
use kernel::id::{PollId, UserId};

/// Poll repository trait
#[trait_variant::make(PollRepository: Send)]
pub trait LocalPollRepository {
    /// Persist a new poll with its options
    async fn create(&self, poll: &Poll) -> PollResult<()>;

    /// Find a poll by ID with options in insertion order
    async fn find_by_id(&self, poll_id: &PollId) -> PollResult<Option<Poll>>;

    /// All polls, newest first
    async fn list_all(&self) -> PollResult<Vec<Poll>>;

    /// Polls created by `owner`, newest first
    async fn list_by_owner(&self, owner: &UserId) -> PollResult<Vec<Poll>>;

    /// Atomically add one vote to the option at `option_index`
    ///
    /// This must be a single counter update at the store - not a
    /// read-modify-write of the poll - so concurrent votes are never
    /// lost. Returns false if no such poll/option row exists.
    async fn increment_vote(&self, poll_id: &PollId, option_index: usize) -> PollResult<bool>;

    /// Append a new option with zero votes; returns its position
    async fn append_option(&self, poll_id: &PollId, name: &OptionName) -> PollResult<usize>;

    /// Delete a poll and its options; returns false if it did not exist
    async fn delete(&self, poll_id: &PollId) -> PollResult<bool>;
}
