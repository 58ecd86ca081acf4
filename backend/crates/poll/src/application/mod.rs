//! Application Layer
//!
//! Use cases, one per poll operation. Every use case takes the caller's
//! resolved [`auth::Identity`] explicitly; nothing reads ambient
//! request state.

pub mod add_option;
pub mod create_poll;
pub mod delete_poll;
pub mod get_poll;
pub mod list_polls;
pub mod vote;

// Re-exports
pub use add_option::AddOptionUseCase;
pub use create_poll::{CreatePollInput, CreatePollUseCase};
pub use delete_poll::DeletePollUseCase;
pub use get_poll::GetPollUseCase;
pub use list_polls::ListPollsUseCase;
pub use vote::VoteUseCase;
