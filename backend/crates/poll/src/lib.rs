//! Poll Backend Module
//!
//! Poll lifecycle: create, vote, add options, delete, list.
//!
//! Clean Architecture structure:
//! - `domain/` - Poll entity, value objects, repository trait
//! - `application/` - Use cases, one per operation
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules of the domain
//! - A poll is created with at least two options; options are append-only
//! - Options are addressed by 0-based position; order is preserved
//! - Anyone may vote, any number of times; vote counts only ever grow
//! - Only the creator may delete a poll

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use domain::entity::poll::{Poll, PollOption};
pub use error::{PollError, PollResult};
pub use infra::postgres::PgPollRepository;
pub use presentation::router::poll_router;

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgPollRepository as PollStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
