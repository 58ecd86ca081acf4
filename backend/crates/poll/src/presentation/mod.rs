//! Presentation Layer
//!
//! HTTP handlers, DTOs/views, and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PollAppState;
pub use router::{poll_router, poll_router_generic};
