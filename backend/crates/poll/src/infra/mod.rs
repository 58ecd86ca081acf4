//! Infrastructure Layer
//!
//! PostgreSQL implementation of the poll repository.

pub mod postgres;
