//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, salted, constant-time verification)
//! - Cookie management

pub mod cookie;
pub mod password;
