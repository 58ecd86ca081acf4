//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;
use kernel::id::UserId;
use uuid::Uuid;

/// User repository trait (the credential store)
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user; fails with `UserNameTaken` on a duplicate name
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by user name (exact, case-sensitive)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID
    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    /// Update session (e.g., last activity)
    async fn update_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session; deleting an absent session is not an error
    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
