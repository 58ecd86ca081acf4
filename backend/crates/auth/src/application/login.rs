//! Login Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use chrono::Duration;
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    /// Signed session token for the cookie
    pub session_token: String,
    pub user_id: UserId,
}

/// Login use case
pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // An unparseable user name can't match a stored one; fold it into
        // the generic failure so the response never says which field was wrong.
        let user_name =
            UserName::new(&input.user_name).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self.user_repo.find_by_user_name(&user_name).await?;
        let Some(user) = user else {
            tracing::warn!(user_name = %user_name, "Login failed: user not found");
            return Err(AuthError::InvalidCredentials);
        };

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(user_id = %user.user_id, "Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        // Create session
        let ttl = Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        let session = AuthSession::new(user.user_id, ttl);

        self.session_repo.create(&session).await?;

        let session_token = token::sign_session_token(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User logged in"
        );

        Ok(LoginOutput {
            session_token,
            user_id: user.user_id,
        })
    }
}
