//! Logout Use Case
//!
//! Invalidates a user session. Idempotent: logging out with a missing,
//! garbled, or already-destroyed session succeeds.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        // A token that does not verify names no live session; nothing to do.
        let Ok(session_id) = token::parse_session_token(&self.config.session_secret, session_token)
        else {
            return Ok(());
        };

        self.session_repo.delete_session(session_id).await?;

        tracing::info!(session_id = %session_id, "User logged out");
        Ok(())
    }
}
