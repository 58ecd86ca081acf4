//! Resolve Session Use Case
//!
//! Translates the session cookie (if any) into a request [`Identity`].
//! Missing, forged, or expired tokens resolve to `Anonymous` - a valid
//! state, not an error. Store failures are errors and propagate.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::identity::{CurrentUser, Identity};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthResult;

/// Resolve session use case
pub struct ResolveSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> ResolveSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Resolve an optional session token into an identity
    pub async fn resolve(&self, session_token: Option<&str>) -> AuthResult<Identity> {
        let Some(session_token) = session_token else {
            return Ok(Identity::Anonymous);
        };

        let Ok(session_id) =
            token::parse_session_token(&self.config.session_secret, session_token)
        else {
            return Ok(Identity::Anonymous);
        };

        let Some(session) = self.session_repo.find_session(session_id).await? else {
            return Ok(Identity::Anonymous);
        };

        if session.is_expired() {
            self.session_repo.delete_session(session_id).await?;
            return Ok(Identity::Anonymous);
        }

        let Some(user) = self.user_repo.find_by_id(&session.user_id).await? else {
            // Session outlived its user; drop it.
            self.session_repo.delete_session(session_id).await?;
            return Ok(Identity::Anonymous);
        };

        // Update last activity in the background
        let mut session = session;
        session.touch();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update_session(&session).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(Identity::Authenticated(CurrentUser {
            user_id: user.user_id,
            user_name: user.user_name,
        }))
    }
}
