//! Request Identity
//!
//! The resolved caller of an operation: a known user or anonymous.
//! Every workflow operation takes an [`Identity`] explicitly; there is
//! no ambient request-scoped user state.

use derive_more::Display;
use kernel::id::UserId;

use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// The authenticated user behind a request
#[derive(Debug, Clone, Display)]
#[display("{user_name} ({user_id})")]
pub struct CurrentUser {
    pub user_id: UserId,
    pub user_name: UserName,
}

/// Resolved request identity
///
/// `Anonymous` is a valid state, not an error: read-only operations and
/// voting accept it. Write operations call [`Identity::require_authenticated`].
#[derive(Debug, Clone)]
pub enum Identity {
    Anonymous,
    Authenticated(CurrentUser),
}

impl Identity {
    /// True if this identity belongs to a logged-in user
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    /// The current user, if any
    pub fn current_user(&self) -> Option<&CurrentUser> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(user) => Some(user),
        }
    }

    /// Guard for write operations: anonymous callers are rejected
    /// (rendered as a redirect to the login form).
    pub fn require_authenticated(&self) -> AuthResult<&CurrentUser> {
        self.current_user().ok_or(AuthError::SessionRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> CurrentUser {
        CurrentUser {
            user_id: UserId::new(),
            user_name: UserName::new("alice").unwrap(),
        }
    }

    #[test]
    fn test_anonymous_is_not_authenticated() {
        let identity = Identity::Anonymous;
        assert!(!identity.is_authenticated());
        assert!(identity.current_user().is_none());
        assert!(matches!(
            identity.require_authenticated(),
            Err(AuthError::SessionRequired)
        ));
    }

    #[test]
    fn test_authenticated_passes_guard() {
        let identity = Identity::Authenticated(alice());
        assert!(identity.is_authenticated());
        let user = identity.require_authenticated().unwrap();
        assert_eq!(user.user_name.as_str(), "alice");
    }
}
