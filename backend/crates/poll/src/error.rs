//! Poll Error Types
//!
//! Poll-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Redirect, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use auth::error::AuthError;

/// Poll-specific result type alias
pub type PollResult<T> = Result<T, PollError>;

/// Poll-specific error variants
#[derive(Debug, Error)]
pub enum PollError {
    /// Malformed or missing input (blank title, too few options, bad index)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Poll does not exist
    #[error("Poll not found")]
    NotFound,

    /// Caller is not the poll's creator
    #[error("Not allowed")]
    Forbidden,

    /// Operation requires an authenticated identity
    #[error("Authentication required")]
    Unauthorized,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PollError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::Validation(_) => ErrorKind::BadRequest,
            PollError::NotFound => ErrorKind::NotFound,
            PollError::Forbidden => ErrorKind::Forbidden,
            PollError::Unauthorized => ErrorKind::Unauthorized,
            PollError::Database(_) | PollError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PollError::Database(e) => {
                tracing::error!(error = %e, "Poll database error");
            }
            PollError::Internal(msg) => {
                tracing::error!(message = %msg, "Poll internal error");
            }
            PollError::Forbidden => {
                tracing::warn!("Rejected operation on another user's poll");
            }
            _ => {
                tracing::debug!(error = %self, "Poll error");
            }
        }
    }
}

impl IntoResponse for PollError {
    fn into_response(self) -> Response {
        self.log();
        if matches!(self, PollError::Unauthorized) {
            // Unauthenticated writes are not an error page; the caller is
            // sent to the login form instead.
            return Redirect::to("/login").into_response();
        }
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for PollError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SessionRequired
            | AuthError::SessionInvalid
            | AuthError::InvalidCredentials => PollError::Unauthorized,
            AuthError::Validation(msg) => PollError::Validation(msg),
            AuthError::Database(e) => PollError::Database(e),
            other => PollError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            PollError::Validation("x".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(PollError::NotFound.kind(), ErrorKind::NotFound);
        assert_eq!(PollError::Forbidden.kind(), ErrorKind::Forbidden);
        assert_eq!(PollError::Unauthorized.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            PollError::Internal("x".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_auth_error_conversion() {
        assert!(matches!(
            PollError::from(AuthError::SessionRequired),
            PollError::Unauthorized
        ));
        assert!(matches!(
            PollError::from(AuthError::Validation("bad".into())),
            PollError::Validation(_)
        ));
    }
}
