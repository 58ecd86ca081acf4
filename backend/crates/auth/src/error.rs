//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Redirect, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or missing input (empty username, empty password, ...)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// User name already exists
    #[error("User already exists")]
    UserNameTaken,

    /// Invalid credentials (unknown user or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session not found, expired, or carrying a bad signature
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Operation requires an authenticated identity
    #[error("Authentication required")]
    SessionRequired,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            // Duplicate users surface as a plain 400, matching the
            // public contract of the registration form.
            AuthError::Validation(_) | AuthError::UserNameTaken => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionRequired => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Whether this error renders as a redirect to the login form
    /// rather than an error page
    fn redirects_to_login(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::SessionInvalid | AuthError::SessionRequired
        )
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        if self.redirects_to_login() {
            // Failed logins and unauthenticated writes go back to the
            // login form with no detail about what was wrong.
            return Redirect::to("/login").into_response();
        }
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
