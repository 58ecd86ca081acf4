//! Form DTOs for the auth pages

use serde::Deserialize;

/// Registration form fields
///
/// Fields default to empty so a missing field fails validation (400)
/// instead of being rejected as an unreadable form.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login form fields
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
