//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

/// User entity
///
/// A registered account: identity, unique user name, and the salted
/// password hash used for login. Users are immutable after creation;
/// no update or delete operations are exposed.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique, for login and display)
    pub user_name: UserName,
    /// Argon2id hash of the password (PHC string format)
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
