//! Unit tests for the auth use cases
//!
//! Driven against an in-memory repository so the register/login/logout
//! state machine is exercised without a database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::UserId;
use uuid::Uuid;

use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase, ResolveSessionUseCase,
    config::AuthConfig, token,
};
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::identity::Identity;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Clone, Default)]
struct MemoryAuthRepo {
    users: Arc<Mutex<Vec<User>>>,
    sessions: Arc<Mutex<HashMap<Uuid, AuthSession>>>,
}

impl MemoryAuthRepo {
    fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl UserRepository for MemoryAuthRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.user_id == user_id)
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.user_name == user_name)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| &u.user_name == user_name))
    }
}

impl AuthSessionRepository for MemoryAuthRepo {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        Ok(self.sessions.lock().unwrap().get(&session_id).cloned())
    }

    async fn update_session(&self, session: &AuthSession) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        self.sessions.lock().unwrap().remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - sessions.len()) as u64)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn setup() -> (Arc<MemoryAuthRepo>, Arc<AuthConfig>) {
    (
        Arc::new(MemoryAuthRepo::default()),
        Arc::new(AuthConfig::development()),
    )
}

async fn register(
    repo: &Arc<MemoryAuthRepo>,
    config: &Arc<AuthConfig>,
    user_name: &str,
    password: &str,
) -> AuthResult<User> {
    RegisterUseCase::new(repo.clone(), config.clone())
        .execute(RegisterInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        })
        .await
}

async fn login(
    repo: &Arc<MemoryAuthRepo>,
    config: &Arc<AuthConfig>,
    user_name: &str,
    password: &str,
) -> AuthResult<String> {
    LoginUseCase::new(repo.clone(), repo.clone(), config.clone())
        .execute(LoginInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        })
        .await
        .map(|out| out.session_token)
}

async fn resolve(
    repo: &Arc<MemoryAuthRepo>,
    config: &Arc<AuthConfig>,
    token: Option<&str>,
) -> Identity {
    ResolveSessionUseCase::new(repo.clone(), repo.clone(), config.clone())
        .resolve(token)
        .await
        .unwrap()
}

// ============================================================================
// Register
// ============================================================================

#[tokio::test]
async fn register_then_login_succeeds() {
    let (repo, config) = setup();

    register(&repo, &config, "alice", "pw1").await.unwrap();
    let token = login(&repo, &config, "alice", "pw1").await.unwrap();

    let identity = resolve(&repo, &config, Some(&token)).await;
    let user = identity.require_authenticated().unwrap();
    assert_eq!(user.user_name.as_str(), "alice");
}

#[tokio::test]
async fn duplicate_register_fails_regardless_of_password() {
    let (repo, config) = setup();

    register(&repo, &config, "alice", "pw1").await.unwrap();
    let err = register(&repo, &config, "alice", "completely different")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::UserNameTaken));
    assert_eq!(repo.user_count(), 1);
}

#[tokio::test]
async fn register_trims_user_name_before_uniqueness_check() {
    let (repo, config) = setup();

    register(&repo, &config, "alice", "pw1").await.unwrap();
    let err = register(&repo, &config, "  alice  ", "pw2").await.unwrap_err();

    assert!(matches!(err, AuthError::UserNameTaken));
}

#[tokio::test]
async fn register_rejects_blank_fields() {
    let (repo, config) = setup();

    let err = register(&repo, &config, "   ", "pw1").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    let err = register(&repo, &config, "alice", "").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));

    assert_eq!(repo.user_count(), 0);
}

#[tokio::test]
async fn stored_hash_is_not_the_plaintext() {
    let (repo, config) = setup();

    let user = register(&repo, &config, "alice", "pw1").await.unwrap();
    assert_ne!(user.password_hash.as_str(), "pw1");
    assert!(user.password_hash.as_str().starts_with("$argon2"));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_unknown_user_fails() {
    let (repo, config) = setup();

    let err = login(&repo, &config, "nobody", "pw1").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(repo.session_count(), 0);
}

#[tokio::test]
async fn login_wrong_password_fails() {
    let (repo, config) = setup();

    register(&repo, &config, "alice", "pw1").await.unwrap();
    let err = login(&repo, &config, "alice", "wrong").await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(repo.session_count(), 0);
}

#[tokio::test]
async fn user_names_are_case_sensitive() {
    let (repo, config) = setup();

    register(&repo, &config, "alice", "pw1").await.unwrap();
    let err = login(&repo, &config, "Alice", "pw1").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

// ============================================================================
// Session resolution
// ============================================================================

#[tokio::test]
async fn missing_token_resolves_to_anonymous() {
    let (repo, config) = setup();
    let identity = resolve(&repo, &config, None).await;
    assert!(!identity.is_authenticated());
}

#[tokio::test]
async fn garbled_token_resolves_to_anonymous() {
    let (repo, config) = setup();
    let identity = resolve(&repo, &config, Some("garbage")).await;
    assert!(!identity.is_authenticated());

    let identity = resolve(&repo, &config, Some("aaaa.bbbb")).await;
    assert!(!identity.is_authenticated());
}

#[tokio::test]
async fn token_signed_with_other_secret_resolves_to_anonymous() {
    let (repo, config) = setup();

    register(&repo, &config, "alice", "pw1").await.unwrap();
    let token = login(&repo, &config, "alice", "pw1").await.unwrap();

    let other = Arc::new(AuthConfig::development());
    let identity = resolve(&repo, &other, Some(&token)).await;
    assert!(!identity.is_authenticated());
}

#[tokio::test]
async fn expired_session_resolves_to_anonymous_and_is_deleted() {
    let (repo, config) = setup();

    let user = register(&repo, &config, "alice", "pw1").await.unwrap();

    let session = AuthSession::new(user.user_id, chrono::Duration::seconds(-1));
    AuthSessionRepository::create(&*repo, &session).await.unwrap();
    let stale = token::sign_session_token(&config.session_secret, session.session_id);

    let identity = resolve(&repo, &config, Some(&stale)).await;
    assert!(!identity.is_authenticated());
    assert_eq!(repo.session_count(), 0);
}

#[tokio::test]
async fn cleanup_sweeps_only_expired_sessions() {
    let (repo, config) = setup();

    let user = register(&repo, &config, "alice", "pw1").await.unwrap();
    login(&repo, &config, "alice", "pw1").await.unwrap();

    let stale = AuthSession::new(user.user_id, chrono::Duration::seconds(-1));
    AuthSessionRepository::create(&*repo, &stale).await.unwrap();

    let swept = repo.cleanup_expired().await.unwrap();
    assert_eq!(swept, 1);
    assert_eq!(repo.session_count(), 1);
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn logout_destroys_the_session() {
    let (repo, config) = setup();

    register(&repo, &config, "alice", "pw1").await.unwrap();
    let token = login(&repo, &config, "alice", "pw1").await.unwrap();

    let logout = LogoutUseCase::new(repo.clone(), config.clone());
    logout.execute(&token).await.unwrap();

    let identity = resolve(&repo, &config, Some(&token)).await;
    assert!(!identity.is_authenticated());
    assert_eq!(repo.session_count(), 0);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let (repo, config) = setup();

    register(&repo, &config, "alice", "pw1").await.unwrap();
    let token = login(&repo, &config, "alice", "pw1").await.unwrap();

    let logout = LogoutUseCase::new(repo.clone(), config.clone());
    logout.execute(&token).await.unwrap();
    logout.execute(&token).await.unwrap();
    logout.execute("not even a token").await.unwrap();
}
