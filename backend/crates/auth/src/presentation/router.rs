//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tera::Tera;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>, templates: Arc<Tera>) -> Router {
    auth_router_generic(repo, config, templates)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: Arc<AuthConfig>, templates: Arc<Tera>) -> Router
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
        templates,
    };

    Router::new()
        .route(
            "/register",
            get(handlers::register_page::<R>).post(handlers::register::<R>),
        )
        .route(
            "/login",
            get(handlers::login_page::<R>).post(handlers::login::<R>),
        )
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}
