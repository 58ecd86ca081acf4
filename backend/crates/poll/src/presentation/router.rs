//! Poll Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tera::Tera;

use auth::application::config::AuthConfig;
use auth::domain::repository::{AuthSessionRepository, UserRepository};
use auth::infra::postgres::PgAuthRepository;

use crate::domain::repository::PollRepository;
use crate::infra::postgres::PgPollRepository;
use crate::presentation::handlers::{self, PollAppState};

/// Create the Poll router with PostgreSQL repositories
pub fn poll_router(
    polls: PgPollRepository,
    auth: PgAuthRepository,
    config: Arc<AuthConfig>,
    templates: Arc<Tera>,
) -> Router {
    poll_router_generic(polls, auth, config, templates)
}

/// Create a generic Poll router for any repository implementations
pub fn poll_router_generic<P, A>(
    polls: P,
    auth: A,
    config: Arc<AuthConfig>,
    templates: Arc<Tera>,
) -> Router
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = PollAppState {
        polls: Arc::new(polls),
        auth: Arc::new(auth),
        auth_config: config,
        templates,
    };

    Router::new()
        .route(
            "/polls",
            get(handlers::list_polls::<P, A>).post(handlers::create_poll::<P, A>),
        )
        .route("/polls/new", get(handlers::new_poll_page::<P, A>))
        .route("/polls/mine", get(handlers::my_polls_redirect::<P, A>))
        .route("/polls/mine/list", get(handlers::my_polls::<P, A>))
        .route("/polls/{id}", get(handlers::show_poll::<P, A>))
        .route("/polls/{id}/vote", post(handlers::vote::<P, A>))
        .route("/polls/{id}/options", post(handlers::add_option::<P, A>))
        .route("/polls/{id}/delete", post(handlers::delete_poll::<P, A>))
        .with_state(state)
}
