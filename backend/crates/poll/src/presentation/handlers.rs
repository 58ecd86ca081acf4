//! HTTP Handlers
//!
//! Each handler resolves the session cookie to an [`Identity`] and
//! passes it explicitly into the use case; authorization lives in the
//! application layer, not in middleware.

use axum::extract::{Form, Path, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::sync::Arc;
use tera::{Context, Tera};

use auth::application::config::AuthConfig;
use auth::domain::identity::Identity;
use auth::domain::repository::{AuthSessionRepository, UserRepository};
use auth::presentation::handlers::resolve_identity;
use kernel::id::PollId;

use crate::application::{
    AddOptionUseCase, CreatePollInput, CreatePollUseCase, DeletePollUseCase, GetPollUseCase,
    ListPollsUseCase, VoteUseCase,
};
use crate::domain::repository::PollRepository;
use crate::error::{PollError, PollResult};
use crate::presentation::dto::{AddOptionForm, NewPollForm, PollView, VoteForm};

/// Shared state for poll handlers
///
/// Carries the poll store plus the auth store the session cookie is
/// resolved against.
#[derive(Clone)]
pub struct PollAppState<P, A>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub polls: Arc<P>,
    pub auth: Arc<A>,
    pub auth_config: Arc<AuthConfig>,
    pub templates: Arc<Tera>,
}

impl<P, A> PollAppState<P, A>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    async fn identity(&self, headers: &HeaderMap) -> PollResult<Identity> {
        Ok(resolve_identity(&self.auth, &self.auth_config, headers).await?)
    }
}

fn parse_poll_id(raw: &str) -> PollResult<PollId> {
    // A string that is not a UUID cannot name an existing poll
    PollId::parse_str(raw).map_err(|_| PollError::NotFound)
}

fn render(templates: &Tera, name: &str, ctx: &Context) -> PollResult<Html<String>> {
    templates
        .render(name, ctx)
        .map(Html)
        .map_err(|e| PollError::Internal(format!("Template error: {e}")))
}

fn base_context(identity: &Identity) -> Context {
    let mut ctx = Context::new();
    ctx.insert(
        "user",
        &identity.current_user().map(|u| u.user_name.to_string()),
    );
    ctx
}

// ============================================================================
// Listings
// ============================================================================

/// GET /polls
pub async fn list_polls<P, A>(
    State(state): State<PollAppState<P, A>>,
    headers: HeaderMap,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;

    let polls = ListPollsUseCase::new(state.polls.clone()).all().await?;

    let mut ctx = base_context(&identity);
    ctx.insert("polls", &PollView::from_polls(&polls, &identity));
    Ok(render(&state.templates, "index.html", &ctx)?.into_response())
}

/// GET /polls/mine/list
pub async fn my_polls<P, A>(
    State(state): State<PollAppState<P, A>>,
    headers: HeaderMap,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;

    let polls = ListPollsUseCase::new(state.polls.clone())
        .owned_by(&identity)
        .await?;

    let mut ctx = base_context(&identity);
    ctx.insert("polls", &PollView::from_polls(&polls, &identity));
    Ok(render(&state.templates, "my_polls.html", &ctx)?.into_response())
}

/// GET /polls/mine, short link for convenience
pub async fn my_polls_redirect<P, A>(
    State(state): State<PollAppState<P, A>>,
    headers: HeaderMap,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;
    identity.require_authenticated()?;

    Ok(Redirect::to("/polls/mine/list").into_response())
}

// ============================================================================
// Create
// ============================================================================

/// GET /polls/new
pub async fn new_poll_page<P, A>(
    State(state): State<PollAppState<P, A>>,
    headers: HeaderMap,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;
    identity.require_authenticated()?;

    let ctx = base_context(&identity);
    Ok(render(&state.templates, "new_poll.html", &ctx)?.into_response())
}

/// POST /polls
pub async fn create_poll<P, A>(
    State(state): State<PollAppState<P, A>>,
    headers: HeaderMap,
    Form(form): Form<NewPollForm>,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;

    let poll = CreatePollUseCase::new(state.polls.clone())
        .execute(
            &identity,
            CreatePollInput {
                title: form.title,
                options_text: form.options,
            },
        )
        .await?;

    Ok(Redirect::to(&format!("/polls/{}", poll.poll_id)).into_response())
}

// ============================================================================
// Detail / vote / options
// ============================================================================

/// GET /polls/{id}
pub async fn show_poll<P, A>(
    State(state): State<PollAppState<P, A>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;
    let poll_id = parse_poll_id(&id)?;

    let poll = GetPollUseCase::new(state.polls.clone())
        .execute(&poll_id)
        .await?;

    let mut ctx = base_context(&identity);
    ctx.insert("poll", &PollView::from_poll(&poll, &identity));
    Ok(render(&state.templates, "poll.html", &ctx)?.into_response())
}

/// POST /polls/{id}/vote
pub async fn vote<P, A>(
    State(state): State<PollAppState<P, A>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<VoteForm>,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;
    let poll_id = parse_poll_id(&id)?;

    let poll = VoteUseCase::new(state.polls.clone())
        .execute(&identity, &poll_id, &form.option)
        .await?;

    Ok(Redirect::to(&format!("/polls/{}", poll.poll_id)).into_response())
}

/// POST /polls/{id}/options
pub async fn add_option<P, A>(
    State(state): State<PollAppState<P, A>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<AddOptionForm>,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;
    let poll_id = parse_poll_id(&id)?;

    let poll = AddOptionUseCase::new(state.polls.clone())
        .execute(&identity, &poll_id, &form.name)
        .await?;

    Ok(Redirect::to(&format!("/polls/{}", poll.poll_id)).into_response())
}

// ============================================================================
// Delete
// ============================================================================

/// POST /polls/{id}/delete
pub async fn delete_poll<P, A>(
    State(state): State<PollAppState<P, A>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> PollResult<Response>
where
    P: PollRepository + Clone + Send + Sync + 'static,
    A: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = state.identity(&headers).await?;
    let poll_id = parse_poll_id(&id)?;

    DeletePollUseCase::new(state.polls.clone())
        .execute(&identity, &poll_id)
        .await?;

    Ok(Redirect::to("/polls/mine").into_response())
}
