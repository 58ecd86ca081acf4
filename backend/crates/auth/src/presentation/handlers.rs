//! HTTP Handlers
//!
//! Auth pages are guest-only: an already-authenticated caller is sent
//! back to the home page instead of re-registering or re-logging-in.

use axum::extract::{Form, State};
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::sync::Arc;
use tera::{Context, Tera};

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase, ResolveSessionUseCase,
};
use crate::domain::identity::Identity;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginForm, RegisterForm};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub templates: Arc<Tera>,
}

/// Resolve the caller's identity from the session cookie
pub async fn resolve_identity<R>(
    repo: &Arc<R>,
    config: &Arc<AuthConfig>,
    headers: &HeaderMap,
) -> AuthResult<Identity>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(headers, &config.session_cookie_name);
    let use_case = ResolveSessionUseCase::new(repo.clone(), repo.clone(), config.clone());
    use_case.resolve(token.as_deref()).await
}

fn render(templates: &Tera, name: &str, ctx: &Context) -> AuthResult<Html<String>> {
    templates
        .render(name, ctx)
        .map(Html)
        .map_err(|e| AuthError::Internal(format!("Template error: {e}")))
}

/// Context for guest-only pages; the shared layout still expects `user`
fn guest_context() -> Context {
    let mut ctx = Context::new();
    ctx.insert("user", &Option::<String>::None);
    ctx
}

// ============================================================================
// Register
// ============================================================================

/// GET /register
pub async fn register_page<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = resolve_identity(&state.repo, &state.config, &headers).await?;
    if identity.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(render(&state.templates, "register.html", &guest_context())?.into_response())
}

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Form(form): Form<RegisterForm>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = resolve_identity(&state.repo, &state.config, &headers).await?;
    if identity.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(RegisterInput {
            user_name: form.username,
            password: form.password,
        })
        .await?;

    Ok(Redirect::to("/login").into_response())
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn login_page<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = resolve_identity(&state.repo, &state.config, &headers).await?;
    if identity.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(render(&state.templates, "login.html", &guest_context())?.into_response())
}

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let identity = resolve_identity(&state.repo, &state.config, &headers).await?;
    if identity.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(LoginInput {
            user_name: form.username,
            password: form.password,
        })
        .await?;

    let cookie = state.config.cookie_config().build_set_cookie(&output.session_token);

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = state.config.cookie_config().build_delete_cookie();

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}
