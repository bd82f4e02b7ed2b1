//! HTTP Handlers

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::HeaderMap;
use platform::flash::{Flash, IncomingFlash};
use platform::redirect::{self, Redirect};
use platform::view::View;

use crate::application::config::AuthConfig;
use crate::application::{
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AuthFormView, LoginForm, SignUpForm};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers and the session middleware
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: `R` itself need not be `Clone` behind the `Arc`.
impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

const AFTER_AUTH: &str = "/listings";

// ============================================================================
// Sign Up
// ============================================================================

/// GET /signup
pub async fn signup_form(current: CurrentUser, flash: IncomingFlash) -> View<AuthFormView> {
    View::new("users/signup", AuthFormView { action: "/signup" })
        .with_flash(flash)
        .with_current_user(current.view_user())
}

/// POST /signup
pub async fn signup<R>(
    State(state): State<AuthAppState<R>>,
    form: Result<Form<SignUpForm>, FormRejection>,
) -> AuthResult<Redirect>
where
    R: UserRepository + CredentialRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let Form(form) = form.map_err(|e| {
        tracing::debug!(error = %e, "Unreadable signup form");
        AuthError::Validation("Username and password are required".to_string())
    })?;

    let use_case =
        SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            user_name: form.username,
            password: form.password,
            email: form.email,
        })
        .await?;

    Ok(Redirect::to(AFTER_AUTH)
        .with_cookie(state.config.session_cookie().build_set_cookie(&output.session_token))
        .with_flash(Flash::success("Welcome to Wanderlust!")))
}

// ============================================================================
// Log In
// ============================================================================

/// GET /login
pub async fn login_form(current: CurrentUser, flash: IncomingFlash) -> View<AuthFormView> {
    View::new("users/login", AuthFormView { action: "/login" })
        .with_flash(flash)
        .with_current_user(current.view_user())
}

/// POST /login
///
/// Returns to the saved redirect when one is present, then forgets it.
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AuthResult<Redirect>
where
    R: UserRepository + CredentialRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let Form(form) = form.map_err(|e| {
        tracing::debug!(error = %e, "Unreadable login form");
        AuthError::InvalidCredentials
    })?;

    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            user_name: form.username,
            password: form.password,
        })
        .await?;

    let target = redirect::read_return_to(&headers).unwrap_or_else(|| AFTER_AUTH.to_string());

    Ok(Redirect::to(target)
        .with_cookie(state.config.session_cookie().build_set_cookie(&output.session_token))
        .with_cookie(redirect::clear_return_to())
        .with_flash(Flash::success("Welcome back to WanderLust!!")))
}

// ============================================================================
// Log Out
// ============================================================================

/// GET /logout
///
/// The session is deleted before the redirect is sent; a store failure
/// surfaces as an error instead of a false "logged out".
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    current: CurrentUser,
    headers: HeaderMap,
) -> AuthResult<Redirect>
where
    R: AuthSessionRepository + Send + Sync + 'static,
{
    if current.user().is_none() {
        return Err(AuthError::Unauthenticated);
    }
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name)
        .ok_or(AuthError::Unauthenticated)?;

    SignOutUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&token)
        .await?;

    Ok(Redirect::to(AFTER_AUTH)
        .with_cookie(state.config.session_cookie().build_delete_cookie())
        .with_flash(Flash::success("You are logged out!")))
}
