//! Auth Router

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Auth routes backed by PostgreSQL
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(Arc::new(repo), config)
}

/// Auth routes for any repository implementation.
///
/// Handlers extract `CurrentUser`; the caller must wrap the router with
/// [`crate::resolve_session`].
pub fn auth_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + CredentialRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let state = AuthAppState { repo, config };

    Router::new()
        .route(
            "/signup",
            get(handlers::signup_form).post(handlers::signup::<R>),
        )
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login::<R>),
        )
        .route("/logout", get(handlers::logout::<R>))
        .with_state(state)
}
