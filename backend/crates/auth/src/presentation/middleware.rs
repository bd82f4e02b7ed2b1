//! Session resolution
//!
//! Runs on every request: verifies the session cookie and stores the
//! resolved [`CurrentUser`] in the request extensions. Routes decide for
//! themselves whether an anonymous user is acceptable.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::view::ViewUser;

use crate::application::CheckSessionUseCase;
use crate::domain::entity::session_user::SessionUser;
use crate::domain::repository::AuthSessionRepository;
use crate::presentation::handlers::AuthAppState;

/// Signed-in user of the current request, `None` when anonymous
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser(pub Option<SessionUser>);

impl CurrentUser {
    pub fn user(&self) -> Option<&SessionUser> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<SessionUser> {
        self.0
    }

    pub fn view_user(&self) -> Option<ViewUser> {
        self.0.as_ref().map(ViewUser::from)
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            tracing::error!("CurrentUser requested on a route without session resolution");
            AppError::internal("Session middleware not installed")
        })
    }
}

/// Apply with `axum::middleware::from_fn_with_state` around every router
/// whose handlers extract [`CurrentUser`].
pub async fn resolve_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthSessionRepository + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let user = match use_case.execute(token.as_deref()).await {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    if let Some(user) = &user {
        tracing::trace!(user_id = %user.user_id, "Session resolved");
    }
    req.extensions_mut().insert(CurrentUser(user));

    next.run(req).await
}
