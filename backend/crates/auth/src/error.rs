//! Auth Error Types
//!
//! Every variant resolves to a flash notice plus a redirect, except
//! infrastructure failures, which become a generic problem document.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::flash::Flash;
use platform::redirect::Redirect;
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup input rejected (user name, password or email)
    #[error("{0}")]
    Validation(String),

    #[error("A user with the given username is already registered")]
    UserNameTaken,

    /// Unknown user or wrong password; deliberately indistinguishable
    #[error("Password or username is incorrect")]
    InvalidCredentials,

    /// No active session on a route that needs one
    #[error("You must be logged in to do that!")]
    Unauthenticated,

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] AppError),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Infrastructure(e) => e.kind(),
        }
    }

    /// Where the browser is sent, with the notice to show there
    fn redirect_target(&self) -> Option<&'static str> {
        match self {
            AuthError::Validation(_) | AuthError::UserNameTaken => Some("/signup"),
            AuthError::InvalidCredentials | AuthError::Unauthenticated => Some("/login"),
            AuthError::Infrastructure(_) => None,
        }
    }

    fn log(&self) {
        match self {
            AuthError::Infrastructure(e) => {
                tracing::error!(error = %e, kind = %e.kind(), "Auth infrastructure error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        match self.redirect_target() {
            Some(target) => Redirect::to(target)
                .with_flash(Flash::error(self.to_string()))
                .into_response(),
            None => match self {
                AuthError::Infrastructure(e) => e.into_server_error().into_response(),
                other => AppError::new(other.kind(), other.to_string()).into_response(),
            },
        }
    }
}
