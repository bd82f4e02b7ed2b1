//! Listing Error Types
//!
//! Every variant resolves to a flash notice plus a redirect, except
//! infrastructure failures, which become a generic problem document.
//! Form errors need to know which form to go back to; handlers attach it
//! with [`ListingError::at_form`].

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::flash::Flash;
use platform::redirect::{self, Redirect};
use thiserror::Error;

pub type ListingResult<T> = Result<T, ListingError>;

pub(crate) const INDEX: &str = "/listings";
const LOGIN: &str = "/login";

#[derive(Debug, Error)]
pub enum ListingError {
    /// Form input rejected
    #[error("{0}")]
    Validation(String),

    /// The location could not be resolved to a point
    #[error("{0}")]
    Geocode(String),

    /// Missing image, or the image store refused the file
    #[error("{0}")]
    Upload(String),

    /// `return_to` is the page to come back to after login
    #[error("You must be logged in to do that!")]
    Unauthenticated { return_to: Option<String> },

    #[error("You are not the owner of this listing")]
    Forbidden,

    #[error("Listing you requested for does not exist!")]
    NotFound,

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] AppError),
}

impl ListingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListingError::Validation(_) | ListingError::Upload(_) => ErrorKind::BadRequest,
            ListingError::Geocode(_) => ErrorKind::UnprocessableEntity,
            ListingError::Unauthenticated { .. } => ErrorKind::Unauthorized,
            ListingError::Forbidden => ErrorKind::Forbidden,
            ListingError::NotFound => ErrorKind::NotFound,
            ListingError::Infrastructure(e) => e.kind(),
        }
    }

    /// Errors the user can fix by editing the form
    pub fn is_form_error(&self) -> bool {
        matches!(
            self,
            ListingError::Validation(_) | ListingError::Geocode(_) | ListingError::Upload(_)
        )
    }

    /// Send form errors back to `form`; others keep their own target
    pub fn at_form(self, form: impl Into<String>) -> FormError {
        FormError {
            form: form.into(),
            error: self,
        }
    }

    fn log(&self) {
        match self {
            ListingError::Infrastructure(e) => {
                tracing::error!(error = %e, kind = %e.kind(), "Listing infrastructure error");
            }
            ListingError::Forbidden => {
                tracing::warn!("Listing mutation attempted by non-owner");
            }
            _ => {
                tracing::debug!(error = %self, "Listing error");
            }
        }
    }

    fn into_redirect(self, form: Option<&str>) -> Response {
        self.log();
        let notice = Flash::error(self.to_string());

        match self {
            ListingError::Infrastructure(e) => e.into_server_error().into_response(),
            ListingError::Unauthenticated { return_to } => {
                let mut redirect = Redirect::to(LOGIN).with_flash(notice);
                if let Some(cookie) = return_to.as_deref().and_then(redirect::save_return_to) {
                    redirect = redirect.with_cookie(cookie);
                }
                redirect.into_response()
            }
            ListingError::Forbidden | ListingError::NotFound => {
                Redirect::to(INDEX).with_flash(notice).into_response()
            }
            ListingError::Validation(_) | ListingError::Geocode(_) | ListingError::Upload(_) => {
                Redirect::to(form.unwrap_or(INDEX))
                    .with_flash(notice)
                    .into_response()
            }
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        self.into_redirect(None)
    }
}

/// A [`ListingError`] raised while handling a form submission
#[derive(Debug)]
pub struct FormError {
    form: String,
    error: ListingError,
}

impl FormError {
    pub fn error(&self) -> &ListingError {
        &self.error
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        self.error.into_redirect(Some(&self.form))
    }
}
