//! JSON view envelope
//!
//! Every page is rendered as `{view, flash, currentUser, data}`; an external
//! front end turns it into HTML. Rendering a view consumes the pending flash.

use axum::Json;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use serde::Serialize;

use crate::flash::{Flash, IncomingFlash};

/// The signed-in user as exposed to templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUser {
    pub id: UserId,
    pub user_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, T> {
    view: &'a str,
    flash: &'a [Flash],
    current_user: Option<&'a ViewUser>,
    data: &'a T,
}

#[must_use]
pub struct View<T> {
    name: &'static str,
    data: T,
    flash: Vec<Flash>,
    current_user: Option<ViewUser>,
}

impl<T: Serialize> View<T> {
    pub fn new(name: &'static str, data: T) -> Self {
        Self {
            name,
            data,
            flash: Vec::new(),
            current_user: None,
        }
    }

    pub fn with_flash(mut self, incoming: IncomingFlash) -> Self {
        self.flash.extend(incoming.into_inner());
        self
    }

    pub fn with_current_user(mut self, user: Option<ViewUser>) -> Self {
        self.current_user = user;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn data(&self) -> &T {
        &self.data
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        let body = Json(Envelope {
            view: self.name,
            flash: &self.flash,
            current_user: self.current_user.as_ref(),
            data: &self.data,
        })
        .into_response();

        if self.flash.is_empty() {
            return body;
        }

        let mut response = body;
        if let Ok(clear) = HeaderValue::try_from(Flash::clear_cookie()) {
            response.headers_mut().append(header::SET_COOKIE, clear);
        }
        response
    }
}
