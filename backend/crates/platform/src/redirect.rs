//! `303 See Other` redirects with flash and cookie side effects, plus the
//! saved-redirect ("return to") cookie used across a login detour.

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::cookie::{CookieConfig, extract_cookie};
use crate::crypto::{from_base64_url, to_base64_url};
use crate::flash::Flash;

pub const RETURN_TO_COOKIE_NAME: &str = "wanderlust_return_to";
const RETURN_TO_MAX_AGE_SECS: i64 = 600;

/// Redirect builder
///
/// ```rust
/// use platform::{flash::Flash, redirect::Redirect};
///
/// let redirect = Redirect::to("/listings").with_flash(Flash::success("Updated successfully!!"));
/// assert_eq!(redirect.location(), "/listings");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Redirect {
    location: String,
    cookies: Vec<String>,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            cookies: Vec::new(),
        }
    }

    pub fn with_flash(self, flash: Flash) -> Self {
        self.with_cookie(flash.to_set_cookie())
    }

    /// Append a raw `Set-Cookie` value
    pub fn with_cookie(mut self, set_cookie: String) -> Self {
        self.cookies.push(set_cookie);
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        match HeaderValue::try_from(self.location.as_str()) {
            Ok(location) => {
                headers.insert(header::LOCATION, location);
            }
            Err(_) => {
                tracing::warn!(location = %self.location, "Unencodable redirect target, using /listings");
                headers.insert(header::LOCATION, HeaderValue::from_static("/listings"));
            }
        }
        for cookie in self.cookies {
            if let Ok(value) = HeaderValue::try_from(cookie) {
                headers.append(header::SET_COOKIE, value);
            }
        }
        (StatusCode::SEE_OTHER, headers).into_response()
    }
}

// ============================================================================
// Saved redirect
// ============================================================================

/// Only same-origin absolute paths are accepted as redirect targets.
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

fn return_to_cookie() -> CookieConfig {
    CookieConfig::transient(RETURN_TO_COOKIE_NAME, RETURN_TO_MAX_AGE_SECS)
}

/// `Set-Cookie` remembering `path_and_query`; `None` for non-local targets
pub fn save_return_to(path_and_query: &str) -> Option<String> {
    is_local_path(path_and_query)
        .then(|| return_to_cookie().build_set_cookie(&to_base64_url(path_and_query.as_bytes())))
}

pub fn clear_return_to() -> String {
    return_to_cookie().build_delete_cookie()
}

/// Saved target from the request cookies, if present and local
pub fn read_return_to(headers: &HeaderMap) -> Option<String> {
    let raw = extract_cookie(headers, RETURN_TO_COOKIE_NAME)?;
    let decoded = String::from_utf8(from_base64_url(&raw).ok()?).ok()?;
    is_local_path(&decoded).then_some(decoded)
}
