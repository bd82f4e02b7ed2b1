//! Flash notices
//!
//! A flash is a one-shot message carried to the next rendered view in a
//! short-lived cookie. Redirects set it; [`crate::view::View`] clears it.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::cookie::{CookieConfig, extract_cookie};
use crate::crypto::{from_base64_url, to_base64_url};

pub const FLASH_COOKIE_NAME: &str = "wanderlust_flash";
const FLASH_MAX_AGE_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub(crate) fn cookie_config() -> CookieConfig {
        CookieConfig::transient(FLASH_COOKIE_NAME, FLASH_MAX_AGE_SECS)
    }

    /// `Set-Cookie` value carrying this flash (base64url JSON)
    pub fn to_set_cookie(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        Self::cookie_config().build_set_cookie(&to_base64_url(&json))
    }

    pub fn clear_cookie() -> String {
        Self::cookie_config().build_delete_cookie()
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = from_base64_url(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

/// Flash received with the current request, if any.
///
/// Undecodable cookies are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingFlash(pub Option<Flash>);

impl IncomingFlash {
    pub fn into_inner(self) -> Option<Flash> {
        self.0
    }
}

impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            extract_cookie(&parts.headers, FLASH_COOKIE_NAME).and_then(|v| Flash::decode(&v)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request, header};

    #[tokio::test]
    async fn test_cookie_is_read_back_by_extractor() {
        let set_cookie = Flash::success("New Listing Created").to_set_cookie();
        let pair = set_cookie.split(';').next().unwrap().to_string();

        let (mut parts, _) = Request::builder()
            .header(header::COOKIE, HeaderValue::from_str(&pair).unwrap())
            .body(())
            .unwrap()
            .into_parts();
        let IncomingFlash(flash) = IncomingFlash::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(flash, Some(Flash::success("New Listing Created")));
    }

    #[tokio::test]
    async fn test_garbage_cookie_is_ignored() {
        let (mut parts, _) = Request::builder()
            .header(header::COOKIE, "wanderlust_flash=%%%")
            .body(())
            .unwrap()
            .into_parts();
        let flash = IncomingFlash::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(flash, IncomingFlash(None));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Flash::error("Listing Deleted!")).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["message"], "Listing Deleted!");
    }
}
