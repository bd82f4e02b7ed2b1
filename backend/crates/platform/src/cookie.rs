//! Cookie helpers
//!
//! Hand-built `Set-Cookie` values and lookup of incoming cookies by name.

use axum::http::{HeaderMap, header};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by every `Set-Cookie` for one cookie name.
///
/// Deletion reuses the same attributes so browsers match and drop the
/// cookie that was set.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl CookieConfig {
    /// Short-lived, HttpOnly cookie used for flash notices and saved redirects
    pub fn transient(name: &str, max_age_secs: i64) -> Self {
        Self {
            name: name.to_string(),
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: Some(max_age_secs),
        }
    }

    pub fn build_set_cookie(&self, value: &str) -> String {
        self.render(value, self.max_age_secs)
    }

    /// Empty value, expired immediately
    pub fn build_delete_cookie(&self) -> String {
        self.render("", Some(0))
    }

    fn render(&self, value: &str, max_age_secs: Option<i64>) -> String {
        let mut cookie = format!("{}={}", self.name, value);
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str("; SameSite=");
        cookie.push_str(self.same_site.as_str());
        cookie.push_str("; Path=");
        cookie.push_str(&self.path);
        if let Some(max_age) = max_age_secs {
            cookie.push_str(&format!("; Max-Age={max_age}"));
        }
        cookie
    }
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is inspected; browsers send one, test clients may send several.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_config_build() {
        let config = CookieConfig {
            name: "wanderlust_session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: Some(3600),
        };

        let cookie = config.build_set_cookie("value123");
        assert!(cookie.starts_with("wanderlust_session=value123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_delete_cookie_keeps_attributes() {
        let config = CookieConfig {
            secure: true,
            ..CookieConfig::transient("wanderlust_session", 60)
        };
        assert_eq!(
            config.build_delete_cookie(),
            "wanderlust_session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0"
        );
    }

    #[test]
    fn test_transient_cookie_is_not_secure() {
        let cookie = CookieConfig::transient("flash", 60).build_set_cookie("x");
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=60"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; session=abc123; empty="),
        );
        headers.append(header::COOKIE, HeaderValue::from_static("flash=xyz"));

        assert_eq!(extract_cookie(&headers, "session"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "flash"), Some("xyz".to_string()));
        assert_eq!(extract_cookie(&headers, "empty"), None);
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
