//! HTML-form method override
//!
//! Forms can only submit GET and POST. A POST whose query carries
//! `_method=PUT` or `_method=DELETE` is rewritten before routing, so this
//! must wrap the whole `Router` rather than be added with `Router::layer`.

use axum::extract::Request;
use axum::http::Method;

/// Rewrites the method of an overridden POST. Other requests pass through.
///
/// Use with `axum::middleware::map_request` applied outside the router.
pub async fn override_method(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }

    let target = request.uri().query().and_then(|query| {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "_method")
            .and_then(|(_, value)| match value.to_ascii_uppercase().as_str() {
                "PUT" => Some(Method::PUT),
                "PATCH" => Some(Method::PATCH),
                "DELETE" => Some(Method::DELETE),
                _ => None,
            })
    });

    if let Some(method) = target {
        tracing::debug!(uri = %request.uri(), %method, "Method override");
        *request.method_mut() = method;
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn post(uri: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_put_and_delete_override() {
        let req = override_method(post("/listings/abc?_method=PUT")).await;
        assert_eq!(req.method(), Method::PUT);

        let req = override_method(post("/listings/abc?x=1&_method=delete")).await;
        assert_eq!(req.method(), Method::DELETE);
    }

    #[tokio::test]
    async fn test_unknown_override_and_get_ignored() {
        let req = override_method(post("/listings?_method=CONNECT")).await;
        assert_eq!(req.method(), Method::POST);

        let get = Request::builder()
            .uri("/listings?_method=DELETE")
            .body(Body::empty())
            .unwrap();
        assert_eq!(override_method(get).await.method(), Method::GET);
    }
}
