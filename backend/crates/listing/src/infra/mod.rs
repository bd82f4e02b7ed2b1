//! Infrastructure Layer
//!
//! PostgreSQL store and reqwest-backed adapters for the outbound ports.

pub mod cloudinary;
pub mod mapbox;
pub mod postgres;

use kernel::error::app_error::AppError;
use reqwest::StatusCode;

/// Timeouts and connection failures of a third-party call
fn transport_error(service: &'static str, error: reqwest::Error) -> AppError {
    if error.is_timeout() {
        AppError::gateway_timeout(format!("{service} did not respond in time")).with_source(error)
    } else {
        AppError::bad_gateway(format!("{service} request failed")).with_source(error)
    }
}

/// Non-success status of a third-party call. 4xx answers other than auth
/// failures mean the service refused our input and become client errors.
fn status_error(service: &'static str, status: StatusCode, detail: Option<String>) -> AppError {
    let detail = detail.unwrap_or_else(|| status.to_string());

    if status.is_client_error()
        && status != StatusCode::UNAUTHORIZED
        && status != StatusCode::FORBIDDEN
        && status != StatusCode::TOO_MANY_REQUESTS
    {
        AppError::bad_request(detail)
    } else {
        tracing::error!(%status, service, %detail, "Third-party service error");
        AppError::bad_gateway(format!("{service} answered {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(status_error("Geocoding", StatusCode::UNPROCESSABLE_ENTITY, None).is_client_error());
        assert!(status_error("Geocoding", StatusCode::UNAUTHORIZED, None).is_server_error());
        assert!(status_error("Upload", StatusCode::BAD_GATEWAY, None).is_server_error());
        assert_eq!(
            status_error("Upload", StatusCode::BAD_REQUEST, Some("Invalid image file".into()))
                .message(),
            "Invalid image file"
        );
    }
}
