//! Wanderlust HTTP application
//!
//! Assembles the auth and listing routers behind session resolution. The
//! binary adds the database, the outbound adapters and the listener.

pub mod config;

use std::sync::Arc;

use auth::AuthConfig;
use auth::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use auth::presentation::AuthAppState;
use axum::Router;
use axum::extract::Request;
use axum::middleware::{from_fn_with_state, map_request};
use axum::routing::get;
use kernel::error::app_error::AppError;
use listing::ListingConfig;
use listing::domain::ports::{Geocoder, ImageUploader};
use listing::domain::repository::ListingRepository;
use platform::method_override::override_method;
use platform::redirect::Redirect;
use tower::{Layer, Service};
use tower_http::trace::TraceLayer;

pub use config::{AppConfig, ConfigError};

/// Stores and adapters the application runs on
pub struct AppParts<A, R, G, U> {
    pub auth_repo: Arc<A>,
    pub auth_config: Arc<AuthConfig>,
    pub listing_repo: Arc<R>,
    pub geocoder: Arc<G>,
    pub uploader: Arc<U>,
    pub listing_config: Arc<ListingConfig>,
}

/// All routes, session resolution and request tracing
pub fn build_router<A, R, G, U>(parts: AppParts<A, R, G, U>) -> Router
where
    A: UserRepository + CredentialRepository + AuthSessionRepository + Send + Sync + 'static,
    R: ListingRepository + Send + Sync + 'static,
    G: Geocoder + Send + Sync + 'static,
    U: ImageUploader + Send + Sync + 'static,
{
    let session_state = AuthAppState {
        repo: parts.auth_repo.clone(),
        config: parts.auth_config.clone(),
    };

    Router::new()
        .route("/", get(home))
        .merge(auth::auth_router_generic(parts.auth_repo, parts.auth_config))
        .merge(listing::listing_router_generic(
            parts.listing_repo,
            parts.geocoder,
            parts.uploader,
            parts.listing_config,
        ))
        .fallback(not_found)
        .layer(from_fn_with_state(session_state, auth::resolve_session::<A>))
        .layer(TraceLayer::new_for_http())
}

/// Wraps the router so `?_method=` overrides apply before routing
pub fn with_method_override(
    router: Router,
) -> impl Service<
    Request,
    Response = axum::response::Response,
    Error = std::convert::Infallible,
    Future: Send,
> + Clone
+ Send
+ 'static {
    map_request(override_method).layer(router)
}

async fn home() -> Redirect {
    Redirect::to("/listings")
}

async fn not_found() -> AppError {
    AppError::not_found("Page Not Found!")
}

#[cfg(test)]
mod tests;
