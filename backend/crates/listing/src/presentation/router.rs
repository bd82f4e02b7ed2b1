//! Listing Router

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;

use crate::application::config::ListingConfig;
use crate::domain::ports::{Geocoder, ImageUploader};
use crate::domain::repository::ListingRepository;
use crate::infra::{
    cloudinary::CloudinaryUploader, mapbox::MapboxGeocoder, postgres::PgListingRepository,
};
use crate::presentation::handlers::{self, ListingAppState};

/// Listing routes backed by PostgreSQL, Mapbox and Cloudinary
pub fn listing_router(
    repo: PgListingRepository,
    geocoder: MapboxGeocoder,
    uploader: CloudinaryUploader,
    config: Arc<ListingConfig>,
) -> Router {
    listing_router_generic(
        Arc::new(repo),
        Arc::new(geocoder),
        Arc::new(uploader),
        config,
    )
}

/// Listing routes for any store and adapter implementation.
///
/// Handlers extract `auth::CurrentUser`; wrap the router with
/// `auth::resolve_session`. PUT and DELETE arrive from browsers as POST
/// with `?_method=`, so the method override must run before routing.
pub fn listing_router_generic<R, G, U>(
    repo: Arc<R>,
    geocoder: Arc<G>,
    uploader: Arc<U>,
    config: Arc<ListingConfig>,
) -> Router
where
    R: ListingRepository + Send + Sync + 'static,
    G: Geocoder + Send + Sync + 'static,
    U: ImageUploader + Send + Sync + 'static,
{
    let body_limit = config.max_upload_bytes;
    let state = ListingAppState {
        repo,
        geocoder,
        uploader,
        config,
    };

    Router::new()
        .route(
            "/listings",
            get(handlers::index::<R, G, U>).post(handlers::create::<R, G, U>),
        )
        .route("/listings/new", get(handlers::new_form::<R, G, U>))
        .route(
            "/listings/{id}",
            get(handlers::show::<R, G, U>)
                .put(handlers::update::<R, G, U>)
                .delete(handlers::delete::<R, G, U>),
        )
        .route("/listings/{id}/edit", get(handlers::edit_form::<R, G, U>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
