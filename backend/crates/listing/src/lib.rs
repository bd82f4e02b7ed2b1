//! Listing Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Listing entity, value objects, repository and adapter ports
//! - `application/` - Use cases and the ordered authorization guard
//! - `infra/` - PostgreSQL store, Mapbox geocoder, Cloudinary uploader
//! - `presentation/` - Multipart form parsing, handlers, router
//!
//! ## Lifecycle
//! - Anyone can browse listings and view one with its owner and reviews
//! - A signed-in user creates a listing; location is geocoded and the image
//!   uploaded concurrently before anything is stored
//! - Only the owner may edit, update or delete it
//!
//! Handlers extract `auth::CurrentUser`, so the router must sit behind
//! `auth::resolve_session`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;


pub use application::config::ListingConfig;
pub use error::{ListingError, ListingResult};
pub use infra::{
    cloudinary::CloudinaryUploader, mapbox::MapboxGeocoder, postgres::PgListingRepository,
};
pub use presentation::router::{listing_router, listing_router_generic};
