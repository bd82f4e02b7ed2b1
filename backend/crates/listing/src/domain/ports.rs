//! Outbound ports for the third-party services a listing depends on
//!
//! Adapters return `AppError`s classified by kind: client errors mean the
//! submitted data was refused, server errors mean the service failed.

use kernel::error::app_error::AppResult;

use crate::domain::value_object::{
    geometry::Geometry, image_upload::ImageUpload, listing_image::ListingImage,
};

#[trait_variant::make(Geocoder: Send)]
pub trait LocalGeocoder {
    /// Best match for a free-text place name. `Ok(None)` when the service
    /// found nothing.
    async fn forward(&self, query: &str) -> AppResult<Option<Geometry>>;
}

#[trait_variant::make(ImageUploader: Send)]
pub trait LocalImageUploader {
    async fn upload(&self, image: ImageUpload) -> AppResult<ListingImage>;

    /// Remove a stored image. Callers treat failure as non-fatal.
    async fn discard(&self, image: &ListingImage) -> AppResult<()>;
}
