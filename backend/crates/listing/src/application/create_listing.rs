//! Create Listing Use Case
//!
//! Geocodes the location and uploads the image concurrently, then stores
//! the listing owned by the session user. Nothing is stored unless both
//! succeed; an image uploaded for a listing that was never stored is
//! discarded.

use std::sync::Arc;

use auth::SessionUser;
use kernel::error::app_error::{AppError, AppResult};

use crate::domain::entity::listing::Listing;
use crate::domain::ports::{Geocoder, ImageUploader};
use crate::domain::repository::ListingRepository;
use crate::domain::value_object::{
    geometry::Geometry,
    image_upload::ImageUpload,
    listing_fields::{ListingDraft, ListingFields},
    listing_image::ListingImage,
};
use crate::error::{ListingError, ListingResult};

const MISSING_IMAGE: &str = "Please choose an image for the listing";

pub struct CreateListingInput {
    pub fields: ListingFields,
    pub image: Option<ImageUpload>,
}

pub struct CreateListingUseCase<R, G, U>
where
    R: ListingRepository,
    G: Geocoder,
    U: ImageUploader,
{
    repo: Arc<R>,
    geocoder: Arc<G>,
    uploader: Arc<U>,
}

impl<R, G, U> CreateListingUseCase<R, G, U>
where
    R: ListingRepository,
    G: Geocoder,
    U: ImageUploader,
{
    pub fn new(repo: Arc<R>, geocoder: Arc<G>, uploader: Arc<U>) -> Self {
        Self {
            repo,
            geocoder,
            uploader,
        }
    }

    pub async fn execute(
        &self,
        owner: &SessionUser,
        input: CreateListingInput,
    ) -> ListingResult<Listing> {
        let draft = ListingDraft::new(input.fields).map_err(validation_error)?;
        let image = input
            .image
            .ok_or_else(|| ListingError::Upload(MISSING_IMAGE.to_string()))?;

        let (geocoded, uploaded) = tokio::join!(
            self.geocoder.forward(&draft.location),
            self.uploader.upload(image)
        );

        let image = uploaded.map_err(upload_error)?;
        let geometry = match resolve_geometry(&draft.location, geocoded) {
            Ok(geometry) => geometry,
            Err(e) => {
                discard_quietly(self.uploader.as_ref(), &image).await;
                return Err(e);
            }
        };

        let listing = Listing::new(draft, owner.user_id, image, geometry);
        if let Err(e) = self.repo.create(&listing).await {
            discard_quietly(self.uploader.as_ref(), &listing.image).await;
            return Err(e.into());
        }

        tracing::info!(
            listing_id = %listing.id,
            owner_id = %listing.owner_id,
            "Listing created"
        );

        Ok(listing)
    }
}

pub(crate) fn validation_error(e: AppError) -> ListingError {
    ListingError::Validation(e.message().to_string())
}

/// Zero matches and refused queries are the user's to fix
pub(crate) fn resolve_geometry(
    location: &str,
    geocoded: AppResult<Option<Geometry>>,
) -> ListingResult<Geometry> {
    match geocoded {
        Ok(Some(geometry)) => Ok(geometry),
        Ok(None) => Err(ListingError::Geocode(format!(
            "Could not find a place called \"{location}\""
        ))),
        Err(e) if e.is_client_error() => Err(ListingError::Geocode(e.message().to_string())),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn upload_error(e: AppError) -> ListingError {
    if e.is_client_error() {
        ListingError::Upload(e.message().to_string())
    } else {
        ListingError::Infrastructure(e)
    }
}

pub(crate) async fn discard_quietly<U>(uploader: &U, image: &ListingImage)
where
    U: ImageUploader,
{
    if let Err(e) = uploader.discard(image).await {
        tracing::warn!(
            error = %e,
            filename = %image.filename,
            "Failed to discard orphaned image"
        );
    }
}
