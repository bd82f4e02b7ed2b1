//! Update Listing Use Case
//!
//! Applies the whitelisted fields to a listing the caller was shown to own.
//! A changed location is geocoded again; the image is only replaced when a
//! new file was submitted.

use std::sync::Arc;

use crate::application::create_listing::{
    discard_quietly, resolve_geometry, upload_error, validation_error,
};
use crate::domain::entity::listing::Listing;
use crate::domain::ports::{Geocoder, ImageUploader};
use crate::domain::repository::ListingRepository;
use crate::domain::value_object::{
    image_upload::ImageUpload,
    listing_fields::{ListingFields, ListingPatch},
};
use crate::error::{ListingError, ListingResult};

pub struct UpdateListingInput {
    pub fields: ListingFields,
    pub image: Option<ImageUpload>,
}

pub struct UpdateListingUseCase<R, G, U>
where
    R: ListingRepository,
    G: Geocoder,
    U: ImageUploader,
{
    repo: Arc<R>,
    geocoder: Arc<G>,
    uploader: Arc<U>,
}

impl<R, G, U> UpdateListingUseCase<R, G, U>
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

    /// `listing` is the copy loaded by the ownership check
    pub async fn execute(
        &self,
        mut listing: Listing,
        input: UpdateListingInput,
    ) -> ListingResult<Listing> {
        let patch = ListingPatch::new(input.fields).map_err(validation_error)?;

        if listing.apply_patch(patch) {
            let geocoded = self.geocoder.forward(&listing.location).await;
            let geometry = resolve_geometry(&listing.location, geocoded)?;
            listing.relocate(geometry);
        }

        let mut uploaded = None;
        if let Some(image) = input.image {
            let image = self.uploader.upload(image).await.map_err(upload_error)?;
            listing.replace_image(image.clone());
            uploaded = Some(image);
        }

        let outcome = match self.repo.update(&listing).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ListingError::NotFound),
            Err(e) => Err(ListingError::from(e)),
        };
        if let Err(e) = outcome {
            if let Some(image) = &uploaded {
                discard_quietly(self.uploader.as_ref(), image).await;
            }
            return Err(e);
        }

        tracing::info!(
            listing_id = %listing.id,
            image_replaced = uploaded.is_some(),
            "Listing updated"
        );

        Ok(listing)
    }
}
