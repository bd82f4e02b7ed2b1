//! Edit form data for a listing the caller owns

use serde::Serialize;

use crate::domain::entity::listing::Listing;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditListingOutput {
    pub listing: Listing,
    /// Thumbnail of the current image, shown next to the file input
    pub original_image_url: String,
}

impl From<Listing> for EditListingOutput {
    fn from(listing: Listing) -> Self {
        Self {
            original_image_url: listing.image.thumbnail_url(),
            listing,
        }
    }
}
