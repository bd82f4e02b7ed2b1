//! Repository Traits

use kernel::error::app_error::AppResult;
use kernel::id::ListingId;

use crate::domain::entity::{listing::Listing, listing_details::ListingDetails};

#[trait_variant::make(ListingRepository: Send)]
pub trait LocalListingRepository {
    async fn create(&self, listing: &Listing) -> AppResult<()>;

    async fn find_by_id(&self, id: &ListingId) -> AppResult<Option<Listing>>;

    /// Newest first
    async fn find_all(&self) -> AppResult<Vec<Listing>>;

    /// Listing with owner and reviews (each with its author)
    async fn find_details(&self, id: &ListingId) -> AppResult<Option<ListingDetails>>;

    /// `false` when the listing no longer exists
    async fn update(&self, listing: &Listing) -> AppResult<bool>;

    /// `false` when there was nothing to delete. Reviews go with the listing.
    async fn delete(&self, id: &ListingId) -> AppResult<bool>;

    /// Swap every stored listing (and its reviews) for `listings`, all or
    /// nothing: on error the previous listings are still in place.
    async fn replace_all(&self, listings: &[Listing]) -> AppResult<Replaced>;
}

/// Row counts of a [`LocalListingRepository::replace_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replaced {
    pub deleted: u64,
    pub inserted: u64,
}
