//! Show Listing Use Case

use std::sync::Arc;

use kernel::id::ListingId;

use crate::domain::entity::listing_details::ListingDetails;
use crate::domain::repository::ListingRepository;
use crate::error::{ListingError, ListingResult};

pub struct ShowListingUseCase<R>
where
    R: ListingRepository,
{
    repo: Arc<R>,
}

impl<R> ShowListingUseCase<R>
where
    R: ListingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &ListingId) -> ListingResult<ListingDetails> {
        self.repo
            .find_details(id)
            .await?
            .ok_or(ListingError::NotFound)
    }
}
