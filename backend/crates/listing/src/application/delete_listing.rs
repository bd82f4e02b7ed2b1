//! Delete Listing Use Case

use std::sync::Arc;

use kernel::id::ListingId;

use crate::domain::repository::ListingRepository;
use crate::error::{ListingError, ListingResult};

pub struct DeleteListingUseCase<R>
where
    R: ListingRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteListingUseCase<R>
where
    R: ListingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// An id that is already gone reports `NotFound`
    pub async fn execute(&self, id: &ListingId) -> ListingResult<()> {
        if !self.repo.delete(id).await? {
            return Err(ListingError::NotFound);
        }

        tracing::info!(listing_id = %id, "Listing deleted");
        Ok(())
    }
}
