//! List Listings Use Case

use std::sync::Arc;

use crate::domain::entity::listing::Listing;
use crate::domain::repository::ListingRepository;
use crate::error::ListingResult;

pub struct ListListingsUseCase<R>
where
    R: ListingRepository,
{
    repo: Arc<R>,
}

impl<R> ListListingsUseCase<R>
where
    R: ListingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every listing, newest first
    pub async fn execute(&self) -> ListingResult<Vec<Listing>> {
        Ok(self.repo.find_all().await?)
    }
}
