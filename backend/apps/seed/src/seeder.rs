//! Wipe-and-insert of the sample data set

use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use listing::domain::repository::{ListingRepository, Replaced};

use crate::data::sample_listings;

/// Replaces every listing with the sample set owned by `owner`.
/// A failure leaves the existing listings untouched.
pub async fn reseed<R>(repo: &R, owner: UserId) -> AppResult<Replaced>
where
    R: ListingRepository,
{
    let listings = sample_listings(owner)?;
    let report = repo.replace_all(&listings).await?;

    tracing::info!(
        deleted = report.deleted,
        inserted = report.inserted,
        owner = %owner,
        "Listings reseeded"
    );
    Ok(report)
}
