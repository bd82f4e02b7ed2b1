//! A listing with its owner and reviews attached, for the show page

use chrono::{DateTime, Utc};
use kernel::id::{ReviewId, UserId};
use serde::Serialize;

use crate::domain::entity::listing::Listing;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub user_name: String,
}

/// Reviews are read-only here
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    /// 1 to 5
    pub rating: i16,
    pub comment: String,
    pub author: UserSummary,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetails {
    #[serde(flatten)]
    pub listing: Listing,
    pub owner: UserSummary,
    /// Oldest first
    pub reviews: Vec<Review>,
}
