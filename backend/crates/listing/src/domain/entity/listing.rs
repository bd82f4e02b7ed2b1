//! Listing Entity

use chrono::{DateTime, Utc};
use kernel::id::{ListingId, UserId};
use serde::Serialize;

use crate::domain::value_object::{
    geometry::Geometry,
    listing_fields::{ListingDraft, ListingPatch},
    listing_image::ListingImage,
    price::Price,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    pub country: String,
    pub image: ListingImage,
    pub geometry: Geometry,
    /// Set at creation, never reassigned
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(draft: ListingDraft, owner_id: UserId, image: ListingImage, geometry: Geometry) -> Self {
        let now = Utc::now();
        Self {
            id: ListingId::new(),
            title: draft.title,
            description: draft.description,
            price: draft.price,
            location: draft.location,
            country: draft.country,
            image,
            geometry,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Apply the submitted fields. Returns `true` when the location text
    /// changed, i.e. the geometry must be resolved again.
    pub fn apply_patch(&mut self, patch: ListingPatch) -> bool {
        let mut location_changed = false;

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(location) = patch.location {
            location_changed = location != self.location;
            self.location = location;
        }
        if let Some(country) = patch.country {
            self.country = country;
        }

        self.touch();
        location_changed
    }

    /// Returns the replaced image
    pub fn replace_image(&mut self, image: ListingImage) -> ListingImage {
        self.touch();
        std::mem::replace(&mut self.image, image)
    }

    pub fn relocate(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::listing_fields::ListingFields;

    fn listing() -> Listing {
        let draft = ListingDraft::new(ListingFields {
            title: Some("Loft".to_string()),
            description: Some("Bright".to_string()),
            price: Some("100".to_string()),
            location: Some("Berlin".to_string()),
            country: Some("Germany".to_string()),
        })
        .unwrap();
        Listing::new(
            draft,
            UserId::new(),
            ListingImage::new("https://img/upload/a.png", "a"),
            Geometry::point(13.4, 52.5).unwrap(),
        )
    }

    #[test]
    fn test_patch_reports_location_change() {
        let mut listing = listing();

        let same = ListingPatch {
            location: Some("Berlin".to_string()),
            title: Some("Attic".to_string()),
            ..ListingPatch::default()
        };
        assert!(!listing.apply_patch(same));
        assert_eq!(listing.title, "Attic");

        let moved = ListingPatch {
            location: Some("Hamburg".to_string()),
            ..ListingPatch::default()
        };
        assert!(listing.apply_patch(moved));
        assert_eq!(listing.location, "Hamburg");
    }

    #[test]
    fn test_patch_cannot_touch_owner_or_image() {
        let mut listing = listing();
        let owner = listing.owner_id;
        let image = listing.image.clone();

        listing.apply_patch(ListingPatch {
            price: Some(Price::new(5).unwrap()),
            ..ListingPatch::default()
        });
        assert_eq!(listing.owner_id, owner);
        assert_eq!(listing.image, image);
        assert!(listing.is_owned_by(&owner));
    }
}
