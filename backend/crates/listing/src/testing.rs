//! In-memory store and adapter fakes for tests (this crate and downstream
//! crates through the `test-support` feature)

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use auth::SessionUser;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{ListingId, UserId};

use crate::application::guard::{Authorizer, GuardContext};
use crate::domain::entity::{
    listing::Listing,
    listing_details::{ListingDetails, Review, UserSummary},
};
use crate::domain::ports::{Geocoder, ImageUploader};
use crate::domain::repository::{ListingRepository, Replaced};
use crate::domain::value_object::{
    geometry::Geometry, image_upload::ImageUpload, listing_image::ListingImage,
};
use crate::error::ListingResult;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Listing store
// ============================================================================

#[derive(Default)]
pub struct InMemoryListingRepository {
    listings: Mutex<Vec<Listing>>,
    user_names: Mutex<HashMap<UserId, String>>,
    reviews: Mutex<HashMap<ListingId, Vec<Review>>>,
    fail_bulk_insert: AtomicBool,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `replace_all` fail with a 503 once the old rows are staged for deletion
    pub fn fail_bulk_inserts(&self) {
        self.fail_bulk_insert.store(true, Ordering::SeqCst);
    }

    /// Owner and author names shown by `find_details`
    pub fn register_user(&self, user_id: UserId, user_name: impl Into<String>) {
        lock(&self.user_names).insert(user_id, user_name.into());
    }

    pub fn add_review(&self, listing_id: ListingId, review: Review) {
        lock(&self.reviews).entry(listing_id).or_default().push(review);
    }

    pub fn insert(&self, listing: Listing) {
        lock(&self.listings).push(listing);
    }

    pub fn get(&self, id: &ListingId) -> Option<Listing> {
        lock(&self.listings).iter().find(|l| &l.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.listings).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn review_count(&self, id: &ListingId) -> usize {
        lock(&self.reviews).get(id).map_or(0, Vec::len)
    }

    fn summary(&self, user_id: UserId) -> UserSummary {
        let user_name = lock(&self.user_names)
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());
        UserSummary {
            id: user_id,
            user_name,
        }
    }
}

impl ListingRepository for InMemoryListingRepository {
    async fn create(&self, listing: &Listing) -> AppResult<()> {
        self.insert(listing.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ListingId) -> AppResult<Option<Listing>> {
        Ok(self.get(id))
    }

    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        let mut listings = lock(&self.listings).clone();
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    async fn find_details(&self, id: &ListingId) -> AppResult<Option<ListingDetails>> {
        let Some(listing) = self.get(id) else {
            return Ok(None);
        };
        let mut reviews = lock(&self.reviews).get(id).cloned().unwrap_or_default();
        reviews.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(Some(ListingDetails {
            owner: self.summary(listing.owner_id),
            listing,
            reviews,
        }))
    }

    async fn update(&self, listing: &Listing) -> AppResult<bool> {
        let mut listings = lock(&self.listings);
        match listings.iter_mut().find(|l| l.id == listing.id) {
            Some(stored) => {
                *stored = listing.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ListingId) -> AppResult<bool> {
        let mut listings = lock(&self.listings);
        let before = listings.len();
        listings.retain(|l| &l.id != id);
        let deleted = listings.len() < before;
        if deleted {
            lock(&self.reviews).remove(id);
        }
        Ok(deleted)
    }

    async fn replace_all(&self, listings: &[Listing]) -> AppResult<Replaced> {
        let mut stored = lock(&self.listings);
        if self.fail_bulk_insert.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable("Database unavailable"));
        }
        let deleted = stored.len() as u64;
        *stored = listings.to_vec();
        lock(&self.reviews).clear();
        Ok(Replaced {
            deleted,
            inserted: listings.len() as u64,
        })
    }
}

// ============================================================================
// Geocoder
// ============================================================================

/// Knows a fixed set of places; anything else has no match
#[derive(Default)]
pub struct FakeGeocoder {
    places: Mutex<HashMap<String, Geometry>>,
    fail: Mutex<bool>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(self, name: impl Into<String>, lng: f64, lat: f64) -> Self {
        if let Ok(point) = Geometry::point(lng, lat) {
            lock(&self.places).insert(name.into(), point);
        }
        self
    }

    /// Every lookup fails as if the service were down
    pub fn fail(&self) {
        *lock(&self.fail) = true;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FakeGeocoder {
    async fn forward(&self, query: &str) -> AppResult<Option<Geometry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *lock(&self.fail) {
            return Err(AppError::bad_gateway("Geocoding service request failed"));
        }
        Ok(lock(&self.places).get(query).copied())
    }
}

// ============================================================================
// Image uploader
// ============================================================================

#[derive(Default)]
pub struct FakeImageUploader {
    uploaded: Mutex<Vec<ListingImage>>,
    discarded: Mutex<Vec<ListingImage>>,
    fail: Mutex<bool>,
}

impl FakeImageUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self) {
        *lock(&self.fail) = true;
    }

    pub fn uploaded(&self) -> Vec<ListingImage> {
        lock(&self.uploaded).clone()
    }

    pub fn discarded(&self) -> Vec<ListingImage> {
        lock(&self.discarded).clone()
    }
}

impl ImageUploader for FakeImageUploader {
    async fn upload(&self, image: ImageUpload) -> AppResult<ListingImage> {
        if *lock(&self.fail) {
            return Err(AppError::bad_gateway("Image store request failed"));
        }
        let mut uploaded = lock(&self.uploaded);
        let public_id = format!("wanderlust_DEV/{}-{}", uploaded.len(), image.file_name());
        let stored = ListingImage::new(
            format!("https://res.cloudinary.com/test/image/upload/v1/{public_id}"),
            public_id,
        );
        uploaded.push(stored.clone());
        Ok(stored)
    }

    async fn discard(&self, image: &ListingImage) -> AppResult<()> {
        lock(&self.discarded).push(image.clone());
        Ok(())
    }
}

// ============================================================================
// Authorizer
// ============================================================================

/// Wraps another authorizer and records which checks ran, in order
pub struct RecordingAuthorizer<A> {
    inner: A,
    calls: Mutex<Vec<&'static str>>,
}

impl<A> RecordingAuthorizer<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        lock(&self.calls).clone()
    }
}

impl<A> Authorizer for RecordingAuthorizer<A>
where
    A: Authorizer + Send + Sync,
{
    async fn require_authenticated(&self, ctx: &GuardContext<'_>) -> ListingResult<SessionUser> {
        lock(&self.calls).push("authenticated");
        self.inner.require_authenticated(ctx).await
    }

    async fn require_owner(
        &self,
        user: &SessionUser,
        listing_id: &ListingId,
    ) -> ListingResult<Listing> {
        lock(&self.calls).push("owner");
        self.inner.require_owner(user, listing_id).await
    }
}
