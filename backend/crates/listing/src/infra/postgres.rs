//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{ListingId, ReviewId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    listing::Listing,
    listing_details::{ListingDetails, Review, UserSummary},
};
use crate::domain::repository::{ListingRepository, Replaced};
use crate::domain::value_object::{geometry::Geometry, listing_image::ListingImage, price::Price};

#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ListingRepository for PgListingRepository {
    async fn create(&self, listing: &Listing) -> AppResult<()> {
        insert(&self.pool, listing).await
    }

    async fn find_by_id(&self, id: &ListingId) -> AppResult<Option<Listing>> {
        let row = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT listing_id, title, description, price, location, country,
                   image_url, image_filename, geometry_lng, geometry_lat,
                   owner_id, created_at, updated_at
            FROM listings
            WHERE listing_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ListingRow::into_listing).transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT listing_id, title, description, price, location, country,
                   image_url, image_filename, geometry_lng, geometry_lat,
                   owner_id, created_at, updated_at
            FROM listings
            ORDER BY created_at DESC, listing_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ListingRow::into_listing).collect()
    }

    async fn find_details(&self, id: &ListingId) -> AppResult<Option<ListingDetails>> {
        let Some(row) = sqlx::query_as::<_, ListingWithOwnerRow>(
            r#"
            SELECT l.listing_id, l.title, l.description, l.price, l.location, l.country,
                   l.image_url, l.image_filename, l.geometry_lng, l.geometry_lat,
                   l.owner_id, l.created_at, l.updated_at,
                   u.user_name AS owner_name
            FROM listings l
            JOIN users u ON u.user_id = l.owner_id
            WHERE l.listing_id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let reviews = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT r.review_id, r.rating, r.comment, r.created_at,
                   r.author_id, u.user_name AS author_name
            FROM reviews r
            JOIN users u ON u.user_id = r.author_id
            WHERE r.listing_id = $1
            ORDER BY r.created_at, r.review_id
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let owner = UserSummary {
            id: UserId::from_uuid(row.listing.owner_id),
            user_name: row.owner_name,
        };

        Ok(Some(ListingDetails {
            listing: row.listing.into_listing()?,
            owner,
            reviews: reviews.into_iter().map(ReviewRow::into_review).collect(),
        }))
    }

    async fn update(&self, listing: &Listing) -> AppResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE listings SET
                title = $2,
                description = $3,
                price = $4,
                location = $5,
                country = $6,
                image_url = $7,
                image_filename = $8,
                geometry_lng = $9,
                geometry_lat = $10,
                updated_at = $11
            WHERE listing_id = $1
            "#,
        )
        .bind(listing.id.as_uuid())
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(listing.price.amount())
        .bind(&listing.location)
        .bind(&listing.country)
        .bind(&listing.image.url)
        .bind(&listing.image.filename)
        .bind(listing.geometry.lng())
        .bind(listing.geometry.lat())
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, id: &ListingId) -> AppResult<bool> {
        let deleted = sqlx::query("DELETE FROM listings WHERE listing_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn replace_all(&self, listings: &[Listing]) -> AppResult<Replaced> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM listings")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        for listing in listings {
            insert(&mut *tx, listing).await?;
        }
        tx.commit().await?;

        tracing::info!(
            listings_deleted = deleted,
            listings_inserted = listings.len(),
            "Replaced all listings"
        );
        Ok(Replaced {
            deleted,
            inserted: listings.len() as u64,
        })
    }
}

async fn insert<'e, E>(executor: E, listing: &Listing) -> AppResult<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO listings (
            listing_id,
            title,
            description,
            price,
            location,
            country,
            image_url,
            image_filename,
            geometry_lng,
            geometry_lat,
            owner_id,
            created_at,
            updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(listing.id.as_uuid())
    .bind(&listing.title)
    .bind(&listing.description)
    .bind(listing.price.amount())
    .bind(&listing.location)
    .bind(&listing.country)
    .bind(&listing.image.url)
    .bind(&listing.image.filename)
    .bind(listing.geometry.lng())
    .bind(listing.geometry.lat())
    .bind(listing.owner_id.as_uuid())
    .bind(listing.created_at)
    .bind(listing.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ListingRow {
    listing_id: Uuid,
    title: String,
    description: String,
    price: i64,
    location: String,
    country: String,
    image_url: String,
    image_filename: String,
    geometry_lng: f64,
    geometry_lat: f64,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ListingRow {
    /// Table constraints mirror the value objects; a violation is data corruption
    fn into_listing(self) -> AppResult<Listing> {
        let listing_id = self.listing_id;
        let corrupt = move |e: AppError| {
            AppError::internal(format!("Stored listing {listing_id} is invalid")).with_source(e)
        };

        Ok(Listing {
            id: ListingId::from_uuid(self.listing_id),
            price: Price::new(self.price).map_err(corrupt)?,
            geometry: Geometry::point(self.geometry_lng, self.geometry_lat).map_err(corrupt)?,
            title: self.title,
            description: self.description,
            location: self.location,
            country: self.country,
            image: ListingImage::new(self.image_url, self.image_filename),
            owner_id: UserId::from_uuid(self.owner_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ListingWithOwnerRow {
    #[sqlx(flatten)]
    listing: ListingRow,
    owner_name: String,
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    review_id: Uuid,
    rating: i16,
    comment: String,
    created_at: DateTime<Utc>,
    author_id: Uuid,
    author_name: String,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        Review {
            id: ReviewId::from_uuid(self.review_id),
            rating: self.rating,
            comment: self.comment,
            author: UserSummary {
                id: UserId::from_uuid(self.author_id),
                user_name: self.author_name,
            },
            created_at: self.created_at,
        }
    }
}
