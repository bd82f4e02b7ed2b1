//! Seeder Entry Point
//!
//! Replaces the contents of the listings table with the sample data set,
//! every listing owned by the user in `SEED_OWNER_ID`. Run migrations (start
//! the API once) and sign that user up first.

mod data;
mod seeder;

use std::env;
use std::time::Duration;

use anyhow::Context;
use kernel::id::UserId;
use listing::PgListingRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,listing=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let owner: UserId = env::var("SEED_OWNER_ID")
        .context("SEED_OWNER_ID must be set")?
        .parse()
        .context("SEED_OWNER_ID must be a user id (UUID)")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    let repo = PgListingRepository::new(pool);
    let report = seeder::reseed(&repo, owner).await?;

    tracing::info!(
        deleted = report.deleted,
        inserted = report.inserted,
        "Seeding completed"
    );
    Ok(())
}
