//! Application Configuration
//!
//! Configuration for the listing workflow and its outbound adapters.

use std::time::Duration;

/// Forward geocoding (Mapbox places API)
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub access_token: String,
    pub timeout: Duration,
}

impl GeocodingConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            endpoint: "https://api.mapbox.com/geocoding/v5/mapbox.places".to_string(),
            access_token: access_token.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Signed image uploads (Cloudinary)
#[derive(Debug, Clone)]
pub struct ImageStoreConfig {
    pub endpoint: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder every upload lands in
    pub folder: String,
    pub timeout: Duration,
}

impl ImageStoreConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            folder: "wanderlust_DEV".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListingConfig {
    pub geocoding: GeocodingConfig,
    pub image_store: ImageStoreConfig,
    /// Request body limit for listing forms, image included
    pub max_upload_bytes: usize,
}

impl ListingConfig {
    pub fn new(geocoding: GeocodingConfig, image_store: ImageStoreConfig) -> Self {
        Self {
            geocoding,
            image_store,
            max_upload_bytes: 10 * 1024 * 1024, // 10 MiB
        }
    }

    /// Placeholder credentials; for tests that never reach the services
    pub fn development() -> Self {
        Self::new(
            GeocodingConfig::new("dev-map-token"),
            ImageStoreConfig::new("dev-cloud", "dev-key", "dev-secret"),
        )
    }
}
