//! Startup Configuration
//!
//! Read once from the environment (after `.env` is loaded) and split into the
//! per-crate configs handed to the routers.

use std::net::SocketAddr;

use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use listing::ListingConfig;
use listing::application::config::{GeocodingConfig, ImageStoreConfig};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub auth: AuthConfig,
    pub listing: ListingConfig,
}

impl AppConfig {
    /// Release builds require `SESSION_SECRET`; debug builds fall back to a
    /// random one.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), !cfg!(debug_assertions))
    }

    pub fn from_lookup<F>(lookup: F, release: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database_url = required("DATABASE_URL")?;
        let geocoding = GeocodingConfig::new(required("MAP_TOKEN")?);
        let image_store = ImageStoreConfig::new(
            required("CLOUD_NAME")?,
            required("CLOUD_API_KEY")?,
            required("CLOUD_API_SECRET")?,
        );

        let auth = match lookup("SESSION_SECRET") {
            Some(encoded) => {
                let config = AuthConfig {
                    session_secret: decode_secret(&encoded)?,
                    ..AuthConfig::default()
                };
                if release {
                    config
                } else {
                    AuthConfig {
                        cookie_secure: false,
                        ..config
                    }
                }
            }
            None if release => return Err(ConfigError::Missing("SESSION_SECRET")),
            None => AuthConfig::development(),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                reason: format!("'{raw}' is not a port number"),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            auth,
            listing: ListingConfig::new(geocoding, image_store),
        })
    }
}

fn decode_secret(encoded: &str) -> Result<[u8; 32], ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "SESSION_SECRET",
        reason,
    };

    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| invalid(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| invalid(format!("expected 32 bytes, got {}", bytes.len())))
}
