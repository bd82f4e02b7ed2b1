//! Mapbox forward geocoding adapter
//!
//! `GET {endpoint}/{query}.json?access_token=...&limit=1`; the first
//! feature's geometry is the answer.

use kernel::error::app_error::{AppError, AppResult};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::application::config::GeocodingConfig;
use crate::domain::ports::Geocoder;
use crate::domain::value_object::geometry::{GeoJsonPoint, Geometry};
use crate::infra::{status_error, transport_error};

const SERVICE: &str = "Geocoding service";

pub struct MapboxGeocoder {
    client: Client,
    endpoint: Url,
    access_token: String,
}

impl MapboxGeocoder {
    /// # Errors
    ///
    /// Fails when the endpoint is not a valid base URL or the HTTP client
    /// cannot be built.
    pub fn new(config: &GeocodingConfig) -> AppResult<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                AppError::internal(format!("Invalid geocoding endpoint: {}", config.endpoint))
            })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal("Failed to build HTTP client").with_source(e))?;

        Ok(Self {
            client,
            endpoint,
            access_token: config.access_token.clone(),
        })
    }

    fn request_url(&self, query: &str) -> AppResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::internal("Geocoding endpoint cannot be a base"))?
            .pop_if_empty()
            .push(&format!("{query}.json"));
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("limit", "1");
        Ok(url)
    }
}

impl Geocoder for MapboxGeocoder {
    async fn forward(&self, query: &str) -> AppResult<Option<Geometry>> {
        let url = self.request_url(query)?;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        if !status.is_success() {
            return Err(status_error(SERVICE, status, error_message(&body)));
        }

        let geometry = parse_first_geometry(&body)?;
        tracing::debug!(query, found = geometry.is_some(), "Geocoded location");
        Ok(geometry)
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: GeoJsonPoint,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn parse_first_geometry(body: &[u8]) -> AppResult<Option<Geometry>> {
    let decoded: GeocodeResponse = serde_json::from_slice(body)
        .map_err(|e| AppError::bad_gateway("Invalid geocoding response").with_source(e))?;

    decoded
        .features
        .into_iter()
        .next()
        .map(|feature| {
            Geometry::try_from(feature.geometry).map_err(|e| {
                AppError::bad_gateway("Geocoding service returned an invalid point").with_source(e)
            })
        })
        .transpose()
}

fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.message)
}
