//! Geometry Value Object
//!
//! A GeoJSON point, `{"type": "Point", "coordinates": [lng, lat]}`.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

const POINT: &str = "Point";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonPoint", into = "GeoJsonPoint")]
pub struct Geometry {
    lng: f64,
    lat: f64,
}

impl Geometry {
    pub fn point(lng: f64, lat: f64) -> AppResult<Self> {
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::unprocessable(format!(
                "Longitude {lng} is outside [-180, 180]"
            )));
        }
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::unprocessable(format!(
                "Latitude {lat} is outside [-90, 90]"
            )));
        }
        Ok(Self { lng, lat })
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn coordinates(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// Wire form shared by the views and the geocoding response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

impl TryFrom<GeoJsonPoint> for Geometry {
    type Error = AppError;

    fn try_from(point: GeoJsonPoint) -> AppResult<Self> {
        if point.kind != POINT {
            return Err(AppError::unprocessable(format!(
                "Expected a Point geometry, got {}",
                point.kind
            )));
        }
        match point.coordinates.as_slice() {
            [lng, lat] => Geometry::point(*lng, *lat),
            other => Err(AppError::unprocessable(format!(
                "A point has two coordinates, got {}",
                other.len()
            ))),
        }
    }
}

impl From<Geometry> for GeoJsonPoint {
    fn from(geometry: Geometry) -> Self {
        Self {
            kind: POINT.to_string(),
            coordinates: geometry.coordinates().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Geometry::point(180.0, -90.0).is_ok());
        assert!(Geometry::point(180.1, 0.0).is_err());
        assert!(Geometry::point(0.0, 90.5).is_err());
        assert!(Geometry::point(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_serializes_as_geojson() {
        let geometry = Geometry::point(-74.006, 40.7128).unwrap();
        let json = serde_json::to_value(geometry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Point", "coordinates": [-74.006, 40.7128]})
        );
    }

    #[test]
    fn test_rejects_non_point() {
        let line: Result<Geometry, _> = serde_json::from_value(
            serde_json::json!({"type": "LineString", "coordinates": [1.0, 2.0]}),
        );
        assert!(line.is_err());

        let short: Result<Geometry, _> =
            serde_json::from_value(serde_json::json!({"type": "Point", "coordinates": [1.0]}));
        assert!(short.is_err());
    }
}
