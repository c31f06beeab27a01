//! Serde types for the provider feature collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A GeoJSON position: `[lng, lat]` with an optional trailing altitude.
pub type Position = Vec<f64>;

/// Errors raised while decoding a GeoJSON document.
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// The document is not valid JSON or does not match the expected shape
    #[error("Invalid GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The top-level object is some other GeoJSON type
    #[error("Expected a FeatureCollection, found '{0}'")]
    NotAFeatureCollection(String),
}

/// Geometry of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

impl Geometry {
    /// All vertices of the geometry, flattened in document order.
    pub fn vertices(&self) -> Vec<&Position> {
        match self {
            Geometry::Point { coordinates } => vec![coordinates],
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                coordinates.iter().collect()
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                coordinates.iter().flatten().collect()
            }
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().flatten().flatten().collect()
            }
        }
    }
}

/// Properties of a treatment provider location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProperties {
    pub provider_name: String,
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub state_code: String,
    /// Latitude used for marker placement
    pub lat: f64,
    /// Longitude used for marker placement
    pub lng: f64,
    /// Treatment name → number of courses
    #[serde(default)]
    pub treatments: BTreeMap<String, u64>,
}

impl ProviderProperties {
    /// Minimal properties for a named provider at a coordinate.
    pub fn new(provider_name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            provider_name: provider_name.into(),
            address1: String::new(),
            address2: None,
            city: String::new(),
            county: None,
            zip_code: String::new(),
            state_code: String::new(),
            lat,
            lng,
            treatments: BTreeMap::new(),
        }
    }
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<Geometry>,
    pub properties: ProviderProperties,
}

impl Feature {
    /// Build a point feature located at its properties' coordinate.
    pub fn point(id: Option<u64>, properties: ProviderProperties) -> Self {
        Self {
            id: id.map(serde_json::Value::from),
            geometry: Some(Geometry::Point {
                coordinates: vec![properties.lng, properties.lat],
            }),
            properties,
        }
    }

    /// The feature's `id` when it is a non-negative integer.
    ///
    /// String ids and other JSON values are treated as absent.
    pub fn explicit_id(&self) -> Option<u64> {
        self.id.as_ref().and_then(serde_json::Value::as_u64)
    }
}

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features,
        }
    }

    /// Decode a document, requiring the top-level type to be `FeatureCollection`.
    pub fn parse(json: &str) -> Result<Self, GeoJsonError> {
        Self::from_slice(json.as_bytes())
    }

    /// Decode a document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, GeoJsonError> {
        let collection: FeatureCollection = serde_json::from_slice(bytes)?;
        if collection.kind != "FeatureCollection" {
            return Err(GeoJsonError::NotAFeatureCollection(collection.kind));
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
