//! GeoJSON document model for provider locations.
//!
//! Only the subset needed by the map is modelled: a single
//! `FeatureCollection` whose features carry [`ProviderProperties`]. Point
//! geometries are the norm; other geometry types are accepted and their
//! vertices are indexed as points.
//!
//! # Example
//!
//! ```
//! use paxmap::geojson::FeatureCollection;
//!
//! let doc = r#"{
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "id": 7,
//!         "geometry": { "type": "Point", "coordinates": [-77.03, 38.90] },
//!         "properties": {
//!             "provider_name": "Dupont Pharmacy",
//!             "lat": 38.90,
//!             "lng": -77.03
//!         }
//!     }]
//! }"#;
//!
//! let collection = FeatureCollection::parse(doc).unwrap();
//! assert_eq!(collection.len(), 1);
//! assert_eq!(collection.features[0].explicit_id(), Some(7));
//! ```

mod types;

pub use types::{Feature, FeatureCollection, GeoJsonError, Geometry, Position, ProviderProperties};
