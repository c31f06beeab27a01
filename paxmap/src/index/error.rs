//! Error types for spatial index construction.

use thiserror::Error;

use crate::config::InvalidIndexConfig;

/// Reasons a feature collection cannot be indexed.
///
/// Tile lookups never fail; only building the index does.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// The configuration does not describe a usable tiling
    #[error(transparent)]
    InvalidConfig(#[from] InvalidIndexConfig),

    /// The collection has no features to index
    #[error("Feature collection is empty")]
    EmptyCollection,

    /// A feature has a null geometry
    #[error("Feature #{index} has no geometry")]
    MissingGeometry {
        /// Position of the feature in the collection
        index: usize,
    },

    /// A feature's geometry contains no vertices
    #[error("Feature #{index} has an empty geometry")]
    EmptyGeometry {
        /// Position of the feature in the collection
        index: usize,
    },

    /// A vertex is not a usable `[lng, lat]` pair
    #[error("Feature #{index} has an invalid coordinate: {reason}")]
    InvalidCoordinate {
        /// Position of the feature in the collection
        index: usize,
        /// What is wrong with the coordinate
        reason: String,
    },

    /// Two features share the same explicit id
    #[error("Duplicate feature id {id} (features #{first} and #{second})")]
    DuplicateId {
        id: u64,
        first: usize,
        second: usize,
    },
}
