//! Spatial index over provider features.
//!
//! Converts a flat [`FeatureCollection`](crate::geojson::FeatureCollection)
//! into a hierarchy of slippy-map tiles so that only the features near a
//! viewport need to be looked at.
//!
//! # Architecture
//!
//! ```text
//! FeatureCollection ──► convert ──► root tile (0/0/0)
//!                                        │ split (clip x, then y, with buffer)
//!                                        ▼
//!                              eager tiles ≤ index_max_zoom
//!                                        │ get_tile() miss
//!                                        ▼
//!                              lazy drill-down ≤ max_zoom
//! ```
//!
//! Tiles overlap by `buffer` pixels, so a feature near a tile edge is
//! present in every neighbour whose buffer covers it. Consumers merging
//! several tiles must deduplicate by [`TileFeature::id`].

mod clip;
mod convert;
mod error;
mod spatial;
mod tile;

pub use error::IndexError;
pub use spatial::{IndexStats, SpatialIndex};
pub use tile::{Tile, TileFeature};
