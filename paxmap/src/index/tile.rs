//! Index tiles and their features.

use std::sync::Arc;

use super::convert::ProjectedFeature;
use crate::coord::TileKey;
use crate::geojson::ProviderProperties;

/// A feature as it appears inside one tile.
///
/// The same source feature can appear in several tiles (tile buffers
/// overlap); every copy carries the same `id` and shares the same tags.
#[derive(Debug, Clone, PartialEq)]
pub struct TileFeature {
    /// Stable id, unique within the source collection
    pub id: u64,
    /// Vertices in tile-local pixels, `[x, y]`.
    ///
    /// Values fall in `[0, extent]` for vertices inside the tile proper and
    /// slightly outside for vertices inside the buffer.
    pub geometry: Vec<[i32; 2]>,
    /// Original feature properties
    pub tags: Arc<ProviderProperties>,
}

/// One tile of the spatial index.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub key: TileKey,
    pub features: Vec<TileFeature>,
    /// Total number of vertices across `features`
    pub num_points: usize,
}

impl Tile {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Cache entry for a tile: the rendered tile plus what is needed to split it.
#[derive(Debug)]
pub(crate) struct TileSlot {
    pub tile: Arc<Tile>,
    /// Projected features kept for lazy drill-down; `None` once split
    pub source: Option<Vec<Arc<ProjectedFeature>>>,
    /// Projected bounds of the tile's content
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl TileSlot {
    /// Build the tile for `key` from the features clipped to it.
    pub fn create(key: TileKey, features: &[Arc<ProjectedFeature>], extent: u32) -> Self {
        let z2 = key.tiles_per_axis() as f64;
        let extent = extent as f64;
        let (tx, ty) = (key.x as f64, key.y as f64);

        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        let mut num_points = 0;
        let mut tile_features = Vec::with_capacity(features.len());

        for feature in features {
            for axis in 0..2 {
                min[axis] = min[axis].min(feature.min[axis]);
                max[axis] = max[axis].max(feature.max[axis]);
            }
            let geometry: Vec<[i32; 2]> = feature
                .points
                .iter()
                .map(|p| {
                    [
                        (extent * (p[0] * z2 - tx)).round() as i32,
                        (extent * (p[1] * z2 - ty)).round() as i32,
                    ]
                })
                .collect();
            num_points += geometry.len();
            tile_features.push(TileFeature {
                id: feature.id,
                geometry,
                tags: Arc::clone(&feature.tags),
            });
        }

        Self {
            tile: Arc::new(Tile {
                key,
                features: tile_features,
                num_points,
            }),
            source: None,
            min,
            max,
        }
    }
}
