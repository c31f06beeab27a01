//! The multi-resolution point index.
//!
//! Tiles down to `index_max_zoom` are built eagerly; finer tiles are cut on
//! first request from the nearest ancestor that still holds its source
//! features.
//!
//! # Thread Safety
//!
//! The tile store sits behind a `parking_lot::RwLock`. Cache hits take the
//! read lock only; a miss upgrades to the write lock, re-checks, then drills
//! down. Callers only ever see `&SpatialIndex`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::clip::{clip, Axis};
use super::convert::{convert, ProjectedFeature};
use super::error::IndexError;
use super::tile::{Tile, TileSlot};
use crate::config::IndexConfig;
use crate::coord::{self, LatLng, TileKey};
use crate::geojson::FeatureCollection;

type TileStore = HashMap<TileKey, TileSlot>;

/// Summary of a built index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexStats {
    /// Number of source features
    pub features: usize,
    /// Number of source vertices
    pub points: usize,
    /// Tiles currently held in the store (grows with lazy drill-down)
    pub tiles: usize,
    /// South-west corner of the data
    pub south_west: LatLng,
    /// North-east corner of the data
    pub north_east: LatLng,
}

/// Zoom/tile-indexed view of a feature collection.
///
/// Built once per dataset and read-only afterwards; the internal tile cache
/// is the only mutable state.
///
/// # Example
///
/// ```
/// use paxmap::config::IndexConfig;
/// use paxmap::geojson::{Feature, FeatureCollection, ProviderProperties};
/// use paxmap::index::SpatialIndex;
///
/// let collection = FeatureCollection::new(vec![Feature::point(
///     Some(1),
///     ProviderProperties::new("Pharmacy", 38.90, -77.03),
/// )]);
/// let index = SpatialIndex::build(&collection, IndexConfig::default()).unwrap();
///
/// let root = index.get_tile(0, 0, 0).unwrap();
/// assert_eq!(root.len(), 1);
/// ```
#[derive(Debug)]
pub struct SpatialIndex {
    config: IndexConfig,
    features: usize,
    points: usize,
    min: [f64; 2],
    max: [f64; 2],
    store: RwLock<TileStore>,
}

impl SpatialIndex {
    /// Build the index for a collection.
    ///
    /// Fails on an invalid configuration, an empty collection or a feature
    /// without usable coordinates.
    pub fn build(collection: &FeatureCollection, config: IndexConfig) -> Result<Self, IndexError> {
        config.validate()?;
        if collection.is_empty() {
            return Err(IndexError::EmptyCollection);
        }

        let started = Instant::now();
        let features = convert(collection)?;
        let points: usize = features.iter().map(|f| f.points.len()).sum();

        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for feature in &features {
            for axis in 0..2 {
                min[axis] = min[axis].min(feature.min[axis]);
                max[axis] = max[axis].max(feature.max[axis]);
            }
        }

        let index = Self {
            config,
            features: features.len(),
            points,
            min,
            max,
            store: RwLock::new(HashMap::new()),
        };

        {
            let mut store = index.store.write();
            index.split_tile(&mut store, features, TileKey::new(0, 0, 0), None);
        }

        debug!(
            features = index.features,
            points = index.points,
            tiles = index.store.read().len(),
            elapsed = ?started.elapsed(),
            "Built spatial index"
        );
        Ok(index)
    }

    /// Look up the tile at `zoom/x/y`.
    ///
    /// `x` wraps around the antimeridian. Returns `None` above `max_zoom`,
    /// for rows outside the world, and for tiles that hold no features.
    pub fn get_tile(&self, zoom: u8, x: i64, y: i64) -> Option<Arc<Tile>> {
        if zoom > self.config.max_zoom() {
            return None;
        }
        let z2 = 1i64 << zoom;
        if y < 0 || y >= z2 {
            return None;
        }
        let key = TileKey::new(zoom, x.rem_euclid(z2) as u32, y as u32);

        if let Some(slot) = self.store.read().get(&key) {
            return Some(Arc::clone(&slot.tile));
        }

        let mut store = self.store.write();
        // Another caller may have cut it while we waited
        if let Some(slot) = store.get(&key) {
            return Some(Arc::clone(&slot.tile));
        }

        let mut ancestor = key.parent();
        while let Some(parent) = ancestor {
            if store.contains_key(&parent) {
                break;
            }
            ancestor = parent.parent();
        }
        let parent = ancestor?;
        let source = store.get_mut(&parent).and_then(|slot| slot.source.take())?;

        trace!(tile = %key, from = %parent, "Drilling down");
        self.split_tile(&mut store, source, parent, Some(key));

        store.get(&key).map(|slot| Arc::clone(&slot.tile))
    }

    /// Configuration the index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Counts and geographic bounds of the indexed data.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            features: self.features,
            points: self.points,
            tiles: self.store.read().len(),
            south_west: coord::unproject(self.min[0], self.max[1]),
            north_east: coord::unproject(self.max[0], self.min[1]),
        }
    }

    /// Create `key` from `features` and keep splitting.
    ///
    /// Without a target, tiles are split until `index_max_zoom` or until they
    /// hold few enough points. With a target, only tiles on the path towards
    /// it are split; their siblings are created and keep their source.
    fn split_tile(
        &self,
        store: &mut TileStore,
        features: Vec<Arc<ProjectedFeature>>,
        key: TileKey,
        target: Option<TileKey>,
    ) {
        let extent = self.config.extent();
        let k1 = 0.5 * self.config.buffer() as f64 / extent as f64;
        let k2 = 0.5 - k1;
        let k3 = 0.5 + k1;
        let k4 = 1.0 + k1;

        let mut stack = vec![(features, key)];
        while let Some((features, key)) = stack.pop() {
            let slot = store
                .entry(key)
                .or_insert_with(|| TileSlot::create(key, &features, extent));

            let stop = match target {
                None => {
                    key.zoom == self.config.index_max_zoom()
                        || slot.tile.num_points <= self.config.index_max_points()
                }
                Some(target) => {
                    if key.zoom == self.config.max_zoom() || key.zoom == target.zoom {
                        true
                    } else {
                        let steps = target.zoom - key.zoom;
                        key.x != target.x >> steps || key.y != target.y >> steps
                    }
                }
            };
            if stop {
                if key.zoom < self.config.max_zoom() {
                    slot.source = Some(features);
                }
                continue;
            }
            slot.source = None;

            let (min, max) = (slot.min, slot.max);
            let scale = key.tiles_per_axis() as f64;
            let (x, y) = (key.x as f64, key.y as f64);
            let [nw, sw, ne, se] = key.children();

            let left = clip(&features, scale, x - k1, x + k3, Axis::X, min[0], max[0]);
            let right = clip(&features, scale, x + k2, x + k4, Axis::X, min[0], max[0]);

            for (half, (north, south)) in [(left, (nw, sw)), (right, (ne, se))] {
                let Some(half) = half else { continue };
                let top = clip(&half, scale, y - k1, y + k3, Axis::Y, min[1], max[1]);
                let bottom = clip(&half, scale, y + k2, y + k4, Axis::Y, min[1], max[1]);
                if let Some(top) = top {
                    stack.push((top, north));
                }
                if let Some(bottom) = bottom {
                    stack.push((bottom, south));
                }
            }
        }
    }
}
