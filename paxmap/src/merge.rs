//! Merging of tile contents into one feature set.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::index::{Tile, TileFeature};

/// Flatten tiles into their features, one entry per feature id.
///
/// Absent tiles are skipped. Buffered tiles overlap, so the same feature
/// usually arrives from several tiles; the first copy seen is kept. The
/// result is ordered by id.
pub fn merge<'a, I>(tiles: I) -> Vec<TileFeature>
where
    I: IntoIterator<Item = &'a Option<Arc<Tile>>>,
{
    let mut by_id: BTreeMap<u64, &TileFeature> = BTreeMap::new();
    for tile in tiles.into_iter().flatten() {
        for feature in &tile.features {
            by_id.entry(feature.id).or_insert(feature);
        }
    }
    by_id.into_values().cloned().collect()
}
