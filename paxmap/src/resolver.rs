//! Viewport to tile resolution.
//!
//! Finds the index tiles that cover a [`MapPosition`] and fetches them.

use std::sync::Arc;

use tracing::trace;

use crate::coord::{self, PixelBounds};
use crate::index::{SpatialIndex, Tile};
use crate::viewport::MapPosition;

/// Worlds to either side of the real one a viewport may reach before it is
/// treated as off the map.
const MAX_WORLD_COPIES: i64 = 1 << 10;

/// Tile addresses covering a viewport, as `(zoom, x, y)`.
///
/// `x` is left unwrapped (it may be negative or past the last column) since
/// the index wraps it; `y` is always inside the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRange {
    pub zoom: u8,
    pub x: std::ops::RangeInclusive<i64>,
    pub y: std::ops::RangeInclusive<i64>,
}

impl TileRange {
    /// All `(x, y)` pairs, column by column.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.x
            .clone()
            .flat_map(move |x| self.y.clone().map(move |y| (x, y)))
    }

    pub fn len(&self) -> usize {
        let count = |r: &std::ops::RangeInclusive<i64>| {
            if r.is_empty() {
                0
            } else {
                (r.end() - r.start() + 1) as usize
            }
        };
        count(&self.x) * count(&self.y)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Looks up the tiles under a viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileResolver;

impl TileResolver {
    /// Tiles of `index` covering `position`, in column order.
    ///
    /// Tiles without features are kept as `None` entries. A malformed
    /// position resolves to nothing.
    pub fn resolve(index: &SpatialIndex, position: &MapPosition) -> Vec<Option<Arc<Tile>>> {
        let Some(range) = Self::covering_tiles(position, index.config().max_zoom()) else {
            return Vec::new();
        };
        trace!(zoom = range.zoom, tiles = range.len(), "Resolving viewport");
        range
            .iter()
            .map(|(x, y)| index.get_tile(range.zoom, x, y))
            .collect()
    }

    /// The tile rectangle covering `position`, never finer than `max_zoom`.
    ///
    /// When the viewport is zoomed in past `max_zoom`, its pixel bounds are
    /// scaled down to `max_zoom` so the finest available tiles are used.
    /// Returns `None` for a malformed position, or one more than
    /// [`MAX_WORLD_COPIES`] worlds away from the map.
    pub fn covering_tiles(position: &MapPosition, max_zoom: u8) -> Option<TileRange> {
        if !position.is_valid() {
            return None;
        }

        let (zoom, bounds) = if position.zoom > max_zoom {
            let factor = 0.5_f64.powi((position.zoom - max_zoom) as i32);
            (max_zoom, position.pixel_bounds.scale(factor))
        } else {
            (position.zoom, position.pixel_bounds)
        };
        tile_range(zoom, &bounds)
    }
}

fn tile_range(zoom: u8, bounds: &PixelBounds) -> Option<TileRange> {
    let n = 1i64 << zoom;
    let (x0, y0) = coord::tile_for_pixel(bounds.min);
    let (x1, y1) = coord::tile_for_pixel(bounds.max);

    let limit = n * MAX_WORLD_COPIES;
    if x0 < -limit || x1 > limit {
        return None;
    }

    // More columns than the world has would only repeat tiles
    let x1 = x1.min(x0.saturating_add(n - 1));
    let y0 = y0.max(0);
    let y1 = y1.min(n - 1);

    Some(TileRange {
        zoom,
        x: x0..=x1,
        y: y0..=y1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{LatLng, PixelPoint};

    fn position(zoom: u8, min: (f64, f64), max: (f64, f64)) -> MapPosition {
        let bounds = PixelBounds::new(PixelPoint::new(min.0, min.1), PixelPoint::new(max.0, max.1));
        MapPosition {
            zoom,
            center: LatLng::new(0.0, 0.0),
            pixel_center: PixelPoint::new((min.0 + max.0) / 2.0, (min.1 + max.1) / 2.0),
            pixel_bounds: bounds,
        }
    }

    #[test]
    fn test_inclusive_rectangle() {
        let range =
            TileResolver::covering_tiles(&position(3, (300.0, 10.0), (700.0, 600.0)), 18).unwrap();
        assert_eq!(range.zoom, 3);
        assert_eq!(range.x, 1..=2);
        assert_eq!(range.y, 0..=2);
        assert_eq!(range.len(), 6);
        assert_eq!(range.iter().next(), Some((1, 0)));
    }

    #[test]
    fn test_rows_are_clipped_to_world() {
        let range =
            TileResolver::covering_tiles(&position(1, (0.0, -300.0), (100.0, 900.0)), 18).unwrap();
        assert_eq!(range.y, 0..=1);
    }

    #[test]
    fn test_columns_are_capped() {
        let range =
            TileResolver::covering_tiles(&position(1, (-256.0, 0.0), (2000.0, 10.0)), 18)
                .unwrap();
        assert_eq!(range.x, -1..=0);
    }

    #[test]
    fn test_zoom_beyond_max_is_rescaled() {
        // 1024px wide at z20 is 256px wide at z18
        let range = TileResolver::covering_tiles(
            &position(20, (4096.0, 4096.0), (5120.0, 5120.0)),
            18,
        )
        .unwrap();
        assert_eq!(range.zoom, 18);
        assert_eq!(range.x, 4..=5);
        assert_eq!(range.y, 4..=5);
    }

    #[test]
    fn test_malformed_position() {
        let inverted = position(3, (700.0, 10.0), (300.0, 600.0));
        assert!(TileResolver::covering_tiles(&inverted, 18).is_none());

        let mut nan = position(3, (0.0, 0.0), (10.0, 10.0));
        nan.center = LatLng::new(f64::NAN, 0.0);
        assert!(TileResolver::covering_tiles(&nan, 18).is_none());
    }

    #[test]
    fn test_viewport_far_off_the_map_is_rejected() {
        let east = position(5, (1e300, 0.0), (1e300 + 1280.0, 800.0));
        assert!(TileResolver::covering_tiles(&east, 18).is_none());

        let west = position(5, (-1e300 - 1280.0, 0.0), (-1e300, 800.0));
        assert!(TileResolver::covering_tiles(&west, 18).is_none());
    }

    #[test]
    fn test_viewport_a_few_worlds_over_still_resolves() {
        // Three worlds east of the real one at zoom 2 (1024px per world)
        let range =
            TileResolver::covering_tiles(&position(2, (3072.0, 0.0), (3300.0, 100.0)), 18)
                .unwrap();
        assert_eq!(range.x, 12..=12);
        assert_eq!(range.y, 0..=0);
    }

    #[test]
    fn test_viewport_above_the_world_is_empty() {
        let range =
            TileResolver::covering_tiles(&position(2, (0.0, -900.0), (100.0, -600.0)), 18).unwrap();
        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
    }
}
