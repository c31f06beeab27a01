//! Spatial index configuration.

use thiserror::Error;

use super::defaults::{
    DEFAULT_BUFFER, DEFAULT_EXTENT, DEFAULT_INDEX_MAX_POINTS, DEFAULT_INDEX_MAX_ZOOM,
    DEFAULT_MAX_ZOOM, DEFAULT_TOLERANCE, MAX_INDEX_ZOOM,
};

/// A configuration value that the spatial index cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid index configuration: {field} - {reason}")]
pub struct InvalidIndexConfig {
    /// Name of the offending setting
    pub field: &'static str,
    /// Why the value was rejected
    pub reason: String,
}

/// Configuration for building a spatial index.
///
/// Groups the tiling parameters of the index, providing the defaults used by
/// the provider map while allowing customization.
///
/// # Example
///
/// ```
/// use paxmap::config::IndexConfig;
///
/// // Using defaults
/// let config = IndexConfig::default();
/// assert_eq!(config.max_zoom(), 18);
/// assert_eq!(config.index_max_zoom(), 5);
/// assert_eq!(config.extent(), 256);
/// assert_eq!(config.buffer(), 64);
///
/// // Custom configuration
/// let config = IndexConfig::new()
///     .with_max_zoom(14)
///     .with_index_max_points(500);
/// assert_eq!(config.index_max_points(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig {
    /// Finest zoom level tiles can be requested at
    max_zoom: u8,
    /// Finest zoom level tiled at build time
    index_max_zoom: u8,
    /// Simplification tolerance in tile pixels
    tolerance: f64,
    /// Tile-local coordinate space size
    extent: u32,
    /// Pixels of overlap around each tile
    buffer: u32,
    /// Split threshold for tiles built eagerly
    index_max_points: usize,
}

impl IndexConfig {
    /// Create a new index configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// A degenerate configuration that keeps every feature in the root tile.
    ///
    /// Every viewport then resolves to that single tile, which reproduces a
    /// map that loads all markers at once.
    pub fn single_tile() -> Self {
        Self {
            max_zoom: 0,
            index_max_zoom: 0,
            index_max_points: usize::MAX,
            ..Self::default()
        }
    }

    /// Set the finest zoom level the index can serve. Default: 18.
    pub fn with_max_zoom(mut self, zoom: u8) -> Self {
        self.max_zoom = zoom;
        self
    }

    /// Set the finest zoom level that is tiled eagerly at build time.
    ///
    /// Finer tiles are produced on first request by drilling down from the
    /// closest built ancestor. Default: 5.
    pub fn with_index_max_zoom(mut self, zoom: u8) -> Self {
        self.index_max_zoom = zoom;
        self
    }

    /// Set the simplification tolerance in tile pixels. Default: 0.
    ///
    /// Point geometries are never simplified; the value is kept so that
    /// configurations written for line data stay valid.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the tile-local coordinate space size. Default: 256.
    pub fn with_extent(mut self, extent: u32) -> Self {
        self.extent = extent;
        self
    }

    /// Set the tile buffer in tile pixels. Default: 64.
    ///
    /// Features within the buffer of a neighbouring tile appear in both
    /// tiles, which is why merged results must be deduplicated.
    pub fn with_buffer(mut self, buffer: u32) -> Self {
        self.buffer = buffer;
        self
    }

    /// Set the point count above which a tile is split at build time. Default: 10 000.
    pub fn with_index_max_points(mut self, points: usize) -> Self {
        self.index_max_points = points;
        self
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    pub fn index_max_zoom(&self) -> u8 {
        self.index_max_zoom
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn extent(&self) -> u32 {
        self.extent
    }

    pub fn buffer(&self) -> u32 {
        self.buffer
    }

    pub fn index_max_points(&self) -> usize {
        self.index_max_points
    }

    /// Check that the values describe a usable tiling.
    pub fn validate(&self) -> Result<(), InvalidIndexConfig> {
        if self.max_zoom > MAX_INDEX_ZOOM {
            return Err(InvalidIndexConfig {
                field: "max_zoom",
                reason: format!("{} exceeds the maximum of {}", self.max_zoom, MAX_INDEX_ZOOM),
            });
        }
        if self.index_max_zoom > self.max_zoom {
            return Err(InvalidIndexConfig {
                field: "index_max_zoom",
                reason: format!(
                    "{} is finer than max_zoom {}",
                    self.index_max_zoom, self.max_zoom
                ),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(InvalidIndexConfig {
                field: "tolerance",
                reason: format!("{} must be a non-negative number", self.tolerance),
            });
        }
        if self.extent == 0 {
            return Err(InvalidIndexConfig {
                field: "extent",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.buffer >= self.extent {
            return Err(InvalidIndexConfig {
                field: "buffer",
                reason: format!("{} must be smaller than extent {}", self.buffer, self.extent),
            });
        }
        if self.index_max_points == 0 {
            return Err(InvalidIndexConfig {
                field: "index_max_points",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_zoom: DEFAULT_MAX_ZOOM,
            index_max_zoom: DEFAULT_INDEX_MAX_ZOOM,
            tolerance: DEFAULT_TOLERANCE,
            extent: DEFAULT_EXTENT,
            buffer: DEFAULT_BUFFER,
            index_max_points: DEFAULT_INDEX_MAX_POINTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.max_zoom(), DEFAULT_MAX_ZOOM);
        assert_eq!(config.index_max_zoom(), DEFAULT_INDEX_MAX_ZOOM);
        assert_eq!(config.tolerance(), DEFAULT_TOLERANCE);
        assert_eq!(config.extent(), DEFAULT_EXTENT);
        assert_eq!(config.buffer(), DEFAULT_BUFFER);
        assert_eq!(config.index_max_points(), DEFAULT_INDEX_MAX_POINTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(IndexConfig::new(), IndexConfig::default());
    }

    #[test]
    fn test_builder_leaves_other_fields() {
        let config = IndexConfig::new().with_buffer(16);
        assert_eq!(config.buffer(), 16);
        assert_eq!(config.extent(), DEFAULT_EXTENT); // Unchanged
    }

    #[test]
    fn test_single_tile_is_valid() {
        let config = IndexConfig::single_tile();
        assert_eq!(config.max_zoom(), 0);
        assert_eq!(config.index_max_zoom(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_index_max_zoom_above_max_zoom() {
        let err = IndexConfig::new()
            .with_max_zoom(4)
            .with_index_max_zoom(5)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "index_max_zoom");
    }

    #[test]
    fn test_rejects_max_zoom_above_ceiling() {
        let err = IndexConfig::new().with_max_zoom(25).validate().unwrap_err();
        assert_eq!(err.field, "max_zoom");
    }

    #[test]
    fn test_rejects_buffer_not_smaller_than_extent() {
        let err = IndexConfig::new()
            .with_extent(64)
            .with_buffer(64)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "buffer");
        assert!(err.to_string().contains("extent 64"));
    }

    #[test]
    fn test_rejects_negative_tolerance() {
        let err = IndexConfig::new().with_tolerance(-1.0).validate().unwrap_err();
        assert_eq!(err.field, "tolerance");
    }

    #[test]
    fn test_rejects_zero_split_threshold() {
        let err = IndexConfig::new()
            .with_index_max_points(0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field, "index_max_points");
    }
}
