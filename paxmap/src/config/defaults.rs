//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use std::path::PathBuf;

use super::index::IndexConfig;
use super::settings::*;
use crate::coord::LatLng;

// =============================================================================
// Spatial index
// =============================================================================

/// Finest zoom level the index can serve.
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Finest zoom level tiled eagerly at build time.
pub const DEFAULT_INDEX_MAX_ZOOM: u8 = 5;

/// Simplification tolerance in tile pixels (0 = none).
pub const DEFAULT_TOLERANCE: f64 = 0.0;

/// Tile-local coordinate space size.
pub const DEFAULT_EXTENT: u32 = 256;

/// Pixels of overlap added around each tile.
pub const DEFAULT_BUFFER: u32 = 64;

/// Point count above which an eagerly built tile is split further.
pub const DEFAULT_INDEX_MAX_POINTS: usize = 10_000;

/// Hard ceiling on `max_zoom` (tile indices must fit in 32 bits).
pub const MAX_INDEX_ZOOM: u8 = 24;

// =============================================================================
// Map view
// =============================================================================

/// Initial map center (Washington, DC).
pub const DEFAULT_CENTER: LatLng = LatLng::new(38.907132, -77.036546);

/// Initial zoom level, also used when centering on a located user.
pub const DEFAULT_ZOOM: u8 = 15;

/// Lowest zoom level the map allows.
pub const DEFAULT_MIN_ZOOM: u8 = 0;

/// Highest zoom level the map allows.
pub const DEFAULT_MAP_MAX_ZOOM: u8 = 18;

/// Viewport size in pixels for headless sessions.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 800;

// =============================================================================
// Data
// =============================================================================

/// Location of the feature collection on disk, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/geojson_data.json";

/// URL path the feature collection is served from.
pub const DATA_URL_PATH: &str = "/data/geojson_data.json";

/// `max-age` advertised for the data endpoint, in seconds.
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 100;

// =============================================================================
// Logging
// =============================================================================

/// Log file name inside the config directory.
pub const DEFAULT_LOG_FILE: &str = "paxmap.log";

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAP_MAX_ZOOM,
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            locate_set_view: true,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            data: DataSettings {
                path: PathBuf::from(DEFAULT_DATA_PATH),
                timeout: None,
                cache_max_age: DEFAULT_CACHE_MAX_AGE_SECS,
            },
            index: IndexConfig::default(),
            map: MapSettings::default(),
            logging: LoggingSettings {
                file: config_dir.join(DEFAULT_LOG_FILE),
            },
        }
    }
}
