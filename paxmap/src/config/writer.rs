//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let timeout = config
        .data
        .timeout
        .map(|t| t.to_string())
        .unwrap_or_default();
    let locate_set_view = if config.map.locate_set_view {
        "true"
    } else {
        "false"
    };

    format!(
        r#"[data]
; Path to the provider GeoJSON FeatureCollection
path = {}
; Seconds to wait for the data before giving up (empty = wait indefinitely)
timeout = {}
; Cache-Control max-age advertised for the data endpoint, in seconds
cache_max_age = {}

[index]
; Finest zoom level the spatial index serves (0-24)
max_zoom = {}
; Finest zoom level tiled up front; finer tiles are built on first request
index_max_zoom = {}
; Simplification tolerance in tile pixels (points are never simplified)
tolerance = {}
; Tile coordinate space size
extent = {}
; Pixels of overlap around each tile
buffer = {}
; Split tiles holding more points than this while building
index_max_points = {}

[map]
; Initial map center
center_lat = {}
center_lng = {}
; Initial zoom level, also used when centering on your location
zoom = {}
min_zoom = {}
max_zoom = {}
; Viewport size in pixels
width = {}
height = {}
; Move the map to your location once it is found
locate_set_view = {}

[logging]
; Log file path
file = {}
"#,
        path_to_string(&config.data.path),
        timeout,
        config.data.cache_max_age,
        config.index.max_zoom(),
        config.index.index_max_zoom(),
        config.index.tolerance(),
        config.index.extent(),
        config.index.buffer(),
        config.index.index_max_points(),
        config.map.center.lat,
        config.map.center.lng,
        config.map.zoom,
        config.map.min_zoom,
        config.map.max_zoom,
        config.map.width,
        config.map.height,
        locate_set_view,
        path_to_string(&config.logging.file),
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
