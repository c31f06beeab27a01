//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use super::index::IndexConfig;
use crate::coord::LatLng;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Feature data source
    pub data: DataSettings,
    /// Spatial index tiling
    pub index: IndexConfig,
    /// Map view and viewport
    pub map: MapSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Feature data configuration.
#[derive(Debug, Clone)]
pub struct DataSettings {
    /// Path to the GeoJSON feature collection
    pub path: PathBuf,
    /// Give up waiting for the data after this many seconds.
    /// `None` waits indefinitely.
    pub timeout: Option<u64>,
    /// `max-age` advertised for the data endpoint, in seconds
    pub cache_max_age: u64,
}

/// Map view configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    /// Initial center
    pub center: LatLng,
    /// Initial zoom, also used when centering on the user's location
    pub zoom: u8,
    /// Lowest zoom the map allows
    pub min_zoom: u8,
    /// Highest zoom the map allows
    pub max_zoom: u8,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Move the view to the user's position once it is located
    pub locate_set_view: bool,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
