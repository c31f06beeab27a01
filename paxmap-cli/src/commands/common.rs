//! Common types and utilities shared across CLI commands.

use std::path::PathBuf;

use clap::Args;
use paxmap::coord::{LatLng, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Data source selection shared by commands that load features.
#[derive(Debug, Clone, Default, Args)]
pub struct DataArgs {
    /// GeoJSON feature collection (default: [data] path from config.ini)
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,
}

/// Parse a `LAT,LNG` pair in decimal degrees.
pub fn parse_lat_lng(s: &str) -> Result<LatLng, String> {
    let (lat, lng) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{}'", s))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lng.trim()))?;
    validate_lat_lng(lat, lng)?;
    Ok(LatLng::new(lat, lng))
}

/// Check that a coordinate lies on the Web Mercator map.
pub fn validate_lat_lng(lat: f64, lng: f64) -> Result<(), String> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(format!(
            "latitude {} is outside {}..{}",
            lat, MIN_LAT, MAX_LAT
        ));
    }
    if !(MIN_LON..=MAX_LON).contains(&lng) {
        return Err(format!(
            "longitude {} is outside {}..{}",
            lng, MIN_LON, MAX_LON
        ));
    }
    Ok(())
}
