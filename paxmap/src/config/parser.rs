//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;
use std::str::FromStr;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [data] section
    if let Some(section) = ini.section(Some("data")) {
        if let Some(v) = section.get("path") {
            let v = v.trim();
            if !v.is_empty() {
                config.data.path = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("timeout") {
            let v = v.trim();
            config.data.timeout = if v.is_empty() || v == "0" {
                None
            } else {
                Some(v.parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "data".to_string(),
                    key: "timeout".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds), or empty to wait indefinitely"
                        .to_string(),
                })?)
            };
        }
        if let Some(v) = get_parsed::<u64>(section, "data", "cache_max_age", "seconds")? {
            config.data.cache_max_age = v;
        }
    }

    // [index] section
    if let Some(section) = ini.section(Some("index")) {
        let mut index = config.index;
        if let Some(v) = get_parsed::<u8>(section, "index", "max_zoom", "zoom level")? {
            index = index.with_max_zoom(v);
        }
        if let Some(v) = get_parsed::<u8>(section, "index", "index_max_zoom", "zoom level")? {
            index = index.with_index_max_zoom(v);
        }
        if let Some(v) = get_parsed::<f64>(section, "index", "tolerance", "pixels")? {
            index = index.with_tolerance(v);
        }
        if let Some(v) = get_parsed::<u32>(section, "index", "extent", "pixels")? {
            index = index.with_extent(v);
        }
        if let Some(v) = get_parsed::<u32>(section, "index", "buffer", "pixels")? {
            index = index.with_buffer(v);
        }
        if let Some(v) = get_parsed::<usize>(section, "index", "index_max_points", "points")? {
            index = index.with_index_max_points(v);
        }
        index
            .validate()
            .map_err(|e| ConfigFileError::InvalidValue {
                section: "index".to_string(),
                key: e.field.to_string(),
                value: section.get(e.field).unwrap_or_default().to_string(),
                reason: e.reason,
            })?;
        config.index = index;
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = get_parsed::<f64>(section, "map", "center_lat", "degrees")? {
            config.map.center.lat = v;
        }
        if let Some(v) = get_parsed::<f64>(section, "map", "center_lng", "degrees")? {
            config.map.center.lng = v;
        }
        if let Some(v) = get_parsed::<u8>(section, "map", "zoom", "zoom level")? {
            config.map.zoom = v;
        }
        if let Some(v) = get_parsed::<u8>(section, "map", "min_zoom", "zoom level")? {
            config.map.min_zoom = v;
        }
        if let Some(v) = get_parsed::<u8>(section, "map", "max_zoom", "zoom level")? {
            config.map.max_zoom = v;
        }
        if let Some(v) = get_parsed::<u32>(section, "map", "width", "pixels")? {
            config.map.width = v;
        }
        if let Some(v) = get_parsed::<u32>(section, "map", "height", "pixels")? {
            config.map.height = v;
        }
        if let Some(v) = section.get("locate_set_view") {
            config.map.locate_set_view = parse_bool(v);
        }

        if !(-90.0..=90.0).contains(&config.map.center.lat) {
            return Err(ConfigFileError::InvalidValue {
                section: "map".to_string(),
                key: "center_lat".to_string(),
                value: config.map.center.lat.to_string(),
                reason: "must be between -90 and 90".to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&config.map.center.lng) {
            return Err(ConfigFileError::InvalidValue {
                section: "map".to_string(),
                key: "center_lng".to_string(),
                value: config.map.center.lng.to_string(),
                reason: "must be between -180 and 180".to_string(),
            });
        }
        if config.map.min_zoom > config.map.max_zoom {
            return Err(ConfigFileError::InvalidValue {
                section: "map".to_string(),
                key: "min_zoom".to_string(),
                value: config.map.min_zoom.to_string(),
                reason: format!("must not exceed max_zoom ({})", config.map.max_zoom),
            });
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Read and parse an optional key, reporting the section and key on failure.
fn get_parsed<T: FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
    unit: &str,
) -> Result<Option<T>, ConfigFileError> {
    let Some(raw) = section.get(key) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ConfigFileError::InvalidValue {
            section: section_name.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
            reason: format!("must be a number ({})", unit),
        })
}

/// Parse a boolean value from a string.
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
