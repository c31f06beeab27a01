//! Coordinate conversion module
//!
//! Conversions between geographic coordinates (latitude/longitude), the
//! normalized Web Mercator world square, pixel space at a zoom level, and
//! slippy-map tile addresses.
//!
//! Normalized world space maps the whole projected world onto `[0, 1]²`
//! with `(0, 0)` at the north-west corner. Pixel space at zoom `z` is the
//! normalized space scaled by `TILE_SIZE * 2^z`.

mod types;

pub use types::{
    CoordError, LatLng, PixelBounds, PixelPoint, TileKey, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT,
    MIN_LON, MIN_ZOOM, TILE_SIZE,
};

use std::f64::consts::PI;

/// Projects a coordinate into normalized world space.
///
/// Latitude is clamped to the Web Mercator range so that points at the
/// poles land on the top/bottom edge instead of at infinity.
#[inline]
pub fn project(lat: f64, lng: f64) -> (f64, f64) {
    let x = lng / 360.0 + 0.5;
    let sin = (lat.clamp(MIN_LAT, MAX_LAT) * PI / 180.0).sin();
    let y = 0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / PI;
    (x, y.clamp(0.0, 1.0))
}

/// Inverse of [`project`].
#[inline]
pub fn unproject(x: f64, y: f64) -> LatLng {
    let lng = (x - 0.5) * 360.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan() * 180.0 / PI;
    LatLng::new(lat, lng)
}

/// Size of the world in pixels at the given zoom level.
#[inline]
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2.0_f64.powi(zoom as i32)
}

/// Projects a coordinate to pixel space at `zoom`.
#[inline]
pub fn to_pixel(latlng: LatLng, zoom: u8) -> PixelPoint {
    let (x, y) = project(latlng.lat, latlng.lng);
    let size = world_size(zoom);
    PixelPoint::new(x * size, y * size)
}

/// Converts a pixel-space point at `zoom` back to a geographic coordinate.
#[inline]
pub fn from_pixel(point: PixelPoint, zoom: u8) -> LatLng {
    let size = world_size(zoom);
    unproject(point.x / size, point.y / size)
}

/// Tile indices containing a pixel-space point (floor division by the tile size).
///
/// Indices are signed: a viewport panned past the antimeridian or the poles
/// yields negative or out-of-range values, which callers wrap or discard.
#[inline]
pub fn tile_for_pixel(point: PixelPoint) -> (i64, i64) {
    (
        (point.x / TILE_SIZE).floor() as i64,
        (point.y / TILE_SIZE).floor() as i64,
    )
}

/// Converts geographic coordinates to the tile containing them.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lng` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 24)
///
/// # Returns
///
/// A `Result` containing the tile key or an error if inputs are invalid.
#[inline]
pub fn to_tile_coords(lat: f64, lng: f64, zoom: u8) -> Result<TileKey, CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lng) {
        return Err(CoordError::InvalidLongitude(lng));
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let n = 2.0_f64.powi(zoom as i32);
    let (x, y) = project(lat, lng);
    // The east edge (lng = 180) and south edge belong to the last tile
    let max_index = n - 1.0;
    let col = (x * n).floor().min(max_index) as u32;
    let row = (y * n).floor().min(max_index) as u32;

    Ok(TileKey::new(zoom, col, row))
}

/// Converts a tile address back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lng(tile: &TileKey) -> LatLng {
    let n = 2.0_f64.powi(tile.zoom as i32);
    unproject(tile.x as f64 / n, tile.y as f64 / n)
}
