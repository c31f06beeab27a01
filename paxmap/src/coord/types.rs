//! Coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels supported by the tile addressing scheme.
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 24;

/// Size of one map tile in projected pixels.
///
/// Viewport pixel coordinates are divided by this to obtain tile indices.
pub const TILE_SIZE: f64 = 256.0;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude in degrees (north positive)
    pub lat: f64,
    /// Longitude in degrees (east positive)
    pub lng: f64,
}

impl LatLng {
    /// Create a coordinate from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true when both components are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// The same place with latitude clamped to the Web Mercator range and
    /// longitude wrapped into -180..=180.
    pub fn wrapped(&self) -> Self {
        let lng = if (MIN_LON..=MAX_LON).contains(&self.lng) {
            self.lng
        } else {
            (self.lng - MIN_LON).rem_euclid(MAX_LON - MIN_LON) + MIN_LON
        };
        Self::new(self.lat.clamp(MIN_LAT, MAX_LAT), lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

/// A point in projected pixel space at some zoom level.
///
/// The origin is the north-west corner of the world; x grows east and y
/// grows south.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Round both components to the nearest whole pixel.
    #[inline]
    pub fn round(&self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

/// Axis-aligned box in projected pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBounds {
    /// Top-left (north-west) corner
    pub min: PixelPoint,
    /// Bottom-right (south-east) corner
    pub max: PixelPoint,
}

impl PixelBounds {
    pub const fn new(min: PixelPoint, max: PixelPoint) -> Self {
        Self { min, max }
    }

    /// Build bounds centered on `center` with the given size in pixels.
    pub fn around(center: PixelPoint, width: f64, height: f64) -> Self {
        let min = PixelPoint::new(center.x - width / 2.0, center.y - height / 2.0).round();
        Self {
            min,
            max: PixelPoint::new(min.x + width, min.y + height),
        }
    }

    /// Returns true when both corners are finite and `min <= max` on each axis.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }

    /// Rescale the bounds by `factor` (e.g. 0.5 to move one zoom level out).
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            min: PixelPoint::new(self.min.x * factor, self.min.y * factor),
            max: PixelPoint::new(self.max.x * factor, self.max.y * factor),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Tile address in the Web Mercator / Slippy Map scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    /// Zoom level
    pub zoom: u8,
    /// X coordinate (east-west), 0 at west
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
}

impl TileKey {
    pub const fn new(zoom: u8, x: u32, y: u32) -> Self {
        Self { zoom, x, y }
    }

    /// Number of tiles along one axis at this key's zoom level.
    #[inline]
    pub fn tiles_per_axis(&self) -> u32 {
        1u32 << self.zoom
    }

    /// The tile one zoom level up that contains this one.
    ///
    /// Returns `None` for the root tile.
    pub fn parent(&self) -> Option<TileKey> {
        if self.zoom == 0 {
            return None;
        }
        Some(TileKey::new(self.zoom - 1, self.x >> 1, self.y >> 1))
    }

    /// The four tiles one zoom level down, in NW, SW, NE, SE order.
    pub fn children(&self) -> [TileKey; 4] {
        let (z, x, y) = (self.zoom + 1, self.x * 2, self.y * 2);
        [
            TileKey::new(z, x, y),
            TileKey::new(z, x, y + 1),
            TileKey::new(z, x + 1, y),
            TileKey::new(z, x + 1, y + 1),
        ]
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside valid range (-85.05112878 to 85.05112878)
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Zoom level is outside valid range (0 to 24)
    InvalidZoom(u8),
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lng) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lng, MIN_LON, MAX_LON
                )
            }
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
