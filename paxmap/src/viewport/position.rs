use std::fmt;

use crate::coord::{LatLng, PixelBounds, PixelPoint};
use crate::map::MapContext;

/// The map view at the moment it settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPosition {
    pub zoom: u8,
    pub center: LatLng,
    /// `center` in pixel space at `zoom`
    pub pixel_center: PixelPoint,
    /// Visible pixel rectangle at `zoom`
    pub pixel_bounds: PixelBounds,
}

impl MapPosition {
    /// Snapshot the current view of a map.
    pub fn from_map(map: &MapContext) -> Self {
        let zoom = map.clamp_zoom(map.zoom());
        let center = map.center();
        let pixel_center = crate::coord::to_pixel(center, zoom);
        let (width, height) = map.size();
        Self {
            zoom,
            center,
            pixel_center,
            pixel_bounds: PixelBounds::around(pixel_center, width as f64, height as f64),
        }
    }

    /// Returns true when every component is finite and the bounds are not inverted.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.pixel_center.is_finite() && self.pixel_bounds.is_valid()
    }
}

impl fmt::Display for MapPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "z{} @ {} [{:.0},{:.0} - {:.0},{:.0}]",
            self.zoom,
            self.center,
            self.pixel_bounds.min.x,
            self.pixel_bounds.min.y,
            self.pixel_bounds.max.x,
            self.pixel_bounds.max.y
        )
    }
}
