//! Events emitted by the map context.

use crate::coord::LatLng;

/// A change to the map view.
///
/// Pans and zooms emit any number of intermediate events followed by exactly
/// one [`MapEvent::MoveEnd`] once the view has settled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// The center moved (may be an animation frame)
    Move { center: LatLng },
    /// The zoom level changed
    Zoom { zoom: u8 },
    /// The viewport was resized
    Resize { width: u32, height: u32 },
    /// The view settled after a pan, zoom, resize or `set_view`
    MoveEnd,
}

impl MapEvent {
    /// Returns true for the settled event.
    pub fn is_settled(&self) -> bool {
        matches!(self, MapEvent::MoveEnd)
    }
}
