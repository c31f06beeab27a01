//! The map view handle.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use tracing::trace;

use super::events::MapEvent;
use super::layer::BaseLayer;
use crate::config::MapSettings;
use crate::coord::{self, LatLng, PixelBounds, PixelPoint};

/// Intermediate `Move` frames emitted by [`MapContext::pan_by`].
pub const PAN_FRAMES: u32 = 4;

/// View state of one map: center, zoom, viewport size and zoom range.
///
/// Every view change queues [`MapEvent`]s; whoever drives the map drains
/// them with [`drain_events`](Self::drain_events) and forwards them to the
/// components that listen.
///
/// # Example
///
/// ```
/// use paxmap::config::MapSettings;
/// use paxmap::map::{MapContext, MapEvent};
///
/// let mut map = MapContext::new(&MapSettings::default());
/// map.set_zoom(12);
///
/// let events = map.drain_events();
/// assert_eq!(events.last(), Some(&MapEvent::MoveEnd));
/// assert_eq!(map.zoom(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct MapContext {
    center: LatLng,
    zoom: u8,
    width: u32,
    height: u32,
    min_zoom: u8,
    max_zoom: u8,
    base_layer: BaseLayer,
    events: VecDeque<MapEvent>,
}

impl MapContext {
    /// Create a map from settings. No events are queued for the initial view.
    pub fn new(settings: &MapSettings) -> Self {
        let min_zoom = settings.min_zoom.min(settings.max_zoom);
        let max_zoom = settings.max_zoom;
        Self {
            center: settings.center,
            zoom: settings.zoom.clamp(min_zoom, max_zoom),
            width: settings.width,
            height: settings.height,
            min_zoom,
            max_zoom,
            base_layer: BaseLayer::default(),
            events: VecDeque::new(),
        }
    }

    /// Replace the base layer.
    pub fn with_base_layer(mut self, layer: BaseLayer) -> Self {
        self.base_layer = layer;
        self
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Viewport size in pixels as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn zoom_range(&self) -> RangeInclusive<u8> {
        self.min_zoom..=self.max_zoom
    }

    pub fn base_layer(&self) -> &BaseLayer {
        &self.base_layer
    }

    /// Clamp a zoom level to the map's range.
    pub fn clamp_zoom(&self, zoom: u8) -> u8 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Move to `center` at `zoom` (clamped to the zoom range).
    ///
    /// The center's longitude is wrapped and its latitude clamped to the
    /// projectable range. Always settles with a `MoveEnd`, even when nothing
    /// changed.
    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        let center = center.wrapped();
        let zoom = self.clamp_zoom(zoom);
        if zoom != self.zoom {
            self.zoom = zoom;
            self.emit(MapEvent::Zoom { zoom });
        }
        self.center = center;
        self.emit(MapEvent::Move { center });
        self.emit(MapEvent::MoveEnd);
    }

    /// Change the zoom around the current center.
    pub fn set_zoom(&mut self, zoom: u8) {
        self.set_view(self.center, zoom);
    }

    /// Pan by a pixel offset at the current zoom.
    ///
    /// Emits [`PAN_FRAMES`] intermediate `Move` events, then one `MoveEnd`.
    /// A zero offset only emits the `MoveEnd`.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            self.emit(MapEvent::MoveEnd);
            return;
        }
        let start = self.pixel_center();
        for frame in 1..=PAN_FRAMES {
            let t = frame as f64 / PAN_FRAMES as f64;
            let point = PixelPoint::new(start.x + dx * t, start.y + dy * t);
            self.center = self.unproject(point);
            self.emit(MapEvent::Move {
                center: self.center,
            });
        }
        self.emit(MapEvent::MoveEnd);
    }

    /// Change the viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.emit(MapEvent::Resize { width, height });
        self.emit(MapEvent::MoveEnd);
    }

    /// Pixel position of a coordinate at the current zoom.
    pub fn project(&self, latlng: LatLng) -> PixelPoint {
        coord::to_pixel(latlng, self.zoom)
    }

    /// Coordinate at a pixel position at the current zoom.
    pub fn unproject(&self, point: PixelPoint) -> LatLng {
        coord::from_pixel(point, self.zoom)
    }

    /// Pixel position of the current center.
    pub fn pixel_center(&self) -> PixelPoint {
        self.project(self.center)
    }

    /// Pixel rectangle covered by the viewport at the current zoom.
    pub fn pixel_bounds(&self) -> PixelBounds {
        PixelBounds::around(self.pixel_center(), self.width as f64, self.height as f64)
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        self.events.drain(..).collect()
    }

    /// Returns true if events are waiting to be drained.
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    fn emit(&mut self, event: MapEvent) {
        trace!(?event, "Map event");
        self.events.push_back(event);
    }
}

impl Default for MapContext {
    fn default() -> Self {
        Self::new(&MapSettings::default())
    }
}
