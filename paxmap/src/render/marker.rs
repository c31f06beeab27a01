//! Provider markers.

use std::sync::Arc;

use tracing::debug;

use super::popup::{Popup, PopupMode};
use crate::coord::LatLng;
use crate::geojson::ProviderProperties;
use crate::index::TileFeature;

/// A point marker for one provider.
#[derive(Debug, Clone)]
pub struct Marker {
    /// Feature id the marker was rendered from
    pub id: u64,
    /// Placement, taken from the provider's `lat`/`lng` properties
    pub position: LatLng,
    pub popup: Popup,
}

impl Marker {
    pub fn properties(&self) -> &ProviderProperties {
        self.popup.properties()
    }
}

/// The set of markers currently on the map.
///
/// Replaced as a whole on every render.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    /// The marker rendered from feature `id`.
    pub fn get(&self, id: u64) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Ids of all markers, in layer order.
    pub fn ids(&self) -> Vec<u64> {
        self.markers.iter().map(|m| m.id).collect()
    }
}

impl<'a> IntoIterator for &'a MarkerLayer {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}

/// Turns merged features into markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerRenderer {
    mode: PopupMode,
}

impl MarkerRenderer {
    /// Renderer with lazily built popups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that builds every popup up front.
    pub fn eager() -> Self {
        Self {
            mode: PopupMode::Eager,
        }
    }

    pub fn mode(&self) -> PopupMode {
        self.mode
    }

    /// One marker per feature, in input order.
    pub fn render(&self, features: &[TileFeature]) -> MarkerLayer {
        let markers: Vec<Marker> = features
            .iter()
            .map(|feature| Marker {
                id: feature.id,
                position: LatLng::new(feature.tags.lat, feature.tags.lng),
                popup: Popup::new(Arc::clone(&feature.tags), self.mode),
            })
            .collect();
        debug!(markers = markers.len(), mode = ?self.mode, "Rendered markers");
        MarkerLayer { markers }
    }
}
