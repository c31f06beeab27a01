//! Map session: wiring data, viewport and markers together.
//!
//! A [`MapSession`] is the single consumer of everything that happens to a
//! map. Data arrival, the user's location and map events are fed in as
//! [`SessionEvent`]s and handled one at a time, in order.
//!
//! ```text
//! DataLoaded ──► SpatialIndex::build ──► LoadState::Ready
//!                                             │
//! Map(MoveEnd) ──► ViewportTracker ──► TileResolver ──► merge ──► MarkerRenderer
//!
//! Location ──► LocationMarker (and optionally set_view)
//! ```
//!
//! Every settled move replaces the marker layer wholesale; nothing from the
//! previous layer is carried over.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{ConfigFile, IndexConfig};
use crate::coord::LatLng;
use crate::data::LoadError;
use crate::geojson::FeatureCollection;
use crate::geolocation::LocationError;
use crate::index::SpatialIndex;
use crate::map::{MapContext, MapEvent};
use crate::merge::merge;
use crate::render::{LocationMarker, MarkerLayer, MarkerRenderer};
use crate::resolver::TileResolver;
use crate::viewport::{MapPosition, ViewportTracker};

/// Input to a [`MapSession`].
#[derive(Debug)]
pub enum SessionEvent {
    /// The feature collection finished loading (or failed to)
    DataLoaded(Result<FeatureCollection, LoadError>),
    /// The user's position was determined (or could not be)
    Location(Result<LatLng, LocationError>),
    /// Something happened to the map view
    Map(MapEvent),
}

/// Whether provider data is available.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Data has not arrived yet
    Pending,
    /// Data arrived and was indexed
    Ready(Arc<SpatialIndex>),
    /// Data could not be loaded or indexed
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Pending => write!(f, "pending"),
            LoadState::Ready(index) => write!(f, "ready ({} features)", index.stats().features),
            LoadState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A provider map driven by events.
#[derive(Debug)]
pub struct MapSession {
    map: MapContext,
    tracker: ViewportTracker,
    index_config: IndexConfig,
    renderer: MarkerRenderer,
    state: LoadState,
    markers: MarkerLayer,
    location: Option<LocationMarker>,
    locate_set_view: bool,
    locate_zoom: u8,
    renders: u64,
}

impl MapSession {
    /// Create a session for `map`. Data is indexed with `index_config` once it arrives.
    pub fn new(map: MapContext, index_config: IndexConfig) -> Self {
        let locate_zoom = map.zoom();
        Self {
            map,
            tracker: ViewportTracker::new(),
            index_config,
            renderer: MarkerRenderer::new(),
            state: LoadState::Pending,
            markers: MarkerLayer::default(),
            location: None,
            locate_set_view: true,
            locate_zoom,
            renders: 0,
        }
    }

    /// Create a session from the `[index]` and `[map]` settings.
    pub fn from_config(config: &ConfigFile) -> Self {
        Self::new(MapContext::new(&config.map), config.index)
            .with_locate_set_view(config.map.locate_set_view, config.map.zoom)
    }

    /// Use a different marker renderer (e.g. [`MarkerRenderer::eager`]).
    pub fn with_renderer(mut self, renderer: MarkerRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Whether a located user is centered on, and at which zoom.
    pub fn with_locate_set_view(mut self, enabled: bool, zoom: u8) -> Self {
        self.locate_set_view = enabled;
        self.locate_zoom = zoom;
        self
    }

    pub fn map(&self) -> &MapContext {
        &self.map
    }

    /// Mutable access to the map. Call [`process_pending_map_events`](Self::process_pending_map_events)
    /// after changing the view.
    pub fn map_mut(&mut self) -> &mut MapContext {
        &mut self.map
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The index, once data is ready.
    pub fn index(&self) -> Option<&Arc<SpatialIndex>> {
        match &self.state {
            LoadState::Ready(index) => Some(index),
            _ => None,
        }
    }

    /// Markers of the last render.
    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn location_marker(&self) -> Option<&LocationMarker> {
        self.location.as_ref()
    }

    /// The last settled position.
    pub fn position(&self) -> Option<&MapPosition> {
        self.tracker.last()
    }

    pub fn tracker(&self) -> &ViewportTracker {
        &self.tracker
    }

    /// Number of marker renders so far.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Handle one event.
    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::DataLoaded(result) => self.on_data(result),
            SessionEvent::Location(result) => self.on_location(result),
            SessionEvent::Map(event) => self.on_map_event(event),
        }
    }

    /// Feed every queued map event through [`handle`](Self::handle).
    ///
    /// Returns the number of events processed.
    pub fn process_pending_map_events(&mut self) -> usize {
        let events = self.map.drain_events();
        let count = events.len();
        for event in events {
            self.handle(SessionEvent::Map(event));
        }
        count
    }

    fn on_data(&mut self, result: Result<FeatureCollection, LoadError>) {
        if self.state.is_ready() {
            debug!("Feature data already indexed, ignoring reload");
            return;
        }

        let collection = match result {
            Ok(collection) => collection,
            Err(e) => {
                warn!(error = %e, "Feature data failed to load");
                self.state = LoadState::Failed(e.to_string());
                return;
            }
        };

        match SpatialIndex::build(&collection, self.index_config) {
            Ok(index) => {
                info!(features = collection.len(), "Feature data ready");
                self.state = LoadState::Ready(Arc::new(index));
                if let Some(position) = self.tracker.last().copied() {
                    self.render(&position);
                }
            }
            Err(e) => {
                warn!(error = %e, "Feature data could not be indexed");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    fn on_location(&mut self, result: Result<LatLng, LocationError>) {
        match result {
            Ok(position) => {
                debug!(position = %position, "Location found");
                self.location = Some(LocationMarker::new(position));
                if self.locate_set_view {
                    self.map.set_view(position, self.locate_zoom);
                    self.process_pending_map_events();
                }
            }
            Err(e) => debug!(error = %e, "Location not available"),
        }
    }

    fn on_map_event(&mut self, event: MapEvent) {
        if let Some(position) = self.tracker.observe(&self.map, &event) {
            self.render(&position);
        }
    }

    fn render(&mut self, position: &MapPosition) {
        self.renders += 1;
        self.markers = match &self.state {
            LoadState::Ready(index) => {
                let tiles = TileResolver::resolve(index, position);
                let features = merge(&tiles);
                debug!(
                    tiles = tiles.len(),
                    features = features.len(),
                    position = %position,
                    "Resolved viewport"
                );
                self.renderer.render(&features)
            }
            LoadState::Pending | LoadState::Failed(_) => MarkerLayer::default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapSettings;
    use crate::geojson::{Feature, ProviderProperties};

    fn dc_collection() -> FeatureCollection {
        FeatureCollection::new(vec![
            Feature::point(Some(1), ProviderProperties::new("Near", 38.9072, -77.0366)),
            Feature::point(Some(2), ProviderProperties::new("Far", 34.05, -118.24)),
        ])
    }

    fn session() -> MapSession {
        MapSession::new(MapContext::new(&MapSettings::default()), IndexConfig::default())
    }

    #[test]
    fn test_moves_before_data_render_nothing() {
        let mut session = session();
        session.handle(SessionEvent::Map(MapEvent::MoveEnd));
        assert!(session.markers().is_empty());
        assert!(matches!(session.state(), LoadState::Pending));
        assert_eq!(session.renders(), 1);
    }

    #[test]
    fn test_data_after_move_renders_last_position() {
        let mut session = session();
        session.handle(SessionEvent::Map(MapEvent::MoveEnd));
        session.handle(SessionEvent::DataLoaded(Ok(dc_collection())));

        assert!(session.state().is_ready());
        assert_eq!(session.markers().ids(), vec![1]);
    }

    #[test]
    fn test_data_before_any_move_waits() {
        let mut session = session();
        session.handle(SessionEvent::DataLoaded(Ok(dc_collection())));
        assert!(session.markers().is_empty());
        assert_eq!(session.renders(), 0);

        session.map_mut().set_zoom(15);
        session.process_pending_map_events();
        assert_eq!(session.markers().len(), 1);
    }

    #[test]
    fn test_intermediate_events_do_not_render() {
        let mut session = session();
        session.handle(SessionEvent::DataLoaded(Ok(dc_collection())));
        session.handle(SessionEvent::Map(MapEvent::Zoom { zoom: 3 }));
        session.handle(SessionEvent::Map(MapEvent::Move {
            center: LatLng::new(0.0, 0.0),
        }));
        assert_eq!(session.renders(), 0);
    }

    #[test]
    fn test_every_settled_move_rerenders() {
        let mut session = session();
        session.handle(SessionEvent::DataLoaded(Ok(dc_collection())));

        session.map_mut().set_view(LatLng::new(34.05, -118.24), 15);
        session.process_pending_map_events();
        assert_eq!(session.markers().ids(), vec![2]);

        session.map_mut().set_view(LatLng::new(0.0, 0.0), 15);
        session.process_pending_map_events();
        assert!(session.markers().is_empty());
        assert_eq!(session.renders(), 2);
    }

    #[test]
    fn test_failed_load() {
        let mut session = session();
        let err = crate::data::parse_collection("{}").unwrap_err();
        session.handle(SessionEvent::DataLoaded(Err(err)));
        assert!(matches!(session.state(), LoadState::Failed(_)));

        session.handle(SessionEvent::Map(MapEvent::MoveEnd));
        assert!(session.markers().is_empty());
    }

    #[test]
    fn test_empty_collection_fails_indexing() {
        let mut session = session();
        session.handle(SessionEvent::DataLoaded(Ok(FeatureCollection::new(vec![]))));
        match session.state() {
            LoadState::Failed(reason) => assert!(reason.contains("empty")),
            other => panic!("unexpected state {}", other),
        }
    }

    #[test]
    fn test_reload_is_ignored_once_ready() {
        let mut session = session();
        session.handle(SessionEvent::DataLoaded(Ok(dc_collection())));
        let first = Arc::clone(session.index().unwrap());
        session.handle(SessionEvent::DataLoaded(Ok(dc_collection())));
        assert!(Arc::ptr_eq(&first, session.index().unwrap()));
    }

    #[test]
    fn test_location_centers_map() {
        let mut session = session().with_locate_set_view(true, 12);
        session.handle(SessionEvent::DataLoaded(Ok(dc_collection())));
        session.handle(SessionEvent::Location(Ok(LatLng::new(34.05, -118.24))));

        assert_eq!(
            session.location_marker().map(|m| m.position),
            Some(LatLng::new(34.05, -118.24))
        );
        assert_eq!(session.map().zoom(), 12);
        assert_eq!(session.markers().ids(), vec![2]);
    }

    #[test]
    fn test_location_without_set_view() {
        let mut session = session().with_locate_set_view(false, 12);
        session.handle(SessionEvent::Location(Ok(LatLng::new(1.0, 1.0))));
        assert!(session.location_marker().is_some());
        assert_eq!(session.renders(), 0);
        assert!(!session.map().has_pending_events());
    }

    #[test]
    fn test_location_error_leaves_markers_alone() {
        let mut session = session();
        session.handle(SessionEvent::DataLoaded(Ok(dc_collection())));
        session.handle(SessionEvent::Map(MapEvent::MoveEnd));
        let before = session.markers().ids();

        session.handle(SessionEvent::Location(Err(LocationError::PermissionDenied)));
        assert!(session.location_marker().is_none());
        assert_eq!(session.markers().ids(), before);
    }
}
