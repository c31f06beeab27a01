//! PaxMap - Viewport-driven provider map
//!
//! Loads a GeoJSON collection of treatment providers once, indexes it into
//! slippy-map tiles, and on every settled map move produces markers only for
//! the providers inside the viewport.
//!
//! # High-Level API
//!
//! For most use cases, the [`session`] module ties everything together:
//!
//! ```
//! use paxmap::config::ConfigFile;
//! use paxmap::data::parse_collection;
//! use paxmap::session::{MapSession, SessionEvent};
//!
//! let json = r#"{"type": "FeatureCollection", "features": [{
//!     "type": "Feature",
//!     "geometry": {"type": "Point", "coordinates": [-77.0366, 38.9072]},
//!     "properties": {"provider_name": "Corner Pharmacy", "lat": 38.9072, "lng": -77.0366}
//! }]}"#;
//!
//! let mut session = MapSession::from_config(&ConfigFile::default());
//! session.handle(SessionEvent::DataLoaded(parse_collection(json)));
//!
//! // Nothing is drawn until the map settles
//! session.map_mut().set_zoom(15);
//! session.process_pending_map_events();
//!
//! let marker = &session.markers().markers()[0];
//! assert_eq!(marker.popup.open().title, "Corner Pharmacy");
//! ```

pub mod config;
pub mod coord;
pub mod data;
pub mod geojson;
pub mod geolocation;
pub mod index;
pub mod logging;
pub mod map;
pub mod merge;
pub mod render;
pub mod resolver;
pub mod session;
pub mod viewport;

/// Version of the PaxMap library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
