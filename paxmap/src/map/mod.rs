//! Map view state.
//!
//! [`MapContext`] is an explicit handle to one map: it owns the view
//! (center, zoom, viewport size), the [`BaseLayer`] description and a
//! queue of [`MapEvent`]s produced by view changes. Components receive the
//! handle (or the events) as arguments rather than reaching for a shared map.

mod context;
mod events;
mod layer;

pub use context::{MapContext, PAN_FRAMES};
pub use events::MapEvent;
pub use layer::{BaseLayer, OSM_ATTRIBUTION, OSM_TILE_URL};
