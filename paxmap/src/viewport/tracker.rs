use tracing::debug;

use super::position::MapPosition;
use crate::map::{MapContext, MapEvent};

/// Produces a [`MapPosition`] for every settled move of a map.
#[derive(Debug, Default)]
pub struct ViewportTracker {
    last: Option<MapPosition>,
    snapshots: u64,
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one map event.
    ///
    /// Returns a fresh snapshot for [`MapEvent::MoveEnd`] and `None` for
    /// every other event.
    pub fn observe(&mut self, map: &MapContext, event: &MapEvent) -> Option<MapPosition> {
        if !event.is_settled() {
            return None;
        }
        let position = MapPosition::from_map(map);
        self.snapshots += 1;
        self.last = Some(position);
        debug!(position = %position, snapshot = self.snapshots, "Viewport settled");
        Some(position)
    }

    /// The most recent snapshot, if the map has settled at least once.
    pub fn last(&self) -> Option<&MapPosition> {
        self.last.as_ref()
    }

    /// Number of snapshots produced so far.
    pub fn snapshots(&self) -> u64 {
        self.snapshots
    }
}
