//! Viewport tracking.
//!
//! Turns settled map moves into immutable [`MapPosition`] snapshots.
//! Intermediate pan and zoom events are ignored so that expensive work runs
//! once per user gesture.

mod position;
mod tracker;

pub use position::MapPosition;
pub use tracker::ViewportTracker;
