//! Marker rendering.
//!
//! Provider features become [`Marker`]s placed at the provider's own
//! coordinates, each with a [`Popup`] whose [`PopupContent`] is built the
//! first time it is opened. The [`LocationMarker`] for the user's position
//! lives alongside and never interacts with the provider markers.

mod location;
mod marker;
mod popup;

pub use location::LocationMarker;
pub use marker::{Marker, MarkerLayer, MarkerRenderer};
pub use popup::{Popup, PopupContent, PopupMode, MAPS_SEARCH_URL};
