//! The "you are here" marker.

use crate::coord::LatLng;

/// Circle marker at the user's detected position.
///
/// Drawn independently of the provider markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationMarker {
    pub position: LatLng,
    /// Stroke and fill color
    pub color: &'static str,
    pub fill_opacity: f64,
}

impl LocationMarker {
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            color: "red",
            fill_opacity: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_half_transparent() {
        let marker = LocationMarker::new(LatLng::new(1.0, 2.0));
        assert_eq!(marker.color, "red");
        assert_eq!(marker.fill_opacity, 0.5);
        assert_eq!(marker.position, LatLng::new(1.0, 2.0));
    }
}
