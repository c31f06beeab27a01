//! Locating the user.
//!
//! A [`Geolocator`] reports the user's position once. Failures only mean the
//! location marker is not drawn; they never affect provider markers.

use std::future::Future;

use thiserror::Error;

use crate::coord::LatLng;

/// Why the user's position is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user refused to share their location
    #[error("Location permission denied")]
    PermissionDenied,

    /// No position source is available
    #[error("Location unavailable")]
    Unavailable,

    /// The position source did not answer in time
    #[error("Location request timed out")]
    Timeout,
}

/// Source of the user's position.
pub trait Geolocator: Send + Sync {
    /// Determine the current position.
    fn locate(&self) -> impl Future<Output = Result<LatLng, LocationError>> + Send;

    /// Returns the locator's name for logging.
    fn name(&self) -> &str;
}

/// Reports a fixed, preconfigured position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocation {
    position: LatLng,
}

impl FixedLocation {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<LatLng, LocationError> {
        if self.position.is_finite() {
            Ok(self.position)
        } else {
            Err(LocationError::Unavailable)
        }
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// A locator without any position source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl Geolocator for NoLocation {
    async fn locate(&self) -> Result<LatLng, LocationError> {
        Err(LocationError::Unavailable)
    }

    fn name(&self) -> &str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_location() {
        let locator = FixedLocation::new(LatLng::new(51.5, -0.12));
        assert_eq!(locator.locate().await, Ok(LatLng::new(51.5, -0.12)));
        assert_eq!(locator.name(), "fixed");
    }

    #[tokio::test]
    async fn test_fixed_location_rejects_nan() {
        let locator = FixedLocation::new(LatLng::new(f64::NAN, 0.0));
        assert_eq!(locator.locate().await, Err(LocationError::Unavailable));
    }

    #[tokio::test]
    async fn test_no_location() {
        assert_eq!(NoLocation.locate().await, Err(LocationError::Unavailable));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            LocationError::PermissionDenied.to_string(),
            "Location permission denied"
        );
        assert_eq!(LocationError::Timeout.to_string(), "Location request timed out");
    }
}
