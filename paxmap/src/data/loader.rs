use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

use crate::geojson::{FeatureCollection, GeoJsonError};

/// Errors that can occur while loading the feature collection.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data is not a valid feature collection
    #[error(transparent)]
    Parse(#[from] GeoJsonError),

    /// The load did not finish in time
    #[error("Timed out after {0}s waiting for feature data")]
    Timeout(u64),
}

/// Read and decode the feature collection at `path`.
pub async fn load_collection(path: impl AsRef<Path>) -> Result<FeatureCollection, LoadError> {
    let path = path.as_ref();
    let started = Instant::now();
    debug!(path = %path.display(), "Loading feature data");

    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let collection = FeatureCollection::from_slice(&bytes)?;

    info!(
        path = %path.display(),
        features = collection.len(),
        bytes = bytes.len(),
        elapsed = ?started.elapsed(),
        "Loaded feature data"
    );
    Ok(collection)
}

/// Decode a feature collection from a JSON string.
pub fn parse_collection(json: &str) -> Result<FeatureCollection, LoadError> {
    Ok(FeatureCollection::parse(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ONE_PROVIDER: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-77.03, 38.90] },
            "properties": { "provider_name": "Corner Pharmacy", "lat": 38.90, "lng": -77.03 }
        }]
    }"#;

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("geojson_data.json");
        fs::write(&path, ONE_PROVIDER).unwrap();

        let collection = load_collection(&path).await.unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.features[0].properties.provider_name, "Corner Pharmacy");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_collection(dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[tokio::test]
    async fn test_invalid_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[1, 2").unwrap();
        let err = load_collection(&path).await.unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_parse_collection() {
        assert_eq!(parse_collection(ONE_PROVIDER).unwrap().len(), 1);
        assert!(parse_collection(r#"{"type":"Point","features":[]}"#).is_err());
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            LoadError::Timeout(5).to_string(),
            "Timed out after 5s waiting for feature data"
        );
    }
}
