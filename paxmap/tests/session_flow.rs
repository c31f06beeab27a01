//! Integration tests for a map session fed by async sources.
//!
//! Mirrors how a front end drives a session: the data load and the
//! geolocation run as tasks and report back over a channel, while map
//! events are handled in between.
//!
//! Run with: `cargo test --test session_flow`

use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;

use paxmap::config::{ConfigFile, IndexConfig, MapSettings};
use paxmap::coord::LatLng;
use paxmap::data::{load_collection, LoadError};
use paxmap::geolocation::{FixedLocation, Geolocator, NoLocation};
use paxmap::map::{MapContext, MapEvent};
use paxmap::render::MarkerRenderer;
use paxmap::session::{LoadState, MapSession, SessionEvent};

const PROVIDERS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "id": 11,
            "geometry": { "type": "Point", "coordinates": [-77.0366, 38.9072] },
            "properties": {
                "provider_name": "Foggy Bottom Pharmacy",
                "address1": "2140 L St Nw",
                "address2": null,
                "city": "Washington",
                "county": "District Of Columbia",
                "zip_code": "20037",
                "state_code": "DC",
                "lat": 38.9072,
                "lng": -77.0366,
                "treatments": { "Paxlovid": 40 }
            }
        },
        {
            "type": "Feature",
            "id": 12,
            "geometry": { "type": "Point", "coordinates": [-118.2437, 34.0522] },
            "properties": {
                "provider_name": "Downtown LA Clinic",
                "address1": "100 Main St",
                "address2": "Suite 2",
                "city": "Los Angeles",
                "zip_code": "90012",
                "state_code": "CA",
                "lat": 34.0522,
                "lng": -118.2437,
                "treatments": { "Lagevrio": 3, "Paxlovid": 7 }
            }
        }
    ]
}"#;

fn write_data(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("geojson_data.json");
    fs::write(&path, PROVIDERS).unwrap();
    path
}

fn default_session() -> MapSession {
    MapSession::new(MapContext::new(&MapSettings::default()), IndexConfig::default())
}

#[tokio::test]
async fn test_events_over_channel() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir);
    let (tx, mut rx) = mpsc::channel(8);

    let data_tx = tx.clone();
    tokio::spawn(async move {
        let result = load_collection(path).await;
        let _ = data_tx.send(SessionEvent::DataLoaded(result)).await;
    });
    let locator = FixedLocation::new(LatLng::new(34.0522, -118.2437));
    tokio::spawn(async move {
        let result = locator.locate().await;
        let _ = tx.send(SessionEvent::Location(result)).await;
    });

    let mut session = default_session();
    session.handle(SessionEvent::Map(MapEvent::MoveEnd));
    while let Some(event) = rx.recv().await {
        session.handle(event);
    }

    // Whatever the arrival order, the view ends on the located user
    assert!(session.state().is_ready());
    assert!(session.location_marker().is_some());
    assert_eq!(session.markers().ids(), vec![12]);

    let popup = session.markers().get(12).unwrap().popup.open();
    assert_eq!(popup.address2.as_deref(), Some("Suite 2"));
    assert_eq!(popup.treatments, vec!["Lagevrio (3)", "Paxlovid (7)"]);
}

#[tokio::test]
async fn test_default_view_shows_dc_provider() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir);

    let mut session = MapSession::from_config(&ConfigFile::default());
    session.handle(SessionEvent::DataLoaded(load_collection(&path).await));
    session.handle(SessionEvent::Location(NoLocation.locate().await));
    session.map_mut().pan_by(0.0, 0.0);
    assert_eq!(session.process_pending_map_events(), 1);

    assert!(session.location_marker().is_none());
    assert_eq!(session.markers().len(), 1);
    let marker = &session.markers().markers()[0];
    assert_eq!(marker.properties().provider_name, "Foggy Bottom Pharmacy");
    assert_eq!(
        marker.popup.open().search_address,
        "2140 L St Nw, Washington, DC 20037"
    );
}

#[tokio::test]
async fn test_missing_data_file_keeps_map_empty() {
    let dir = TempDir::new().unwrap();
    let mut session = default_session();

    session.handle(SessionEvent::DataLoaded(
        load_collection(dir.path().join("missing.json")).await,
    ));
    session.handle(SessionEvent::Map(MapEvent::MoveEnd));

    assert!(matches!(session.state(), LoadState::Failed(_)));
    assert!(session.markers().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_load_timeout() {
    let slow = async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        load_collection("never-read.json").await
    };
    let result = match tokio::time::timeout(Duration::from_secs(5), slow).await {
        Ok(result) => result,
        Err(_) => Err(LoadError::Timeout(5)),
    };
    assert!(matches!(result, Err(LoadError::Timeout(5))));

    let mut session = default_session();
    session.handle(SessionEvent::DataLoaded(result));
    assert!(matches!(session.state(), LoadState::Failed(reason) if reason.contains("5s")));
}

#[tokio::test]
async fn test_eager_popups_over_whole_map() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir);

    let settings = MapSettings {
        zoom: 0,
        ..MapSettings::default()
    };
    let mut session = MapSession::new(MapContext::new(&settings), IndexConfig::single_tile())
        .with_renderer(MarkerRenderer::eager());
    session.handle(SessionEvent::DataLoaded(load_collection(&path).await));
    session.handle(SessionEvent::Map(MapEvent::MoveEnd));

    assert_eq!(session.markers().ids(), vec![11, 12]);
    assert!(session.markers().iter().all(|m| m.popup.is_rendered()));
}

#[tokio::test]
async fn test_view_set_far_off_the_map_renders_safely() {
    let dir = TempDir::new().unwrap();
    let path = write_data(&dir);

    let mut session = default_session();
    session.handle(SessionEvent::DataLoaded(load_collection(&path).await));
    session.map_mut().set_view(LatLng::new(0.0, 1e300), 5);
    session.process_pending_map_events();

    let center = session.map().center();
    assert!((-180.0..=180.0).contains(&center.lng));
    assert!(session.position().is_some());
    assert!(session.markers().len() <= 2);

    // A location report far outside the world is normalized the same way
    session.handle(SessionEvent::Location(Ok(LatLng::new(-1e200, -1e300))));
    assert!(session.map().pixel_bounds().is_valid());
}
