//! View command - run a headless map session and print what it shows.
//!
//! The feature data and the user's location are gathered by background
//! tasks that report to the session over a channel, the same way a front
//! end would feed it.

use clap::Args;
use tokio::sync::mpsc;
use tracing::{debug, info};

use paxmap::config::ConfigFile;
use paxmap::coord::{self, LatLng};
use paxmap::geolocation::{FixedLocation, Geolocator, NoLocation};
use paxmap::render::MarkerRenderer;
use paxmap::session::{LoadState, MapSession, SessionEvent};

use super::common::{parse_lat_lng, validate_lat_lng, DataArgs};
use crate::error::CliError;
use crate::runner::{load_with_timeout, CliRunner, GlobalOptions};

/// Arguments for the view command.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Latitude of the view center (default: [map] center_lat)
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the view center (default: [map] center_lng)
    #[arg(long, allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Zoom level (default: [map] zoom)
    #[arg(long)]
    pub zoom: Option<u8>,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Pretend the user was located at LAT,LNG
    #[arg(long, value_name = "LAT,LNG", value_parser = parse_lat_lng, allow_hyphen_values = true)]
    pub locate: Option<LatLng>,

    /// Print the popup of the marker with this feature id
    #[arg(long, value_name = "ID")]
    pub popup: Option<u64>,

    /// Build every popup up front instead of on demand
    #[arg(long)]
    pub eager: bool,

    /// Give up waiting for the feature data after SECS seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl ViewArgs {
    /// Apply the view overrides to a copy of the config.
    fn apply(&self, config: &ConfigFile) -> Result<ConfigFile, CliError> {
        let mut config = config.clone();
        let map = &mut config.map;

        let lat = self.lat.unwrap_or(map.center.lat);
        let lng = self.lng.unwrap_or(map.center.lng);
        validate_lat_lng(lat, lng).map_err(CliError::InvalidArgument)?;
        map.center = LatLng::new(lat, lng);

        if let Some(zoom) = self.zoom {
            if !(map.min_zoom..=map.max_zoom).contains(&zoom) {
                return Err(CliError::InvalidArgument(format!(
                    "zoom {} is outside {}..={}",
                    zoom, map.min_zoom, map.max_zoom
                )));
            }
            map.zoom = zoom;
        }
        if let Some(width) = self.width {
            map.width = width;
        }
        if let Some(height) = self.height {
            map.height = height;
        }
        if map.width == 0 || map.height == 0 {
            return Err(CliError::InvalidArgument(
                "viewport width and height must be positive".to_string(),
            ));
        }
        if let Some(timeout) = self.timeout {
            config.data.timeout = (timeout > 0).then_some(timeout);
        }
        Ok(config)
    }
}

/// Run the view command.
pub fn run(args: ViewArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("view");

    let config = args.apply(runner.config())?;
    let path = runner.data_path(args.data.data.clone());
    let renderer = if args.eager {
        MarkerRenderer::eager()
    } else {
        MarkerRenderer::new()
    };
    let mut session = MapSession::from_config(&config).with_renderer(renderer);

    runner.runtime().block_on(async {
        let (tx, mut rx) = mpsc::channel(4);

        let data_tx = tx.clone();
        let timeout = config.data.timeout;
        tokio::spawn(async move {
            let result = load_with_timeout(path, timeout).await;
            let _ = data_tx.send(SessionEvent::DataLoaded(result)).await;
        });
        match args.locate {
            Some(position) => spawn_locate(FixedLocation::new(position), tx),
            None => spawn_locate(NoLocation, tx),
        }

        // The map settles on its initial view as soon as it exists
        let center = session.map().center();
        let zoom = session.map().zoom();
        session.map_mut().set_view(center, zoom);
        session.process_pending_map_events();

        while let Some(event) = rx.recv().await {
            session.handle(event);
        }
    });

    if let LoadState::Failed(reason) = session.state() {
        return Err(CliError::DataUnavailable(reason.clone()));
    }
    info!(markers = session.markers().len(), "View rendered");

    print_view(&session);

    if let Some(id) = args.popup {
        let marker = session
            .markers()
            .get(id)
            .ok_or(CliError::MarkerNotFound(id))?;
        println!();
        println!("{}", marker.popup.open());
    }
    Ok(())
}

fn spawn_locate<G>(locator: G, tx: mpsc::Sender<SessionEvent>)
where
    G: Geolocator + 'static,
{
    tokio::spawn(async move {
        debug!(locator = locator.name(), "Locating user");
        let result = locator.locate().await;
        let _ = tx.send(SessionEvent::Location(result)).await;
    });
}

fn print_view(session: &MapSession) {
    let map = session.map();
    let (width, height) = map.size();
    println!(
        "View: {} at zoom {} ({}x{} px)",
        map.center(),
        map.zoom(),
        width,
        height
    );
    println!("Data: {}", session.state());

    let layer = map.base_layer();
    let center_tile = coord::tile_for_pixel(map.pixel_center());
    let n = 1i64 << map.zoom();
    println!(
        "Base: {}",
        layer.tile_url(
            map.zoom(),
            center_tile.0.rem_euclid(n) as u32,
            center_tile.1.clamp(0, n - 1) as u32
        )
    );
    println!("      {}", layer.attribution());

    match session.location_marker() {
        Some(marker) => println!("Location: {}", marker.position),
        None => println!("Location: unavailable"),
    }

    let markers = session.markers();
    println!();
    println!("Markers ({}):", markers.len());
    for marker in markers {
        println!(
            "  #{:<6} {}  {}",
            marker.id,
            marker.position,
            marker.properties().provider_name
        );
    }
}
