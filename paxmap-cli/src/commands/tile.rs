//! Tile command - print one tile of the spatial index.

use paxmap::coord::tile_to_lat_lng;
use paxmap::index::Tile;

use super::common::DataArgs;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the tile command.
pub struct TileArgs {
    pub zoom: u8,
    pub x: i64,
    pub y: i64,
    pub data: DataArgs,
}

/// Run the tile command.
pub fn run(args: TileArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("tile");
    let path = runner.data_path(args.data.data);
    let index = runner.load_index(&path)?;

    match index.get_tile(args.zoom, args.x, args.y) {
        Some(tile) => print_tile(&tile),
        None => println!(
            "Tile {}/{}/{} holds no features",
            args.zoom, args.x, args.y
        ),
    }
    Ok(())
}

fn print_tile(tile: &Tile) {
    println!(
        "Tile {}: {} feature(s), {} point(s)",
        tile.key,
        tile.len(),
        tile.num_points
    );
    println!("  North-west corner: {}", tile_to_lat_lng(&tile.key));
    for feature in &tile.features {
        let geometry: Vec<String> = feature
            .geometry
            .iter()
            .map(|[x, y]| format!("({}, {})", x, y))
            .collect();
        println!(
            "  #{:<6} {:<40} {}",
            feature.id,
            feature.tags.provider_name,
            geometry.join(" ")
        );
    }
}
