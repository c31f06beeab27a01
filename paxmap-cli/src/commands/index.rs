//! Index command - build the spatial index and summarize it.

use std::time::Instant;

use paxmap::config::DATA_URL_PATH;
use paxmap::data::CachePolicy;

use super::common::DataArgs;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Run the index command.
pub fn run(args: DataArgs, options: &GlobalOptions) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("index");
    let config = runner.config();
    let path = runner.data_path(args.data);

    println!("Indexing {}", path.display());
    let start = Instant::now();
    let index = runner.load_index(&path)?;
    let elapsed = start.elapsed();

    let stats = index.stats();
    let index_config = index.config();
    println!();
    println!("Features:   {}", stats.features);
    println!("Points:     {}", stats.points);
    println!("Bounds:     {} to {}", stats.south_west, stats.north_east);
    println!(
        "Tiles:      {} built up front (zoom 0-{}, split above {} points)",
        stats.tiles,
        index_config.index_max_zoom(),
        index_config.index_max_points()
    );
    println!(
        "Zoom:       served up to {}, extent {}, buffer {}",
        index_config.max_zoom(),
        index_config.extent(),
        index_config.buffer()
    );
    println!("Built in:   {:.2}s", elapsed.as_secs_f64());
    println!();
    println!(
        "Served at {} with Cache-Control: {}",
        DATA_URL_PATH,
        CachePolicy::with_max_age(config.data.cache_max_age).header_value()
    );

    Ok(())
}
