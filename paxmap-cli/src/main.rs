//! PaxMap CLI - Command-line interface
//!
//! This binary drives the PaxMap library: it indexes the provider feature
//! collection, inspects index tiles and renders headless map views.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::DataArgs;
use commands::config::ConfigCommands;
use commands::tile::TileArgs;
use commands::view::ViewArgs;
use runner::GlobalOptions;

#[derive(Parser)]
#[command(name = "paxmap")]
#[command(version, about = "Map of COVID-19 treatment providers", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.paxmap/config.ini
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level and echo logs to stdout
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the spatial index and print a summary
    Index(DataArgs),

    /// Render the markers visible in a map view
    View(ViewArgs),

    /// Print the features of one index tile
    Tile {
        /// Tile zoom level
        zoom: u8,

        /// Tile column (wraps around the antimeridian)
        #[arg(allow_negative_numbers = true)]
        x: i64,

        /// Tile row
        y: i64,

        #[command(flatten)]
        data: DataArgs,
    },

    /// Manage the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();
    let options = GlobalOptions {
        config: cli.config,
        debug: cli.debug,
    };

    let result = match cli.command {
        Commands::Index(data) => commands::index::run(data, &options),
        Commands::View(args) => commands::view::run(args, &options),
        Commands::Tile { zoom, x, y, data } => {
            commands::tile::run(TileArgs { zoom, x, y, data }, &options)
        }
        Commands::Config(command) => commands::config::run(command, &options),
    };

    if let Err(e) = result {
        e.exit();
    }
}
