//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`index`] - Build the spatial index and summarize it
//! - [`tile`] - Print a single index tile
//! - [`view`] - Run a headless map session and print the markers in view

pub mod common;
pub mod config;
pub mod index;
pub mod tile;
pub mod view;
