//! Configuration for PaxMap components.
//!
//! Structured configuration objects group related parameters together:
//!
//! - [`IndexConfig`] - spatial index tiling parameters
//! - [`MapSettings`] - initial view and viewport of the map
//! - [`ConfigFile`] - the user's `~/.paxmap/config.ini`, one section per concern
//!
//! # Example
//!
//! ```
//! use paxmap::config::IndexConfig;
//!
//! let config = IndexConfig::new()
//!     .with_index_max_zoom(4)
//!     .with_buffer(32);
//! assert_eq!(config.max_zoom(), 18);
//! assert!(config.validate().is_ok());
//! ```

mod defaults;
mod file;
mod index;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use index::{IndexConfig, InvalidIndexConfig};
pub use settings::{ConfigFile, DataSettings, LoggingSettings, MapSettings};
