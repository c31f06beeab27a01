//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use paxmap::config::ConfigFileError;
use paxmap::data::LoadError;
use paxmap::index::IndexError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Feature data could not be loaded
    Load { path: PathBuf, error: LoadError },
    /// Feature data could not be indexed
    Index(IndexError),
    /// The session ended without usable data
    DataUnavailable(String),
    /// A requested marker is not in view
    MarkerNotFound(u64),
    /// Invalid command-line argument
    InvalidArgument(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Load {
                error: LoadError::Read { .. },
                ..
            } => {
                eprintln!();
                eprintln!("Make sure the feature data exists:");
                eprintln!("  1. Pass it explicitly with --data <PATH>");
                eprintln!("  2. Or set 'path' in the [data] section of config.ini");
            }
            CliError::Load {
                error: LoadError::Timeout(_),
                ..
            } => {
                eprintln!();
                eprintln!("Increase --timeout or the [data] timeout setting, or set it to 0 to wait indefinitely.");
            }
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Run 'paxmap config show' to see the effective settings,");
                eprintln!("or 'paxmap config init --force' to restore the defaults.");
            }
            CliError::MarkerNotFound(_) => {
                eprintln!();
                eprintln!("Run the same view without --popup to list the visible markers.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::Load { path, error } => {
                write!(f, "Failed to load '{}': {}", path.display(), error)
            }
            CliError::Index(e) => write!(f, "Failed to index feature data: {}", e),
            CliError::DataUnavailable(reason) => write!(f, "Feature data unavailable: {}", reason),
            CliError::MarkerNotFound(id) => write!(f, "No marker with id {} in view", id),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Load { error, .. } => Some(error),
            CliError::Index(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<IndexError> for CliError {
    fn from(e: IndexError) -> Self {
        CliError::Index(e)
    }
}
