//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, the async runtime
//! and data loading to reduce duplication across command handlers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::info;

use paxmap::config::{config_file_path, ConfigFile};
use paxmap::data::{load_collection, LoadError};
use paxmap::geojson::FeatureCollection;
use paxmap::index::SpatialIndex;
use paxmap::logging::{init_logging, LoggingGuard, LoggingOptions};

use crate::error::CliError;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Config file to use instead of ~/.paxmap/config.ini
    pub config: Option<PathBuf>,
    /// Log at debug level and echo logs to stdout
    pub debug: bool,
}

impl GlobalOptions {
    /// Path of the config file in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }

    /// Load the config file in effect (defaults if it doesn't exist).
    pub fn load_config(&self) -> Result<ConfigFile, CliError> {
        Ok(ConfigFile::load_from(&self.config_path())?)
    }
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    runtime: Runtime,
}

impl CliRunner {
    /// Create a runner, loading config and initializing logging.
    pub fn new(options: &GlobalOptions) -> Result<Self, CliError> {
        let config = options.load_config()?;

        let logging = LoggingOptions::for_file(&config.logging.file)
            .with_stdout(options.debug)
            .with_debug(options.debug);
        let logging_guard =
            init_logging(&logging).map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CliError::Runtime)?;

        Ok(Self {
            logging_guard,
            config,
            runtime,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Runtime for async work; commands block on it.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("PaxMap v{}", paxmap::VERSION);
        info!("PaxMap CLI: {} command", command);
    }

    /// Data path from the command line, falling back to the config.
    pub fn data_path(&self, cli_path: Option<PathBuf>) -> PathBuf {
        cli_path.unwrap_or_else(|| self.config.data.path.clone())
    }

    /// Load the feature collection, giving up after `timeout` seconds if set.
    pub fn load(&self, path: &Path, timeout: Option<u64>) -> Result<FeatureCollection, CliError> {
        self.runtime
            .block_on(load_with_timeout(path.to_path_buf(), timeout))
            .map_err(|error| CliError::Load {
                path: path.to_path_buf(),
                error,
            })
    }

    /// Load the feature collection and index it with the configured settings.
    pub fn load_index(&self, path: &Path) -> Result<SpatialIndex, CliError> {
        let collection = self.load(path, self.config.data.timeout)?;
        Ok(SpatialIndex::build(&collection, self.config.index)?)
    }
}

/// Load a collection, mapping an elapsed timeout to [`LoadError::Timeout`].
pub async fn load_with_timeout(
    path: PathBuf,
    timeout: Option<u64>,
) -> Result<FeatureCollection, LoadError> {
    match timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), load_collection(&path))
            .await
            .unwrap_or(Err(LoadError::Timeout(secs))),
        None => load_collection(&path).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_path() {
        let options = GlobalOptions {
            config: Some(PathBuf::from("/tmp/custom.ini")),
            debug: false,
        };
        assert_eq!(options.config_path(), PathBuf::from("/tmp/custom.ini"));
    }

    #[test]
    fn test_missing_config_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let options = GlobalOptions {
            config: Some(temp.path().join("absent.ini")),
            debug: false,
        };
        let config = options.load_config().unwrap();
        assert_eq!(config.index.max_zoom(), 18);
    }

    #[tokio::test]
    async fn test_load_without_timeout_reports_read_error() {
        let temp = TempDir::new().unwrap();
        let result = load_with_timeout(temp.path().join("none.json"), None).await;
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }

    #[tokio::test]
    async fn test_load_with_generous_timeout() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.json");
        std::fs::write(&path, r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        let collection = load_with_timeout(path, Some(30)).await.unwrap();
        assert!(collection.is_empty());
    }
}
