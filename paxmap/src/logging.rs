//! Logging setup for PaxMap.
//!
//! - Writes to a log file that is cleared when the session starts
//! - Optionally echoes to stdout
//! - Level from `RUST_LOG`, falling back to `info` (or `debug` when requested)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILE;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping it flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    path: PathBuf,
}

impl LoggingGuard {
    /// Path of the log file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Options for [`init_logging`].
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Directory holding the log file
    pub dir: PathBuf,
    /// Log file name
    pub file: String,
    /// Also print log lines to stdout
    pub stdout: bool,
    /// Default to `debug` instead of `info` when `RUST_LOG` is unset
    pub debug: bool,
}

impl LoggingOptions {
    /// Options for logging to `path`, split into directory and file name.
    pub fn for_file(path: &Path) -> Self {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(default_log_dir()));
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        Self {
            dir,
            file,
            stdout: false,
            debug: false,
        }
    }

    pub fn with_stdout(mut self, enabled: bool) -> Self {
        self.stdout = enabled;
        self
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Full path of the log file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }

    fn default_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self::for_file(&Path::new(default_log_dir()).join(DEFAULT_LOG_FILE))
    }
}

/// Prepare the log file: create its directory and truncate it.
fn prepare_log_file(options: &LoggingOptions) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(&options.dir)?;
    let path = options.path();
    fs::write(&path, "")?;
    Ok(path)
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be cleared.
pub fn init_logging(options: &LoggingOptions) -> Result<LoggingGuard, io::Error> {
    let path = prepare_log_file(options)?;

    let file_appender = tracing_appender::rolling::never(&options.dir, &options.file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = options.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .compact()
    });

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_level()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
        path,
    })
}

/// Default log directory, relative to the working directory.
pub fn default_log_dir() -> &'static str {
    "logs"
}
