//! File logging setup. The TUI owns the terminal, so events only go to
//! daily-rotated files under the data directory.

use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::types::{Result, TrackError};

const LOG_PREFIX: &str = "eggtrack";
const MAX_LOG_FILES: usize = 5;

/// Filter used when `RUST_LOG` is unset
pub fn default_directive(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), level)
}

pub fn init(config: &Config, verbose: bool) -> Result<()> {
    let appender = Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(&config.log_dir)
        .map_err(|e| TrackError::Config(format!("cannot open log directory: {}", e)))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| TrackError::Config(format!("logging already initialized: {}", e)))
}
