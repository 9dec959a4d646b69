//! Log sink setup.
//!
//! Installs a global `tracing` subscriber at the configured level. With a
//! `log_file` configured, output is appended to that file without ANSI
//! colouring; otherwise it goes to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use edidmap_core::MapperConfig;
use tracing::Level;

use crate::error::{Error, Result};

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails if the log level is invalid, the log file cannot be opened, or a
/// global subscriber is already installed.
pub fn init_logging(config: &MapperConfig) -> Result<()> {
    let level: Level = config
        .level()?
        .parse()
        .map_err(|e| Error::Logging(format!("{}", e)))?;

    let builder = tracing_subscriber::fmt().with_max_level(level);
    let installed = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| Error::Logging(e.to_string()))?;

    tracing::info!(
        target: "edidmap::protocol",
        plugin = %config.plugin_name,
        level = %level,
        "logging initialized"
    );
    Ok(())
}
