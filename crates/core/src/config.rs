//! Mapper configuration via `edidmap.toml`
//!
//! On first start a default `edidmap.toml` is written next to the plugin.
//! To change settings, edit the file and restart the host.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Config file name placed in the plugin directory.
pub const CONFIG_FILE_NAME: &str = "edidmap.toml";

/// Sender name other modules register their listeners against.
pub const DEFAULT_PLUGIN_NAME: &str = "EditorIDMapper";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Mapper configuration loaded from `edidmap.toml`.
///
/// # Example
///
/// ```toml
/// plugin_name = "EditorIDMapper"
/// log_level = "info"
/// log_file = "EditorIDMapper.log"
/// capture_on_read = ["TESObjectREFR"]
/// warn_early_queries = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Name the responder is addressed by.
    #[serde(default = "default_plugin_name")]
    pub plugin_name: String,
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log file path. Logs go to stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Object categories whose editor ID reads are captured as well as
    /// assignments.
    #[serde(default)]
    pub capture_on_read: Vec<String>,
    /// Log a warning when a client is queried before readiness.
    #[serde(default = "default_true")]
    pub warn_early_queries: bool,
}

fn default_plugin_name() -> String {
    DEFAULT_PLUGIN_NAME.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            plugin_name: default_plugin_name(),
            log_level: default_log_level(),
            log_file: None,
            capture_on_read: Vec::new(),
            warn_early_queries: true,
        }
    }
}

impl MapperConfig {
    /// Validate and return the configured log level in lower case.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is not one of the five tracing levels.
    pub fn level(&self) -> Result<&'static str> {
        let wanted = self.log_level.to_ascii_lowercase();
        LOG_LEVELS
            .iter()
            .copied()
            .find(|level| *level == wanted)
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "Invalid log_level '{}' in {}. Expected one of {:?}.",
                    self.log_level, CONFIG_FILE_NAME, LOG_LEVELS
                ))
            })
    }

    /// Validate every field that has a restricted value set.
    pub fn validate(&self) -> Result<()> {
        if self.plugin_name.trim().is_empty() {
            return Err(Error::invalid_config("plugin_name must not be empty"));
        }
        self.level()?;
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# edidmap configuration
#
# Name other modules register their listeners against.
plugin_name = "EditorIDMapper"

# Log level: "trace", "debug", "info" (default), "warn" or "error"
log_level = "info"

# Log file. Logs go to stderr when unset.
# log_file = "EditorIDMapper.log"

# Object categories whose editor ID reads are captured as well as writes.
# Only needed for categories that expose their editor ID through a combined
# getter/setter path.
capture_on_read = []

# Warn when a client looks something up before the index is ready.
warn_early_queries = true
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let config: MapperConfig =
            toml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|source| Error::ConfigAccess {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    /// Write the default file if missing, then load it.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        Self::write_default_if_missing(path)?;
        Self::from_file(path)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::invalid_config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|source| Error::ConfigAccess {
            path: path.to_path_buf(),
            source,
        })
    }
}
