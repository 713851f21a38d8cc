//! Configuration loading for the modal analyzer.
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/modal/config.toml` (system)
//! 2. `~/.config/modal/config.toml` (user)
//! 3. `./modal.toml` (local override), or the path given with `--config`
//! 4. Environment variables (`MODAL_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [display]
//! column_width = 7
//! format = "table"
//! color = true
//! candidates = 3
//!
//! [logging]
//! log_level = "warn"
//! ```

pub mod loader;
pub mod settings;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use settings::{DisplayConfig, LoggingConfig, OutputFormat};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModalConfig {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ModalConfig {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load with `config_path` standing in for `./modal.toml`.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration from optional path and return information about sources.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = ModalConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            loader::load_from_file(&mut config, &path)?;
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Built by hand so the header comment and section order are stable
        let mut output = String::new();

        output.push_str("# Modal analyzer configuration\n\n");

        output.push_str("[display]\n");
        output.push_str(&format!("column_width = {}\n", self.display.column_width));
        output.push_str(&format!("format = \"{}\"\n", self.display.format));
        output.push_str(&format!("color = {}\n", self.display.color));
        output.push_str(&format!("candidates = {}\n", self.display.candidates));

        output.push_str("\n[logging]\n");
        output.push_str(&format!("log_level = \"{}\"\n", self.logging.log_level));

        output
    }
}
