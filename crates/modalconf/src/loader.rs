//! Config file discovery, loading, and environment variable overlay.

use crate::{ConfigError, ModalConfig, OutputFormat};
use std::env;
use std::path::{Path, PathBuf};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided it replaces the local override, and is
/// returned even when missing so that loading reports the bad path.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/modal/config.toml");
    if system.exists() {
        files.push(system);
    }

    // XDG_CONFIG_HOME or ~/.config on Linux
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("modal/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        files.push(path.to_path_buf());
        return files;
    }

    let local = PathBuf::from("modal.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Read a TOML file and apply it on top of `config`.
pub fn load_from_file(config: &mut ModalConfig, path: &Path) -> Result<(), ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    apply_toml(config, &contents, path)
}

/// Apply the keys present in a TOML document; absent keys keep their value.
pub fn apply_toml(config: &mut ModalConfig, contents: &str, path: &Path) -> Result<(), ConfigError> {
    let table: toml::Table = contents.parse().map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    if let Some(display) = table.get("display").and_then(|v| v.as_table()) {
        if let Some(v) = display.get("column_width").and_then(|v| v.as_integer()) {
            config.display.column_width = usize::try_from(v)
                .map_err(|_| parse_error(format!("display.column_width must be positive, got {}", v)))?;
        }
        if let Some(v) = display.get("format").and_then(|v| v.as_str()) {
            config.display.format = v.parse::<OutputFormat>().map_err(parse_error)?;
        }
        if let Some(v) = display.get("color").and_then(|v| v.as_bool()) {
            config.display.color = v;
        }
        if let Some(v) = display.get("candidates").and_then(|v| v.as_integer()) {
            config.display.candidates = usize::try_from(v)
                .map_err(|_| parse_error(format!("display.candidates must be positive, got {}", v)))?;
        }
    }

    if let Some(logging) = table.get("logging").and_then(|v| v.as_table()) {
        if let Some(v) = logging.get("log_level").and_then(|v| v.as_str()) {
            config.logging.log_level = v.to_string();
        }
    }

    Ok(())
}

/// Apply environment variable overrides from the process environment.
pub fn apply_env_overrides(config: &mut ModalConfig, sources: &mut ConfigSources) {
    apply_env_overrides_from(config, sources, |key| env::var(key).ok());
}

/// Apply environment variable overrides read through `lookup`.
///
/// Values that do not parse are skipped and not recorded as overrides.
pub fn apply_env_overrides_from<F>(config: &mut ModalConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("MODAL_COLUMN_WIDTH") {
        if let Ok(width) = v.trim().parse() {
            config.display.column_width = width;
            sources.env_overrides.push("MODAL_COLUMN_WIDTH".to_string());
        }
    }
    if let Some(v) = lookup("MODAL_FORMAT") {
        if let Ok(format) = v.parse() {
            config.display.format = format;
            sources.env_overrides.push("MODAL_FORMAT".to_string());
        }
    }
    if let Some(v) = lookup("MODAL_COLOR") {
        if let Some(color) = parse_bool(&v) {
            config.display.color = color;
            sources.env_overrides.push("MODAL_COLOR".to_string());
        }
    }
    if let Some(v) = lookup("MODAL_CANDIDATES") {
        if let Ok(n) = v.trim().parse() {
            config.display.candidates = n;
            sources.env_overrides.push("MODAL_CANDIDATES".to_string());
        }
    }

    if let Some(v) = lookup("MODAL_LOG_LEVEL") {
        config.logging.log_level = v;
        sources.env_overrides.push("MODAL_LOG_LEVEL".to_string());
    }
    // RUST_LOG wins over MODAL_LOG_LEVEL
    if let Some(v) = lookup("RUST_LOG") {
        config.logging.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
