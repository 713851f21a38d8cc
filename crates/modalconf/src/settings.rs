//! Display and logging settings.

use serde::{Deserialize, Serialize};

/// How analysis results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected table or json)", other)),
        }
    }
}

/// Report layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Characters per chord in the borrowed and substitution columns.
    /// Default: 7
    #[serde(default = "DisplayConfig::default_column_width")]
    pub column_width: usize,

    /// Default: table
    #[serde(default)]
    pub format: OutputFormat,

    /// Colored headings and warnings.
    /// Default: true
    #[serde(default = "DisplayConfig::default_color")]
    pub color: bool,

    /// Number of ranked (tonic, mode) candidates listed under the report.
    /// Default: 0
    #[serde(default)]
    pub candidates: usize,
}

impl DisplayConfig {
    fn default_column_width() -> usize {
        7
    }

    fn default_color() -> bool {
        true
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            column_width: Self::default_column_width(),
            format: OutputFormat::default(),
            color: Self::default_color(),
            candidates: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when RUST_LOG is unset.
    /// Default: warn
    #[serde(default = "LoggingConfig::default_log_level")]
    pub log_level: String,
}

impl LoggingConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
