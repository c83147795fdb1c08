use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::Path;

use crate::ttml::parser::TtmlParser;
use crate::ttml::render_style::CellResolution;
use crate::ttml::timing::MSECOND;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Document parsing settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Document parsing configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParserConfig {
    /// Cell grid used when a document declares none
    #[serde(default)]
    pub cell_resolution: CellResolution,

    /// Begin of the media container in milliseconds
    #[serde(default = "default_container_begin_ms")]
    pub container_begin_ms: u64,

    /// Duration of the media container in milliseconds
    #[serde(default = "default_container_duration_ms")]
    pub container_duration_ms: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            cell_resolution: CellResolution::default(),
            container_begin_ms: default_container_begin_ms(),
            container_duration_ms: default_container_duration_ms(),
        }
    }
}

impl ParserConfig {
    // @returns: Parser using these settings
    pub fn to_parser(&self) -> TtmlParser {
        TtmlParser::new(
            self.cell_resolution,
            self.container_begin_ms.saturating_mul(MSECOND),
            self.container_duration_ms.saturating_mul(MSECOND),
        )
    }
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Pretty-print the JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Extension appended to the input file stem
    #[serde(default = "default_output_extension")]
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
            extension: default_output_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_container_begin_ms() -> u64 {
    1
}

fn default_container_duration_ms() -> u64 {
    24 * 60 * 60 * 1000
}

fn default_true() -> bool {
    true
}

fn default_output_extension() -> String {
    "scenes.json".to_string()
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let cells = self.parser.cell_resolution;
        if cells.columns == 0 || cells.rows == 0 {
            return Err(anyhow!(
                "Cell resolution must be non-zero on both axes, got {}x{}",
                cells.columns,
                cells.rows
            ));
        }

        if self.parser.container_duration_ms == 0 {
            return Err(anyhow!("Container duration must be greater than zero"));
        }

        if self.output.extension.trim().is_empty() {
            return Err(anyhow!("Output extension must not be empty"));
        }

        Ok(())
    }

    /// Read and validate a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration file when it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file {:?} not found, using default settings", path);
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }
}
