//! Biome configuration files.
//!
//! The format follows the file extension:
//! - `.toml`: a `BiomeConfig` table, the format `tilegen preset` prints.
//! - `.json`: the same structure as a JSON object.
//!
//! Loading always validates, so a config that loads is safe to hand to
//! `LevelGenerator`.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::mapgen::config::{BiomeConfig, ConfigError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }
}

/// Describes why a configuration file could not be used.
#[derive(Debug)]
pub enum ConfigLoadError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The file is not well-formed for its format or does not match the schema.
    Parse { format: ConfigFormat, message: String },
    /// The extension is neither `.toml` nor `.json`.
    UnsupportedExtension(String),
    /// The file parsed but holds values generation cannot use.
    Invalid(ConfigError),
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse { format, message } => {
                write!(f, "invalid {} config: {message}", format.name())
            }
            Self::UnsupportedExtension(extension) => {
                write!(f, "unsupported config extension '{extension}' (expected .toml or .json)")
            }
            Self::Invalid(error) => write!(f, "config rejected: {error}"),
        }
    }
}

impl Error for ConfigLoadError {}

impl From<ConfigError> for ConfigLoadError {
    fn from(error: ConfigError) -> Self {
        Self::Invalid(error)
    }
}

fn format_for(path: &Path) -> Result<ConfigFormat, ConfigLoadError> {
    ConfigFormat::from_path(path).ok_or_else(|| {
        let extension =
            path.extension().map(|raw| raw.to_string_lossy().into_owned()).unwrap_or_default();
        ConfigLoadError::UnsupportedExtension(extension)
    })
}

/// Parses `text` in `format` and validates the result.
pub fn parse_biome_config(
    text: &str,
    format: ConfigFormat,
) -> Result<BiomeConfig, ConfigLoadError> {
    let config: BiomeConfig = match format {
        ConfigFormat::Toml => toml::from_str(text)
            .map_err(|e| ConfigLoadError::Parse { format, message: e.to_string() })?,
        ConfigFormat::Json => serde_json::from_str(text)
            .map_err(|e| ConfigLoadError::Parse { format, message: e.to_string() })?,
    };
    config.validate()?;
    Ok(config)
}

/// Load and validate a biome configuration file.
pub fn load_biome_config(path: &Path) -> Result<BiomeConfig, ConfigLoadError> {
    let format = format_for(path)?;
    let text = fs::read_to_string(path).map_err(ConfigLoadError::Io)?;
    parse_biome_config(&text, format)
}

/// Serializes `config` in `format`.
pub fn render_biome_config(config: &BiomeConfig, format: ConfigFormat) -> io::Result<String> {
    match format {
        ConfigFormat::Toml => toml::to_string_pretty(config).map_err(io::Error::other),
        ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(io::Error::other),
    }
}

/// Write `config` to `path`, picking the format from the extension.
pub fn save_biome_config(path: &Path, config: &BiomeConfig) -> io::Result<()> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "config path must end in .toml or .json")
    })?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut text = render_biome_config(config, format)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    fs::write(path, text)
}

#[cfg(test)]
mod tests;
