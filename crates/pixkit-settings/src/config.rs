//! Configuration management
//!
//! Settings are stored as JSON or TOML, chosen by file extension. Every
//! section falls back to its defaults for keys missing from the file.

use std::path::{Path, PathBuf};

use pixkit_core::{Color, ScaleQuality, DEFAULT_MAX_PIXELS};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Largest accepted undo limit.
pub const MAX_UNDO_LIMIT: usize = 10_000;

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo steps, 0 for unlimited
    pub undo_limit: usize,
    /// Merge related commands, such as the dabs of a brush stroke
    pub merge_commands: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            undo_limit: 0,
            merge_commands: true,
        }
    }
}

/// Raster image settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    /// Fill colour for new images and uncovered canvas
    pub background: Color,
    /// Resampling used when rescaling
    pub scale_quality: ScaleQuality,
    /// Largest bitmap accepted, in pixels
    pub max_pixels: u64,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            scale_quality: ScaleQuality::default(),
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub history: HistorySettings,
    pub raster: RasterSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(format!(
            "{}: config file must be .json or .toml",
            path.display()
        ))),
    }
}

impl Config {
    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config from file, or the defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.history.undo_limit > MAX_UNDO_LIMIT {
            return Err(SettingsError::invalid(
                "history.undo_limit",
                format!("must be at most {}", MAX_UNDO_LIMIT),
            ));
        }
        if self.raster.max_pixels == 0 {
            return Err(SettingsError::invalid("raster.max_pixels", "must be > 0"));
        }
        Ok(())
    }

    /// Default location of the config file in the user's config directory
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("pixkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no user config directory on this platform".into())
            })
    }
}
