//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use crate::models::viewport::{MAX_ZOOM, MIN_ZOOM};
use crate::models::RgbColor;
use crate::services::yardage::CalculatorInputs;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

impl ThemeMode {
    /// Parses "auto", "dark" or "light" (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Lowercase name as accepted by [`ThemeMode::parse`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Default cutting inputs for the yardage and strip calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Usable width of fabric (inches)
    pub wof: f64,
    /// Seam allowance per side (inches)
    pub seam: f64,
    /// Sashing strip cut width (inches)
    #[serde(default = "default_sash_strip_width")]
    pub sash_strip_width: f64,
    /// Binding strip cut width (inches)
    #[serde(default = "default_binding_strip_width")]
    pub binding_strip_width: f64,
}

fn default_sash_strip_width() -> f64 {
    CalculatorInputs::default().sash_strip_width
}

fn default_binding_strip_width() -> f64 {
    CalculatorInputs::default().binding_strip_width
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        let inputs = CalculatorInputs::default();
        Self {
            wof: inputs.wof,
            seam: inputs.seam,
            sash_strip_width: inputs.sash_strip_width,
            binding_strip_width: inputs.binding_strip_width,
        }
    }
}

impl CalculatorConfig {
    /// Converts to calculator inputs.
    #[must_use]
    pub const fn inputs(&self) -> CalculatorInputs {
        CalculatorInputs {
            wof: self.wof,
            seam: self.seam,
            sash_strip_width: self.sash_strip_width,
            binding_strip_width: self.binding_strip_width,
        }
    }
}

/// Painting defaults for new sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintConfig {
    /// Initial active color
    pub active_color: String,
    /// Initial fabric tile size (inches)
    pub fabric_repeat_inches: f64,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            active_color: "#ffcc00".to_string(),
            fabric_repeat_inches: 6.0,
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Initial zoom in percent
    #[serde(default = "default_zoom_percent")]
    pub zoom_percent: u16,
}

/// Default zoom (100%)
fn default_zoom_percent() -> u16 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::default(),
            zoom_percent: default_zoom_percent(),
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory where exported layouts go when no path is given
    pub layouts_dir: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/QuiltPlanner/config.toml`
/// - macOS: `~/Library/Application Support/QuiltPlanner/config.toml`
/// - Windows: `%APPDATA%\QuiltPlanner\config.toml`
///
/// Setting `QUILT_PLANNER_CONFIG_DIR` replaces the directory.
///
/// # Validation
///
/// - `wof` must be positive
/// - `seam` and strip widths must be non-negative
/// - `fabric_repeat_inches` must be positive
/// - `zoom_percent` must be within 50-200
/// - `active_color` must be a hex color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Calculator defaults
    #[serde(default)]
    pub calculator: CalculatorConfig,
    /// Painting defaults
    #[serde(default)]
    pub paint: PaintConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// - `$QUILT_PLANNER_CONFIG_DIR` if set
    /// - Linux: `~/.config/QuiltPlanner/`
    /// - macOS: `~/Library/Application Support/QuiltPlanner/`
    /// - Windows: `%APPDATA%\QuiltPlanner\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate().context(format!(
            "Invalid config file: {}",
            config_path.display()
        ))?;

        debug!(path = %config_path.display(), "Loaded config");
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        debug!(path = %config_path.display(), "Saved config");
        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let calc = &self.calculator;
        if !(calc.wof.is_finite() && calc.wof > 0.0) {
            anyhow::bail!("Width of fabric must be positive, got {}", calc.wof);
        }
        for (name, value) in [
            ("Seam allowance", calc.seam),
            ("Sashing strip width", calc.sash_strip_width),
            ("Binding strip width", calc.binding_strip_width),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                anyhow::bail!("{name} must not be negative, got {value}");
            }
        }

        let repeat = self.paint.fabric_repeat_inches;
        if !(repeat.is_finite() && repeat > 0.0) {
            anyhow::bail!("Fabric repeat must be positive, got {repeat}");
        }

        RgbColor::from_hex(&self.paint.active_color).context(format!(
            "Invalid active color '{}'",
            self.paint.active_color
        ))?;

        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.ui.zoom_percent) {
            anyhow::bail!(
                "Zoom must be between {MIN_ZOOM} and {MAX_ZOOM}, got {}",
                self.ui.zoom_percent
            );
        }

        Ok(())
    }
}
