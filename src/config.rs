//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! ```toml
//! [input]
//! device_path = ""   # empty = auto-detect
//! poll_rate_hz = 30
//!
//! [output]
//! only_changes = true
//! format = "jsonl"
//!
//! [layout]
//! preset = "ds4"
//!
//! # Optional: replaces the preset entirely
//! [layout.custom]
//! target = "xbox"
//! deadzone = 0.2
//! [layout.custom.buttons]
//! A = "Button0"
//! [layout.custom.axes_buttons]
//! DPAD_LEFT = "Axis0-"
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{GamepadViewerError, Result};
use crate::mapping::layout::{ControllerLayout, LayoutConfig, Target};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub layout: LayoutSection,
}

/// Gamepad sampling configuration
#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    #[serde(default)]
    pub device_path: String,

    #[serde(default = "default_poll_rate_hz")]
    pub poll_rate_hz: u32,
}

/// State output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_only_changes")]
    pub only_changes: bool,

    #[serde(default = "default_output_format")]
    pub format: String,
}

/// Controller layout selection
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LayoutSection {
    #[serde(default)]
    pub preset: Target,

    #[serde(default)]
    pub custom: Option<LayoutConfig>,
}

// Default value functions
fn default_poll_rate_hz() -> u32 { 30 }

fn default_only_changes() -> bool { true }
fn default_output_format() -> String { "jsonl".to_string() }

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            device_path: String::new(),
            poll_rate_hz: default_poll_rate_hz(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            only_changes: default_only_changes(),
            format: default_output_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gamepad_viewer::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The layout to convert with: the custom one if present, otherwise the
    /// preset.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamepad_viewer::config::Config;
    /// use gamepad_viewer::mapping::ControllerLayout;
    ///
    /// let config = Config::from_toml("[layout]\npreset = \"ds4\"")?;
    /// assert_eq!(config.controller_layout()?, ControllerLayout::ds4());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn controller_layout(&self) -> Result<ControllerLayout> {
        if let Some(custom) = &self.layout.custom {
            return Ok(ControllerLayout::new(custom));
        }
        ControllerLayout::preset(self.layout.preset).ok_or_else(|| {
            config_error(format!(
                "layout preset '{}' needs a [layout.custom] table",
                self.layout.preset
            ))
        })
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if self.input.poll_rate_hz == 0 || self.input.poll_rate_hz > 1000 {
            return Err(config_error("poll_rate_hz must be between 1 and 1000"));
        }

        if self.output.format != "jsonl" {
            return Err(config_error("output format must be 'jsonl' (only supported format)"));
        }

        if let Some(custom) = &self.layout.custom {
            if !(0.0..1.0).contains(&custom.deadzone) {
                return Err(config_error("layout deadzone must be between 0.0 and 1.0"));
            }
        }

        // Rejects an unusable preset up front instead of at startup
        self.controller_layout()?;

        Ok(())
    }
}

fn config_error(message: impl std::fmt::Display) -> GamepadViewerError {
    GamepadViewerError::Config(toml::de::Error::custom(message))
}
