//! Run configuration
//!
//! Uses RON for the optional settings file. A missing file means defaults;
//! a malformed one is reported and defaults are used.

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::rasterizer::{Color, RenderMode, RenderSettings, HEIGHT, WIDTH};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

/// Settings read from `spincube.ron`. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub mode: RenderMode,
    /// Base per-frame angle increments (X and Y axes)
    pub spin_x: f32,
    pub spin_y: f32,
    pub background: Color,
    /// Override the per-mode projection scale
    pub scale: Option<f32>,
    /// Override the per-mode camera distance
    pub distance: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            mode: RenderMode::Filled,
            spin_x: 0.03,
            spin_y: 0.02,
            background: Color::BLACK,
            scale: None,
            distance: None,
        }
    }
}

impl Config {
    /// Projection settings for `mode`, with any file overrides applied
    pub fn settings_for(&self, mode: RenderMode) -> RenderSettings {
        let mut settings = match mode {
            RenderMode::Filled => RenderSettings::filled(),
            RenderMode::Wireframe => RenderSettings::wireframe(),
        };
        if let Some(scale) = self.scale {
            settings.scale = scale;
        }
        if let Some(distance) = self.distance {
            settings.distance = distance;
        }
        settings.background = self.background;
        settings
    }

    /// Settings for the configured startup mode
    pub fn settings(&self) -> RenderSettings {
        self.settings_for(self.mode)
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = ron::from_str("(width: 320, height: 240)").unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 240);
        assert_eq!(config.mode, RenderMode::Filled);
        assert_eq!(config.spin_x, 0.03);
        assert!(config.scale.is_none());
    }

    #[test]
    fn mode_parses_as_bare_variant() {
        let config: Config = ron::from_str("(mode: Wireframe)").unwrap();
        assert_eq!(config.mode, RenderMode::Wireframe);
    }

    #[test]
    fn overrides_apply_to_both_presets() {
        let config = Config {
            scale: Some(90.0),
            distance: Some(5.0),
            background: Color::new(16, 16, 24),
            ..Config::default()
        };
        for mode in [RenderMode::Filled, RenderMode::Wireframe] {
            let settings = config.settings_for(mode);
            assert_eq!(settings.scale, 90.0);
            assert_eq!(settings.distance, 5.0);
            assert_eq!(settings.background, Color::new(16, 16, 24));
            assert_eq!(settings.mode, mode);
        }
    }

    #[test]
    fn presets_differ_per_mode() {
        let config = Config::default();
        let filled = config.settings_for(RenderMode::Filled);
        let wire = config.settings_for(RenderMode::Wireframe);
        assert!(filled.scale != wire.scale);
        assert!(filled.distance != wire.distance);
    }
}
