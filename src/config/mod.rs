//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - Environment variables (through the CLI)
//! - CLI arguments
//!
//! Every section and field is optional in the file; missing values take
//! their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::control::ControllerSettings;
use crate::session::SessionOptions;

pub mod types;

pub use types::{
    CameraConfig, ClickConfig, LoggingConfig, PointerConfig, RegionConfig, ScreenConfig,
    SmoothingConfig, SourceConfig,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera frame geometry
    pub camera: CameraConfig,
    /// Target screen size
    pub screen: ScreenConfig,
    /// Active region margin
    pub region: RegionConfig,
    /// Cursor smoothing
    pub smoothing: SmoothingConfig,
    /// Pinch click detection
    pub click: ClickConfig,
    /// Pointer output
    pub pointer: PointerConfig,
    /// Landmark input
    pub source: SourceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Values given on the command line; `None`/`false` leaves the file value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Landmark stream path
    pub input: Option<String>,
    /// Smoothing factor
    pub smoothing: Option<f64>,
    /// Click threshold
    pub click_threshold: Option<f64>,
    /// Region margin
    pub margin: Option<f64>,
    /// Screen size
    pub screen: Option<(u32, u32)>,
    /// Disable mirroring
    pub no_mirror: bool,
    /// Clamp to screen
    pub clamp: bool,
    /// Dry run
    pub dry_run: bool,
    /// Drop stale frames
    pub drop_stale: bool,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the config for a run
    ///
    /// A file named explicitly must load and validate. Without one, the
    /// default location is used if present, falling back to defaults when it
    /// is invalid.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Ok(Self::load(&path).unwrap_or_else(|e| {
                warn!("Failed to load config: {:#}, using defaults", e);
                Self::default_config()
            })),
            _ => {
                info!("No config file, using defaults");
                Ok(Self::default_config())
            }
        }
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Default config location: `$XDG_CONFIG_HOME/gesture-pointer/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gesture-pointer").join("config.toml"))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.camera.width == 0 || self.camera.height == 0 {
            anyhow::bail!(
                "Invalid camera size in config: {}x{}",
                self.camera.width,
                self.camera.height
            );
        }

        match (self.screen.width, self.screen.height) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("Invalid screen config: set both width and height, or neither")
            }
            _ => {}
        }

        // Screen falls back to a placeholder so the rest can be checked before probing
        let (width, height) = self.screen.size().unwrap_or((1920, 1080));
        self.controller_settings(width, height)
            .validate()
            .context("Invalid control settings in config")?;

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(input) = &overrides.input {
            self.source.path = input.clone();
        }
        if let Some(factor) = overrides.smoothing {
            self.smoothing.factor = factor;
        }
        if let Some(threshold) = overrides.click_threshold {
            self.click.threshold = threshold;
        }
        if let Some(margin) = overrides.margin {
            self.region.margin = margin;
        }
        if let Some((width, height)) = overrides.screen {
            self.screen.width = Some(width);
            self.screen.height = Some(height);
        }
        if overrides.no_mirror {
            self.pointer.mirror_x = false;
        }
        if overrides.clamp {
            self.pointer.clamp_to_screen = true;
        }
        if overrides.dry_run {
            self.pointer.dry_run = true;
        }
        if overrides.drop_stale {
            self.source.drop_stale_frames = true;
        }
        self
    }

    /// Controller settings for a screen of `screen_width` x `screen_height`
    pub fn controller_settings(&self, screen_width: u32, screen_height: u32) -> ControllerSettings {
        ControllerSettings {
            camera_width: f64::from(self.camera.width),
            camera_height: f64::from(self.camera.height),
            margin: self.region.margin,
            screen_width: f64::from(screen_width),
            screen_height: f64::from(screen_height),
            smoothing_factor: self.smoothing.factor,
            click_threshold: self.click.threshold,
            mirror_x: self.pointer.mirror_x,
            clamp_to_screen: self.pointer.clamp_to_screen,
        }
    }

    /// Session runtime options
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            stats_interval_frames: self.logging.stats_interval_frames,
        }
    }
}

/// Parse a `WIDTHxHEIGHT` screen size, e.g. `1920x1080`
pub fn parse_screen_size(value: &str) -> std::result::Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", value))?;

    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| format!("invalid dimension '{}' in '{}'", s, value))
    };

    Ok((parse(width)?, parse(height)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.camera.height, 480);
        assert_eq!(config.region.margin, 100.0);
        assert_eq!(config.smoothing.factor, 7.0);
        assert_eq!(config.click.threshold, 40.0);
        assert!(config.pointer.mirror_x);
        assert!(!config.pointer.clamp_to_screen);
        assert_eq!(config.source.path, "-");
        assert_eq!(config.logging.stats_interval_frames, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config: Config = toml::from_str(
            r#"
            [smoothing]
            factor = 4.0

            [screen]
            width = 2560
            height = 1440
            "#,
        )
        .unwrap();

        assert_eq!(config.smoothing.factor, 4.0);
        assert_eq!(config.screen.size(), Some((2560, 1440)));
        assert_eq!(config.click.threshold, 40.0);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default_config();
        config.smoothing.factor = 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.click.threshold = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.region.margin = 240.0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.screen.width = Some(1920);
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.camera.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_overrides() {
        let overrides = ConfigOverrides {
            input: Some("frames.ndjson".into()),
            smoothing: Some(3.0),
            screen: Some((1280, 720)),
            no_mirror: true,
            dry_run: true,
            ..Default::default()
        };

        let config = Config::default_config().with_overrides(&overrides);
        assert_eq!(config.source.path, "frames.ndjson");
        assert_eq!(config.smoothing.factor, 3.0);
        assert_eq!(config.screen.size(), Some((1280, 720)));
        assert!(!config.pointer.mirror_x);
        assert!(config.pointer.dry_run);
        assert!(!config.pointer.clamp_to_screen);
        assert_eq!(config.click.threshold, 40.0);
    }

    #[test]
    fn test_controller_settings() {
        let settings = Config::default_config().controller_settings(1920, 1080);
        assert_eq!(settings, ControllerSettings::default());
    }

    #[test]
    fn test_parse_screen_size() {
        assert_eq!(parse_screen_size("1920x1080"), Ok((1920, 1080)));
        assert_eq!(parse_screen_size("800X600"), Ok((800, 600)));
        assert!(parse_screen_size("1920").is_err());
        assert!(parse_screen_size("0x600").is_err());
        assert!(parse_screen_size("axb").is_err());
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("gesture-pointer/config.toml"));
        }
    }
}
