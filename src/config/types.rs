//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::control::{DEFAULT_CLICK_THRESHOLD, DEFAULT_SMOOTHING_FACTOR};
use crate::session::DEFAULT_STATS_INTERVAL;

/// Camera frame geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Target screen size; probed from the display when unset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Screen width in pixels
    pub width: Option<u32>,

    /// Screen height in pixels
    pub height: Option<u32>,
}

impl ScreenConfig {
    /// Both dimensions, if both are set
    pub fn size(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// Active region inside the camera frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    /// Pixels excluded from every side of the camera frame
    pub margin: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self { margin: 100.0 }
    }
}

/// Cursor smoothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Divisor of the per-frame step; higher is smoother and slower
    pub factor: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            factor: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

/// Pinch click detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Index-to-middle fingertip distance (camera pixels) that counts as a pinch
    pub threshold: f64,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CLICK_THRESHOLD,
        }
    }
}

/// Pointer output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Mirror moves horizontally (camera faces the user)
    pub mirror_x: bool,

    /// Clamp mapped points to the screen instead of extrapolating
    pub clamp_to_screen: bool,

    /// Log pointer actions instead of injecting them
    pub dry_run: bool,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            mirror_x: true,
            clamp_to_screen: false,
            dry_run: false,
        }
    }
}

/// Landmark input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// NDJSON landmark stream; "-" reads stdin
    pub path: String,

    /// Read on a separate thread and keep only the newest frame
    pub drop_stale_frames: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: "-".to_string(),
            drop_stale_frames: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Frames between periodic stats lines (0 = off)
    pub stats_interval_frames: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval_frames: DEFAULT_STATS_INTERVAL,
        }
    }
}
