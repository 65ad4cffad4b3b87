//! Coordinate Mapping
//!
//! Maps camera-space landmark positions inside the active region onto the
//! full screen. The active region is the camera frame minus a margin on every
//! side, so the user can reach the screen edges without moving the hand out of
//! the camera's view.
//!
//! ```text
//!  camera frame (640x480)                 screen (1920x1080)
//! ┌──────────────────────┐               ┌──────────────────────────┐
//! │ margin               │               │(0,0)                     │
//! │   ┌──────────────┐   │   linear      │                          │
//! │   │active region │   │ ───────────>  │                          │
//! │   └──────────────┘   │               │                          │
//! │                      │               │               (1920,1080)│
//! └──────────────────────┘               └──────────────────────────┘
//! ```
//!
//! Points outside the active region extrapolate past the screen edges unless
//! clamping is enabled.

use crate::control::error::{ControlError, Result};
use crate::gesture::Point;
use tracing::debug;

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    /// Screen width
    pub width: f64,
    /// Screen height
    pub height: f64,
}

impl ScreenSize {
    /// Create a validated screen size
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ControlError::InvalidScreenSize(width, height));
        }
        Ok(Self { width, height })
    }

    /// Screen center
    pub fn midpoint(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Camera-space rectangle mapped onto the full screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveRegion {
    /// Left edge (camera pixels)
    pub left: f64,
    /// Top edge (camera pixels)
    pub top: f64,
    /// Right edge (camera pixels)
    pub right: f64,
    /// Bottom edge (camera pixels)
    pub bottom: f64,
}

impl ActiveRegion {
    /// Create a region from its edges
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self> {
        let region = Self {
            left,
            top,
            right,
            bottom,
        };

        let edges = [left, top, right, bottom];
        if edges.iter().any(|e| !e.is_finite()) || region.width() <= 0.0 || region.height() <= 0.0
        {
            return Err(ControlError::DegenerateRegion(region.to_string()));
        }

        Ok(region)
    }

    /// Camera frame minus `margin` on every side
    pub fn from_margin(frame_width: f64, frame_height: f64, margin: f64) -> Result<Self> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ControlError::InvalidMargin(margin));
        }

        let region = Self::new(margin, margin, frame_width - margin, frame_height - margin)?;
        region.check_within(frame_width, frame_height)?;
        Ok(region)
    }

    /// Reject regions that reach outside a `frame_width` x `frame_height` frame
    pub fn check_within(&self, frame_width: f64, frame_height: f64) -> Result<()> {
        let inside = self.left >= 0.0
            && self.top >= 0.0
            && self.right <= frame_width
            && self.bottom <= frame_height;

        if !inside {
            return Err(ControlError::RegionOutsideFrame {
                region: self.to_string(),
                frame_width,
                frame_height,
            });
        }
        Ok(())
    }

    /// Region width
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Region height
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Region center
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Check if a camera-space point lies inside the region (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }
}

impl std::fmt::Display for ActiveRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Linear interpolation of `value` from `[from_lo, from_hi]` onto `[0, to_len]`.
/// No clamping: values outside the source range extrapolate.
fn interpolate(value: f64, from_lo: f64, from_hi: f64, to_len: f64) -> f64 {
    (value - from_lo) * to_len / (from_hi - from_lo)
}

/// Map a camera-space point in `region` to screen space
pub fn map_point(point: Point, region: &ActiveRegion, screen: &ScreenSize) -> Point {
    Point::new(
        interpolate(point.x, region.left, region.right, screen.width),
        interpolate(point.y, region.top, region.bottom, screen.height),
    )
}

/// Coordinate mapper for one session
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    region: ActiveRegion,
    screen: ScreenSize,
    clamp_to_screen: bool,
}

impl CoordinateMapper {
    /// Create a new mapper (extrapolating)
    pub fn new(region: ActiveRegion, screen: ScreenSize) -> Self {
        debug!("Coordinate mapper: region {} -> screen {}x{}", region, screen.width, screen.height);
        Self {
            region,
            screen,
            clamp_to_screen: false,
        }
    }

    /// Clamp mapped points to the screen instead of extrapolating
    pub fn set_clamp_to_screen(&mut self, enabled: bool) {
        self.clamp_to_screen = enabled;
    }

    /// Map a camera-space point to screen space
    pub fn map(&self, point: Point) -> Point {
        let mapped = map_point(point, &self.region, &self.screen);
        if self.clamp_to_screen {
            self.clamp_to_bounds(mapped)
        } else {
            mapped
        }
    }

    /// Clamp a screen-space point to `[0, width] x [0, height]`
    pub fn clamp_to_bounds(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(0.0, self.screen.width),
            point.y.clamp(0.0, self.screen.height),
        )
    }

    /// Active region
    pub fn region(&self) -> &ActiveRegion {
        &self.region
    }

    /// Screen size
    pub fn screen(&self) -> &ScreenSize {
        &self.screen
    }
}
