//! OS input injection through `enigo`

use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use tracing::{debug, info};

use super::{PointerSink, Result, SinkError};

/// Pointer sink backed by the platform input API
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    /// Connect to the platform input backend
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| SinkError::Unavailable(format!("{:?}", e)))?;

        info!("Input backend connected");
        Ok(Self { enigo })
    }

    /// Size of the main display in pixels
    pub fn screen_size(&self) -> Result<(u32, u32)> {
        let (width, height) = self
            .enigo
            .main_display()
            .map_err(|e| SinkError::Unavailable(format!("display size: {:?}", e)))?;

        debug!("Main display: {}x{}", width, height);
        Ok((width.max(0) as u32, height.max(0) as u32))
    }
}

impl PointerSink for EnigoSink {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.enigo
            .move_mouse(x.round() as i32, y.round() as i32, Coordinate::Abs)
            .map_err(|e| SinkError::Injection(format!("move to ({:.0}, {:.0}): {:?}", x, y, e)))
    }

    fn click(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| SinkError::Injection(format!("click: {:?}", e)))
    }
}
