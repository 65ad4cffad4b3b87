//! Gesture Controller
//!
//! Per-frame driver of the control engine. Owns the only state carried
//! between frames (smoother and click debouncer) and routes each frame to the
//! move or click pipeline according to its mode.

use crate::control::click::{ClickDebouncer, ClickEvent, DEFAULT_CLICK_THRESHOLD};
use crate::control::coordinates::{ActiveRegion, CoordinateMapper, ScreenSize};
use crate::control::error::{recovery_action, ControlError, RecoveryAction, Result};
use crate::control::smoothing::{MotionSmoother, DEFAULT_SMOOTHING_FACTOR};
use crate::gesture::{classify, HandFrame, Mode, Point, INDEX_TIP, MIDDLE_TIP};
use crate::sink::PointerSink;
use tracing::{debug, info, trace, warn};

/// Static settings for one control session
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    /// Camera frame width (pixels)
    pub camera_width: f64,
    /// Camera frame height (pixels)
    pub camera_height: f64,
    /// Margin excluded from every side of the camera frame (pixels)
    pub margin: f64,
    /// Screen width (pixels)
    pub screen_width: f64,
    /// Screen height (pixels)
    pub screen_height: f64,
    /// Smoothing divisor, must be > 1
    pub smoothing_factor: f64,
    /// Pinch distance below which a click fires (camera pixels)
    pub click_threshold: f64,
    /// Mirror cursor moves horizontally (camera faces the user)
    pub mirror_x: bool,
    /// Clamp mapped points to the screen instead of extrapolating
    pub clamp_to_screen: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            camera_width: 640.0,
            camera_height: 480.0,
            margin: 100.0,
            screen_width: 1920.0,
            screen_height: 1080.0,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            mirror_x: true,
            clamp_to_screen: false,
        }
    }
}

impl ControllerSettings {
    /// Active region derived from camera size and margin
    pub fn active_region(&self) -> Result<ActiveRegion> {
        ActiveRegion::from_margin(self.camera_width, self.camera_height, self.margin)
    }

    /// Validated screen size
    pub fn screen_size(&self) -> Result<ScreenSize> {
        ScreenSize::new(self.screen_width, self.screen_height)
    }

    /// Check every setting without building a controller
    pub fn validate(&self) -> Result<()> {
        self.active_region()?;
        self.screen_size()?;
        MotionSmoother::new(self.smoothing_factor)?;
        ClickDebouncer::new(self.click_threshold)?;
        Ok(())
    }
}

/// What the controller did with one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// Mode the frame was handled in
    pub mode: Mode,
    /// Cursor position sent to the sink (after mirroring), if any
    pub cursor: Option<Point>,
    /// Pinch distance evaluated this frame, if any
    pub pinch_distance: Option<f64>,
    /// Click fired this frame, if any
    pub click: Option<ClickEvent>,
    /// Frame was malformed and treated as "no hand"
    pub skipped: bool,
}

impl FrameOutcome {
    fn idle() -> Self {
        Self {
            mode: Mode::Idle,
            cursor: None,
            pinch_distance: None,
            click: None,
            skipped: false,
        }
    }

    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::idle()
        }
    }

    /// True if any pointer action was delivered
    pub fn acted(&self) -> bool {
        self.cursor.is_some() || self.click.is_some()
    }
}

/// Stateful per-session gesture controller
#[derive(Debug)]
pub struct GestureController {
    settings: ControllerSettings,
    mapper: CoordinateMapper,
    smoother: MotionSmoother,
    debouncer: ClickDebouncer,
}

impl GestureController {
    /// Create a controller; rejects invalid settings before any frame
    pub fn new(settings: ControllerSettings) -> Result<Self> {
        let region = settings.active_region()?;
        let screen = settings.screen_size()?;

        let mut mapper = CoordinateMapper::new(region, screen);
        mapper.set_clamp_to_screen(settings.clamp_to_screen);

        let smoother = MotionSmoother::new(settings.smoothing_factor)?;
        let debouncer = ClickDebouncer::new(settings.click_threshold)?;

        info!(
            "Gesture controller: region {} -> {}x{}, smoothing {}, \
             click threshold {}px, mirror {}, clamp {}",
            region,
            screen.width,
            screen.height,
            settings.smoothing_factor,
            settings.click_threshold,
            settings.mirror_x,
            settings.clamp_to_screen
        );

        Ok(Self {
            settings,
            mapper,
            smoother,
            debouncer,
        })
    }

    /// Process one frame. `None` means no hand was detected.
    ///
    /// Sink failures are returned as errors; malformed frames are not.
    pub fn process_frame<S>(
        &mut self,
        hand: Option<&HandFrame>,
        sink: &mut S,
    ) -> Result<FrameOutcome>
    where
        S: PointerSink + ?Sized,
    {
        let Some(hand) = hand else {
            trace!("No hand");
            return Ok(FrameOutcome::idle());
        };

        let mode = classify(hand.fingers());
        trace!("Frame fingers={} mode={}", hand.fingers(), mode);

        let result = match mode {
            Mode::Idle => Ok(FrameOutcome::idle()),
            Mode::Move => self.handle_move(hand, sink),
            Mode::Click => self.handle_click(hand, sink),
        };

        match result {
            Err(e) if recovery_action(&e) == RecoveryAction::SkipFrame => {
                warn!("Skipping {} frame: {}", mode, e);
                Ok(FrameOutcome::skipped())
            }
            other => other,
        }
    }

    fn handle_move<S>(&mut self, hand: &HandFrame, sink: &mut S) -> Result<FrameOutcome>
    where
        S: PointerSink + ?Sized,
    {
        let tip = required_landmark(hand, INDEX_TIP)?;

        let mapped = self.mapper.map(tip);
        if !mapped.is_finite() {
            return Err(ControlError::NonFiniteMapping(tip.x, tip.y));
        }
        let smoothed = self.smoother.smooth(mapped);
        let cursor = self.output_point(smoothed);

        sink.move_to(cursor.x, cursor.y)?;
        trace!("Move: tip={} mapped={} cursor={}", tip, mapped, cursor);

        Ok(FrameOutcome {
            mode: Mode::Move,
            cursor: Some(cursor),
            ..FrameOutcome::idle()
        })
    }

    fn handle_click<S>(&mut self, hand: &HandFrame, sink: &mut S) -> Result<FrameOutcome>
    where
        S: PointerSink + ?Sized,
    {
        let index = required_landmark(hand, INDEX_TIP)?;
        let middle = required_landmark(hand, MIDDLE_TIP)?;
        let distance = index.distance_to(&middle);

        let click = self.debouncer.evaluate(distance);
        if click.is_some() {
            sink.click()?;
            debug!("Click at pinch distance {:.1}", distance);
        }

        Ok(FrameOutcome {
            mode: Mode::Click,
            pinch_distance: Some(distance),
            click,
            ..FrameOutcome::idle()
        })
    }

    fn output_point(&self, smoothed: Point) -> Point {
        if self.settings.mirror_x {
            Point::new(self.mapper.screen().width - smoothed.x, smoothed.y)
        } else {
            smoothed
        }
    }

    /// Start a new session: forget the smoothed position and any held pinch
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.debouncer.reset();
        debug!("Gesture controller reset");
    }

    /// Session settings
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Coordinate mapper
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Motion smoother
    pub fn smoother(&self) -> &MotionSmoother {
        &self.smoother
    }

    /// Click debouncer
    pub fn debouncer(&self) -> &ClickDebouncer {
        &self.debouncer
    }
}

fn required_landmark(hand: &HandFrame, id: usize) -> Result<Point> {
    let point = hand.landmark(id).ok_or(ControlError::MissingLandmark(id))?;
    if !point.is_finite() {
        return Err(ControlError::NonFiniteLandmark(point.x, point.y));
    }
    Ok(point)
}
