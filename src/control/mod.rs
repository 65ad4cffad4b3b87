//! Gesture-to-Pointer Control Engine
//!
//! Turns per-frame hand observations into cursor moves and clicks.
//!
//! # Architecture
//!
//! ```text
//! HandFrame (or no hand)
//!       ↓
//! ┌─────────────────────────┐
//! │  GestureController      │ ← per-frame driver, owns cross-frame state
//! │  - classify mode        │
//! │  - route to pipeline    │
//! └─────────────────────────┘
//!       ↓ Move                        ↓ Click
//! ┌──────────────────┐          ┌──────────────────┐
//! │ CoordinateMapper │          │  pinch distance  │
//! │ (camera→screen)  │          │  (tip 8 ↔ tip 12)│
//! └──────────────────┘          └──────────────────┘
//!       ↓                             ↓
//! ┌──────────────────┐          ┌──────────────────┐
//! │  MotionSmoother  │          │  ClickDebouncer  │
//! └──────────────────┘          └──────────────────┘
//!       ↓                             ↓
//!  PointerSink::move_to         PointerSink::click
//! ```
//!
//! # State
//!
//! Only two pieces of state survive between frames: the smoother's last
//! position and the debouncer's phase. Both belong to one
//! [`GestureController`] and are cleared by [`GestureController::reset`].
//! Frames without a hand leave both untouched, so tracking that resumes after
//! a dropout continues from where it stopped.
//!
//! # Example
//!
//! ```rust
//! use gesture_pointer::control::{ControllerSettings, GestureController};
//! use gesture_pointer::gesture::{HandFrame, INDEX_TIP};
//! use gesture_pointer::sink::RecordingSink;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = GestureController::new(ControllerSettings::default())?;
//! let mut sink = RecordingSink::new();
//!
//! let hand = HandFrame::new([false, true, false, false, false])
//!     .with_landmark(INDEX_TIP, 320.0, 240.0);
//! let outcome = controller.process_frame(Some(&hand), &mut sink)?;
//! assert!(outcome.cursor.is_some());
//! # Ok(())
//! # }
//! ```

pub mod click;
pub mod controller;
pub mod coordinates;
pub mod error;
pub mod smoothing;

pub use click::{ClickDebouncer, ClickEvent, ClickPhase, ClickState, DEFAULT_CLICK_THRESHOLD};
pub use controller::{ControllerSettings, FrameOutcome, GestureController};
pub use coordinates::{map_point, ActiveRegion, CoordinateMapper, ScreenSize};
pub use error::{classify_error, recovery_action, ControlError, ErrorKind, RecoveryAction, Result};
pub use smoothing::{MotionSmoother, SmootherState, DEFAULT_SMOOTHING_FACTOR};
