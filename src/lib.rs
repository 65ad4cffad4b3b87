//! # gesture-pointer
//!
//! Hand-gesture pointer control: turns per-frame hand landmarks from an
//! external detector into cursor moves and clicks.
//!
//! This crate covers the control side only:
//! - [`gesture`] - landmarks, finger states, and mode classification
//! - [`control`] - coordinate mapping, smoothing, click debouncing, and the
//!   per-frame controller
//! - [`sink`] - where pointer actions go (OS input, log, memory)
//! - [`source`] - where landmark frames come from (NDJSON stream, replay)
//! - [`session`] - the frame loop tying a source to a sink
//!
//! # Architecture
//!
//! ```text
//! gesture-pointer
//!   ├─> LandmarkSource (NDJSON from the hand detector, optional latest-frame stage)
//!   ├─> GestureController
//!   │     ├─> classify (finger states -> Idle / Move / Click)
//!   │     ├─> CoordinateMapper -> MotionSmoother -> mirror (Move)
//!   │     └─> ClickDebouncer (Click)
//!   └─> PointerSink (enigo, dry-run logger, recorder)
//! ```
//!
//! # Data Flow
//!
//! **Move Path:** Detector → Source → Mapper → Smoother → Sink.move_to
//!
//! **Click Path:** Detector → Source → pinch distance → Debouncer → Sink.click

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Configuration loading and CLI overrides
pub mod config;

/// Control engine: mapping, smoothing, click debouncing, controller
pub mod control;

/// Hand landmarks and gesture classification
pub mod gesture;

/// Frame loop driving a controller from a source into a sink
pub mod session;

/// Pointer action sinks
pub mod sink;

/// Landmark frame sources
pub mod source;

/// Diagnostics, metrics, and error formatting
pub mod utils;
