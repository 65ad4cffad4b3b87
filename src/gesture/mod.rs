//! Hand Gesture Model
//!
//! Per-frame hand data as produced by the external landmark detector, and the
//! classifier that turns finger posture into an interaction [`Mode`].
//!
//! | Index | Middle | Mode  |
//! |-------|--------|-------|
//! | up    | down   | Move  |
//! | up    | up     | Click |
//! | other |        | Idle  |
//!
//! No hand in the frame is always [`Mode::Idle`].

pub mod classifier;
pub mod landmarks;

pub use classifier::{classify, classify_frame, Mode};
pub use landmarks::{Digit, FingerState, HandFrame, Landmark, Point, INDEX_TIP, MIDDLE_TIP};
