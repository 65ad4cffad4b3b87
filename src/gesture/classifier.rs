//! Gesture classification
//!
//! Maps the finger posture of the current frame to an interaction mode.

use serde::Serialize;
use std::fmt;

use super::landmarks::{Digit, FingerState, HandFrame};

/// Interaction mode for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// No pointer action
    Idle,
    /// Index up, middle down: cursor follows the index tip
    Move,
    /// Index and middle up: pinching the two tips clicks
    Click,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Idle => "idle",
            Mode::Move => "move",
            Mode::Click => "click",
        };
        f.write_str(name)
    }
}

/// Classify a finger posture.
///
/// Depends on the current frame only. Thumb, ring and pinky are ignored.
pub fn classify(fingers: FingerState) -> Mode {
    match (fingers.is_up(Digit::Index), fingers.is_up(Digit::Middle)) {
        (true, false) => Mode::Move,
        (true, true) => Mode::Click,
        _ => Mode::Idle,
    }
}

/// Classify a frame; `None` (no hand) is always idle
pub fn classify_frame(hand: Option<&HandFrame>) -> Mode {
    hand.map_or(Mode::Idle, |h| classify(h.fingers()))
}
