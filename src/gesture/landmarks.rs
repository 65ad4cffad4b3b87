//! Hand landmarks and finger posture
//!
//! Per-frame data produced by the external hand-landmark detector: up to 21
//! keypoints in camera pixels plus an up/down flag for each digit.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

/// Number of keypoints in the hand-tracking convention
pub const LANDMARK_COUNT: usize = 21;

/// Wrist
pub const WRIST: usize = 0;
/// Index fingertip, drives the cursor
pub const INDEX_TIP: usize = 8;
/// Middle fingertip, pinch partner of the index tip
pub const MIDDLE_TIP: usize = 12;
/// Pinky fingertip
pub const PINKY_TIP: usize = 20;

/// Camera-space or screen-space position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl Point {
    /// Create a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Both coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// A single tracked keypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Keypoint index (0-20)
    pub id: usize,
    /// Camera-space x (pixels)
    pub x: f64,
    /// Camera-space y (pixels)
    pub y: f64,
}

impl Landmark {
    /// Create a landmark
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Camera-space position
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Digit identifiers, thumb first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Digit {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

/// Up/down classification of the five digits for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FingerState([bool; 5]);

impl FingerState {
    /// Create from thumb..pinky flags
    pub const fn new(up: [bool; 5]) -> Self {
        Self(up)
    }

    /// Build from the low five bits, bit 0 = thumb
    pub fn from_bits(bits: u8) -> Self {
        let mut up = [false; 5];
        for (i, slot) in up.iter_mut().enumerate() {
            *slot = bits & (1 << i) != 0;
        }
        Self(up)
    }

    /// Whether a digit is raised
    pub fn is_up(&self, digit: Digit) -> bool {
        self.0[digit as usize]
    }

    /// Flags in thumb..pinky order
    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }

    /// Number of raised digits
    pub fn count_up(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }
}

impl From<[bool; 5]> for FingerState {
    fn from(up: [bool; 5]) -> Self {
        Self(up)
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, up) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", u8::from(*up))?;
        }
        write!(f, "]")
    }
}

/// One detected hand: keypoints by index plus finger posture
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    points: [Option<Point>; LANDMARK_COUNT],
    fingers: FingerState,
}

impl HandFrame {
    /// Create a frame with no keypoints yet
    pub fn new(fingers: impl Into<FingerState>) -> Self {
        Self {
            points: [None; LANDMARK_COUNT],
            fingers: fingers.into(),
        }
    }

    /// Build from detector output; indices outside 0-20 are ignored
    pub fn from_landmarks<I>(landmarks: I, fingers: impl Into<FingerState>) -> Self
    where
        I: IntoIterator<Item = Landmark>,
    {
        let mut frame = Self::new(fingers);
        for lm in landmarks {
            frame.set(lm);
        }
        frame
    }

    /// Builder-style keypoint insertion
    pub fn with_landmark(mut self, id: usize, x: f64, y: f64) -> Self {
        self.set(Landmark::new(id, x, y));
        self
    }

    fn set(&mut self, lm: Landmark) {
        if let Some(slot) = self.points.get_mut(lm.id) {
            *slot = Some(lm.position());
        } else {
            tracing::trace!("Ignoring out-of-range landmark index {}", lm.id);
        }
    }

    /// Position of a keypoint, if the detector reported it
    pub fn landmark(&self, id: usize) -> Option<Point> {
        self.points.get(id).copied().flatten()
    }

    /// Finger posture for this frame
    pub fn fingers(&self) -> FingerState {
        self.fingers
    }

    /// Number of keypoints present
    pub fn landmark_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finger_state_from_bits() {
        let state = FingerState::from_bits(0b00110);
        assert_eq!(state.as_array(), [false, true, true, false, false]);
        assert!(state.is_up(Digit::Index));
        assert!(state.is_up(Digit::Middle));
        assert!(!state.is_up(Digit::Thumb));
        assert_eq!(state.count_up(), 2);
        assert_eq!(state.to_string(), "[0,1,1,0,0]");
    }

    #[test]
    fn test_hand_frame_lookup() {
        let frame = HandFrame::new([false, true, false, false, false])
            .with_landmark(INDEX_TIP, 320.0, 240.0)
            .with_landmark(MIDDLE_TIP, 330.0, 200.0);

        assert_eq!(frame.landmark(INDEX_TIP), Some(Point::new(320.0, 240.0)));
        assert_eq!(frame.landmark(WRIST), None);
        assert_eq!(frame.landmark(99), None);
        assert_eq!(frame.landmark_count(), 2);
    }

    #[test]
    fn test_out_of_range_landmark_ignored() {
        let frame = HandFrame::from_landmarks(
            vec![Landmark::new(21, 1.0, 1.0), Landmark::new(PINKY_TIP, 5.0, 6.0)],
            FingerState::default(),
        );
        assert_eq!(frame.landmark_count(), 1);
        assert_eq!(frame.landmark(PINKY_TIP), Some(Point::new(5.0, 6.0)));
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
    }
}
