//! Landmark Sources
//!
//! The boundary where hand observations enter the control engine. The
//! landmark detector runs outside this crate; a source hands over one
//! observation per processed camera frame.
//!
//! - [`NdjsonSource`] reads detector output as newline-delimited JSON
//! - [`ReplaySource`] replays observations held in memory
//! - [`LatestFrameStage`] moves any source onto its own thread behind a
//!   single-slot queue that keeps only the newest frame

mod ndjson;
mod stage;

pub use ndjson::{open_source, NdjsonSource};
pub use stage::LatestFrameStage;

use std::collections::VecDeque;
use thiserror::Error;

use crate::gesture::HandFrame;

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Landmark source error types
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading the underlying stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Capture stage stopped without ending the stream
    #[error("Capture stage disconnected")]
    Disconnected,
}

/// One processed camera frame
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// A hand was detected
    Hand(HandFrame),
    /// No hand in this frame
    NoHand,
    /// Unreadable frame data; handled as no hand
    Malformed,
}

impl Observation {
    /// The detected hand, if any
    pub fn hand(&self) -> Option<&HandFrame> {
        match self {
            Observation::Hand(h) => Some(h),
            Observation::NoHand | Observation::Malformed => None,
        }
    }

    /// Whether the frame data could not be read
    pub fn is_malformed(&self) -> bool {
        matches!(self, Observation::Malformed)
    }
}

impl From<Option<HandFrame>> for Observation {
    fn from(hand: Option<HandFrame>) -> Self {
        hand.map_or(Observation::NoHand, Observation::Hand)
    }
}

/// Producer of per-frame hand observations
pub trait LandmarkSource {
    /// Next observation; `Ok(None)` once the stream has ended.
    ///
    /// Blocks until the next frame is available.
    fn next_frame(&mut self) -> Result<Option<Observation>>;

    /// Frames discarded before delivery
    fn dropped_frames(&self) -> u64 {
        0
    }
}

impl<S: LandmarkSource + ?Sized> LandmarkSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<Observation>> {
        (**self).next_frame()
    }

    fn dropped_frames(&self) -> u64 {
        (**self).dropped_frames()
    }
}

/// Source replaying a fixed list of observations
#[derive(Debug, Default, Clone)]
pub struct ReplaySource {
    frames: VecDeque<Observation>,
}

impl ReplaySource {
    /// Create a replay of `frames`
    pub fn new(frames: impl IntoIterator<Item = Observation>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames not yet delivered
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<Observation>> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_source_order() {
        let hand = HandFrame::new([false, true, false, false, false]);
        let mut source = ReplaySource::new(vec![
            Observation::NoHand,
            Observation::Hand(hand.clone()),
        ]);

        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_frame().unwrap(), Some(Observation::NoHand));
        assert_eq!(source.next_frame().unwrap(), Some(Observation::Hand(hand)));
        assert_eq!(source.next_frame().unwrap(), None);
    }

    #[test]
    fn test_observation_from_option() {
        assert_eq!(Observation::from(None), Observation::NoHand);
        let hand = HandFrame::new([true; 5]);
        assert_eq!(Observation::from(Some(hand.clone())).hand(), Some(&hand));
    }
}
