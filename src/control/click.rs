//! Click Debouncing
//!
//! Turns the per-frame pinch distance (index tip to middle tip) into discrete
//! click events. A click fires once when the distance drops below the
//! threshold and cannot fire again until the fingers separate to at least the
//! threshold.
//!
//! ```text
//!              distance < threshold  (emit click)
//! Disengaged ─────────────────────────────────────> Engaged
//!     ^                                               │
//!     └───────────────────────────────────────────────┘
//!              distance >= threshold (no event)
//! ```
//!
//! The threshold is in camera pixels, so its sensitivity depends on the
//! camera resolution and on how far the hand is from the camera.

use crate::control::error::{ControlError, Result};
use tracing::debug;

/// Default pinch threshold (camera pixels)
pub const DEFAULT_CLICK_THRESHOLD: f64 = 40.0;

/// Debouncer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickPhase {
    /// Fingers apart; the next falling edge clicks
    #[default]
    Disengaged,
    /// Click already fired for the current pinch
    Engaged,
}

/// Cross-frame debouncer state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClickState {
    phase: ClickPhase,
    last_distance: Option<f64>,
}

impl ClickState {
    /// Current phase
    pub fn phase(&self) -> ClickPhase {
        self.phase
    }

    /// True while a pinch is held after its click
    pub fn is_engaged(&self) -> bool {
        self.phase == ClickPhase::Engaged
    }

    /// Last evaluated distance
    pub fn last_distance(&self) -> Option<f64> {
        self.last_distance
    }

    /// Back to the initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A discrete click produced by a falling edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Pinch distance that triggered the click
    pub distance: f64,
    /// Distance on the previous evaluation, if any
    pub previous_distance: Option<f64>,
}

/// One debouncer step; updates `state` in place
pub fn evaluate(distance: f64, threshold: f64, state: &mut ClickState) -> Option<ClickEvent> {
    let previous_distance = state.last_distance;
    state.last_distance = Some(distance);

    let below = distance < threshold;
    match (state.phase, below) {
        (ClickPhase::Disengaged, true) => {
            state.phase = ClickPhase::Engaged;
            Some(ClickEvent {
                distance,
                previous_distance,
            })
        }
        (ClickPhase::Engaged, false) => {
            state.phase = ClickPhase::Disengaged;
            None
        }
        _ => None,
    }
}

/// Click debouncer owning its state for one session
#[derive(Debug, Clone)]
pub struct ClickDebouncer {
    threshold: f64,
    state: ClickState,
}

impl ClickDebouncer {
    /// Create a new debouncer; `threshold` must not be negative
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ControlError::InvalidClickThreshold(threshold));
        }

        Ok(Self {
            threshold,
            state: ClickState::default(),
        })
    }

    /// Evaluate this frame's pinch distance
    pub fn evaluate(&mut self, distance: f64) -> Option<ClickEvent> {
        let was = self.state.phase;
        let event = evaluate(distance, self.threshold, &mut self.state);

        if was != self.state.phase {
            debug!(
                "Click debouncer: {:?} -> {:?} (distance {:.1}, threshold {:.1})",
                was, self.state.phase, distance, self.threshold
            );
        }
        event
    }

    /// Current state
    pub fn state(&self) -> &ClickState {
        &self.state
    }

    /// Pinch threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Reset debouncer state
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(distances: &[f64], threshold: f64) -> Vec<usize> {
        let mut debouncer = ClickDebouncer::new(threshold).unwrap();
        distances
            .iter()
            .enumerate()
            .filter_map(|(i, d)| debouncer.evaluate(*d).map(|_| i))
            .collect()
    }

    #[test]
    fn test_single_click_on_falling_edge() {
        assert_eq!(run(&[50.0, 50.0, 30.0, 30.0, 50.0], 40.0), vec![2]);
    }

    #[test]
    fn test_never_below_threshold() {
        assert!(run(&[50.0, 45.0, 40.0, 41.0, 100.0], 40.0).is_empty());
    }

    #[test]
    fn test_already_below_on_first_sample() {
        assert_eq!(run(&[30.0, 30.0, 30.0], 40.0), vec![0]);
    }

    #[test]
    fn test_release_and_pinch_again() {
        assert_eq!(run(&[30.0, 50.0, 30.0, 39.9, 40.0, 10.0], 40.0), vec![0, 2, 5]);
    }

    #[test]
    fn test_threshold_boundary_counts_as_above() {
        // Exactly at the threshold releases but never clicks
        assert_eq!(run(&[40.0, 39.0, 40.0, 40.0], 40.0), vec![1]);
    }

    #[test]
    fn test_zero_threshold_never_clicks() {
        assert!(run(&[0.0, 0.0, 5.0], 0.0).is_empty());
    }

    #[test]
    fn test_state_tracking() {
        let mut debouncer = ClickDebouncer::new(40.0).unwrap();
        assert_eq!(debouncer.state().phase(), ClickPhase::Disengaged);

        let event = debouncer.evaluate(60.0);
        assert!(event.is_none());

        let event = debouncer.evaluate(35.0).unwrap();
        assert_eq!(event.distance, 35.0);
        assert_eq!(event.previous_distance, Some(60.0));
        assert!(debouncer.state().is_engaged());
        assert_eq!(debouncer.state().last_distance(), Some(35.0));

        debouncer.reset();
        assert_eq!(debouncer.state(), &ClickState::default());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        assert!(ClickDebouncer::new(-1.0).is_err());
        assert!(ClickDebouncer::new(f64::INFINITY).is_err());
        assert!(ClickDebouncer::new(0.0).is_ok());
    }
}
