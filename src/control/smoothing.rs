//! Motion Smoothing
//!
//! Exponential smoothing of the mapped cursor position to damp detector
//! jitter. Each frame moves a fixed fraction of the remaining distance:
//!
//! ```text
//! smoothed = prior + (target - prior) / factor
//! ```
//!
//! A larger factor damps more and lags more. The first sample of a session has
//! no prior and passes through unchanged.

use crate::control::error::{ControlError, Result};
use crate::gesture::Point;
use tracing::trace;

/// Default smoothing factor
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 7.0;

/// Cross-frame smoother state: the last smoothed screen position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmootherState {
    last: Option<Point>,
}

impl SmootherState {
    /// Last smoothed position, `None` before the first sample
    pub fn last(&self) -> Option<Point> {
        self.last
    }

    /// Forget the prior position
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// One smoothing step; updates `state` in place
pub fn smooth(target: Point, state: &mut SmootherState, factor: f64) -> Point {
    let smoothed = match state.last {
        None => target,
        Some(prior) => Point::new(
            prior.x + (target.x - prior.x) / factor,
            prior.y + (target.y - prior.y) / factor,
        ),
    };
    state.last = Some(smoothed);
    smoothed
}

/// Motion smoother owning its state for one session
#[derive(Debug, Clone)]
pub struct MotionSmoother {
    factor: f64,
    state: SmootherState,
}

impl MotionSmoother {
    /// Create a new smoother; `factor` must be greater than 1
    pub fn new(factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor <= 1.0 {
            return Err(ControlError::InvalidSmoothingFactor(factor));
        }

        Ok(Self {
            factor,
            state: SmootherState::default(),
        })
    }

    /// Smooth the next target position
    pub fn smooth(&mut self, target: Point) -> Point {
        let prior = self.state.last;
        let smoothed = smooth(target, &mut self.state, self.factor);

        trace!(
            "Smooth: target={}, prior={:?}, smoothed={}",
            target,
            prior,
            smoothed
        );
        smoothed
    }

    /// Current state
    pub fn state(&self) -> &SmootherState {
        &self.state
    }

    /// Smoothing factor
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Reset smoother state
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_sample_passes_through() {
        let mut smoother = MotionSmoother::new(DEFAULT_SMOOTHING_FACTOR).unwrap();
        let target = Point::new(1234.5, 678.9);

        assert_eq!(smoother.smooth(target), target);
        assert_eq!(smoother.state().last(), Some(target));
    }

    #[test]
    fn test_step_formula() {
        let mut smoother = MotionSmoother::new(7.0).unwrap();
        smoother.smooth(Point::new(0.0, 0.0));

        let next = smoother.smooth(Point::new(700.0, 70.0));
        assert_eq!(next, Point::new(100.0, 10.0));

        let next = smoother.smooth(Point::new(700.0, 70.0));
        assert_eq!(next, Point::new(100.0 + 600.0 / 7.0, 10.0 + 60.0 / 7.0));
    }

    #[test]
    fn test_reset_forgets_prior() {
        let mut smoother = MotionSmoother::new(4.0).unwrap();
        smoother.smooth(Point::new(0.0, 0.0));
        smoother.reset();

        assert_eq!(smoother.state().last(), None);
        assert_eq!(smoother.smooth(Point::new(50.0, 50.0)), Point::new(50.0, 50.0));
    }

    #[test]
    fn test_invalid_factor_rejected() {
        assert!(MotionSmoother::new(1.0).is_err());
        assert!(MotionSmoother::new(0.5).is_err());
        assert!(MotionSmoother::new(-7.0).is_err());
        assert!(MotionSmoother::new(f64::NAN).is_err());
        assert!(MotionSmoother::new(1.0001).is_ok());
    }

    proptest! {
        #[test]
        fn converges_monotonically_without_overshoot(
            start_x in -3000.0f64..3000.0,
            start_y in -3000.0f64..3000.0,
            target_x in -3000.0f64..3000.0,
            target_y in -3000.0f64..3000.0,
            factor in 1.5f64..20.0,
        ) {
            let start = Point::new(start_x, start_y);
            let target = Point::new(target_x, target_y);
            prop_assume!(start.distance_to(&target) > 1.0);

            let mut state = SmootherState::default();
            smooth(start, &mut state, factor);

            let mut last_distance = start.distance_to(&target);
            for _ in 0..10 {
                let smoothed = smooth(target, &mut state, factor);
                let distance = smoothed.distance_to(&target);
                prop_assert!(distance < last_distance);

                // Never crosses the target on either axis
                prop_assert!((smoothed.x - start_x) * (target_x - smoothed.x) >= 0.0);
                prop_assert!((smoothed.y - start_y) * (target_y - smoothed.y) >= 0.0);
                last_distance = distance;
            }
        }
    }
}
