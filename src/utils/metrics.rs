//! Session Metrics
//!
//! Frame-rate measurement and per-session counters for the control loop:
//! - Frames processed, with and without a hand
//! - Frames per mode, skipped frames, delivered moves and clicks
//! - Per-frame processing time distribution
//!
//! Snapshots serialize to JSON for the end-of-session summary.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::control::FrameOutcome;
use crate::gesture::Mode;

/// Samples kept for the processing-time distribution
const TIMING_WINDOW: usize = 1024;

/// Frame-rate meter over frame timestamps
#[derive(Debug, Clone)]
pub struct FrameRateMeter {
    last: Option<Instant>,
    current_fps: f64,
    average_fps: f64,
    alpha: f64,
}

impl FrameRateMeter {
    /// Create a meter; `alpha` weights the newest sample in the average (0-1)
    pub fn new(alpha: f64) -> Self {
        Self {
            last: None,
            current_fps: 0.0,
            average_fps: 0.0,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Record a frame at `now`
    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last {
            let dt = now.duration_since(last).as_secs_f64();
            if dt > 0.0 {
                self.current_fps = 1.0 / dt;
                self.average_fps = if self.average_fps == 0.0 {
                    self.current_fps
                } else {
                    self.alpha * self.current_fps + (1.0 - self.alpha) * self.average_fps
                };
            }
        }
        self.last = Some(now);
    }

    /// Rate from the last two frames
    pub fn current_fps(&self) -> f64 {
        self.current_fps
    }

    /// Exponentially averaged rate
    pub fn average_fps(&self) -> f64 {
        self.average_fps
    }
}

impl Default for FrameRateMeter {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Histogram over a sliding window of values
#[derive(Debug, Clone)]
pub struct Histogram {
    values: VecDeque<f64>,
    capacity: usize,
}

impl Histogram {
    fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn record(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    fn stats(&self) -> HistogramStats {
        if self.values.is_empty() {
            return HistogramStats::default();
        }

        let count = self.values.len();
        let sum: f64 = self.values.iter().sum();
        let mean = sum / count as f64;

        let mut sorted: Vec<f64> = self.values.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        HistogramStats {
            count: count as u64,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            p50: percentile(&sorted, 0.50),
            p95: percentile(&sorted, 0.95),
            p99: percentile(&sorted, 0.99),
        }
    }
}

/// Inclusive percentile: p=0 is the first element, p=1 the last
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let index = ((sorted_values.len() - 1) as f64 * p) as usize;
    sorted_values[index.min(sorted_values.len() - 1)]
}

/// Histogram statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistogramStats {
    /// Number of observations in the window
    pub count: u64,
    /// Minimum
    pub min: f64,
    /// Maximum
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub p50: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
}

/// Counters for one control session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Frames handed to the controller
    pub frames: u64,
    /// Frames with a detected hand
    pub hand_frames: u64,
    /// Frames handled as idle (including no hand)
    pub idle_frames: u64,
    /// Frames handled in move mode
    pub move_frames: u64,
    /// Frames handled in click mode
    pub click_frames: u64,
    /// Malformed frames treated as no hand
    pub skipped_frames: u64,
    /// Frames discarded by the capture stage before processing
    pub dropped_frames: u64,
    /// Cursor moves delivered
    pub moves: u64,
    /// Clicks delivered
    pub clicks: u64,
    /// Averaged frame rate at snapshot time
    pub average_fps: f64,
    /// Per-frame processing time (microseconds)
    pub processing_us: HistogramStats,
    /// Session duration
    pub elapsed: Duration,
}

/// Collector feeding [`SessionStats`]
#[derive(Debug, Clone)]
pub struct SessionMetrics {
    stats: SessionStats,
    fps: FrameRateMeter,
    processing: Histogram,
    start_time: Instant,
}

impl SessionMetrics {
    /// Start collecting
    pub fn new() -> Self {
        Self {
            stats: SessionStats::default(),
            fps: FrameRateMeter::default(),
            processing: Histogram::new(TIMING_WINDOW),
            start_time: Instant::now(),
        }
    }

    /// Record one processed frame
    pub fn record(&mut self, had_hand: bool, outcome: &FrameOutcome, processing: Duration) {
        self.fps.tick(Instant::now());
        self.processing.record(processing.as_secs_f64() * 1_000_000.0);

        self.stats.frames += 1;
        if had_hand {
            self.stats.hand_frames += 1;
        }
        if outcome.skipped {
            self.stats.skipped_frames += 1;
        }
        match outcome.mode {
            Mode::Idle => self.stats.idle_frames += 1,
            Mode::Move => self.stats.move_frames += 1,
            Mode::Click => self.stats.click_frames += 1,
        }
        if outcome.cursor.is_some() {
            self.stats.moves += 1;
        }
        if outcome.click.is_some() {
            self.stats.clicks += 1;
        }
    }

    /// Set the capture stage's dropped-frame count
    pub fn set_dropped_frames(&mut self, dropped: u64) {
        self.stats.dropped_frames = dropped;
    }

    /// Frames recorded so far
    pub fn frames(&self) -> u64 {
        self.stats.frames
    }

    /// Frame-rate meter
    pub fn fps(&self) -> &FrameRateMeter {
        &self.fps
    }

    /// Current snapshot
    pub fn snapshot(&self) -> SessionStats {
        SessionStats {
            average_fps: self.fps.average_fps(),
            processing_us: self.processing.stats(),
            elapsed: self.start_time.elapsed(),
            ..self.stats.clone()
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
