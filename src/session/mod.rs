//! Control Session
//!
//! Drives a [`GestureController`] from a [`LandmarkSource`] into a
//! [`PointerSink`] until the source ends, collecting [`SessionStats`].
//!
//! ```text
//!  LandmarkSource ──next_frame──> GestureController ──move_to/click──> PointerSink
//!                                        │
//!                                        └──FrameOutcome──> SessionMetrics
//! ```
//!
//! Frames are handled strictly one at a time. The session ends cleanly when
//! the source reports end of stream; a source or sink error ends it with
//! that error.

use std::time::Instant;
use tracing::{debug, info};

use crate::control::{GestureController, Result};
use crate::sink::PointerSink;
use crate::source::LandmarkSource;
use crate::utils::{format_duration, SessionMetrics, SessionStats};

/// Frames between periodic stats lines
pub const DEFAULT_STATS_INTERVAL: u64 = 300;

/// Session runtime options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Log a stats line every this many frames; 0 disables
    pub stats_interval_frames: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            stats_interval_frames: DEFAULT_STATS_INTERVAL,
        }
    }
}

/// Run a session with default options
///
/// See [`run_session_with`].
pub fn run_session<Src, Snk>(
    source: &mut Src,
    sink: &mut Snk,
    controller: &mut GestureController,
) -> Result<SessionStats>
where
    Src: LandmarkSource + ?Sized,
    Snk: PointerSink + ?Sized,
{
    run_session_with(source, sink, controller, SessionOptions::default())
}

/// Process frames from `source` until it ends
///
/// Returns the session's stats on clean end of stream. Source and sink
/// errors abort the session; the sink is never retried.
pub fn run_session_with<Src, Snk>(
    source: &mut Src,
    sink: &mut Snk,
    controller: &mut GestureController,
    options: SessionOptions,
) -> Result<SessionStats>
where
    Src: LandmarkSource + ?Sized,
    Snk: PointerSink + ?Sized,
{
    let mut metrics = SessionMetrics::new();
    info!("Control session started");

    while let Some(observation) = source.next_frame()? {
        let started = Instant::now();
        let hand = observation.hand();
        let mut outcome = controller.process_frame(hand, sink)?;
        outcome.skipped |= observation.is_malformed();
        metrics.record(hand.is_some(), &outcome, started.elapsed());

        let frames = metrics.frames();
        if options.stats_interval_frames > 0 && frames % options.stats_interval_frames == 0 {
            metrics.set_dropped_frames(source.dropped_frames());
            log_progress(&metrics.snapshot());
        }
    }

    metrics.set_dropped_frames(source.dropped_frames());
    let stats = metrics.snapshot();
    info!(
        "Control session ended after {} ({} frames, {} moves, {} clicks)",
        format_duration(stats.elapsed),
        stats.frames,
        stats.moves,
        stats.clicks
    );
    debug!("Session stats: {:?}", stats);

    Ok(stats)
}

fn log_progress(stats: &SessionStats) {
    info!(
        "{:.1} fps | frames={} hand={} idle={} move={} click={} skipped={} dropped={} | moves={} clicks={} | p95 {:.0}us",
        stats.average_fps,
        stats.frames,
        stats.hand_frames,
        stats.idle_frames,
        stats.move_frames,
        stats.click_frames,
        stats.skipped_frames,
        stats.dropped_frames,
        stats.moves,
        stats.clicks,
        stats.processing_us.p95
    );
}
