//! Latest-frame capture stage
//!
//! Runs a landmark source on a dedicated thread and hands frames to the
//! control loop through a single-slot channel. When the control loop falls
//! behind, the pending frame is replaced by the newer one. Frames that do
//! reach the control loop keep their capture order.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

use super::{LandmarkSource, Observation, Result, SourceError};

enum StageMessage {
    Frame(Observation),
    Failed(SourceError),
}

/// Source adapter that reads ahead on a capture thread, keeping one frame
pub struct LatestFrameStage {
    rx: Receiver<StageMessage>,
    stop: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl LatestFrameStage {
    /// Move `source` onto a capture thread
    pub fn spawn<S>(mut source: S) -> io::Result<Self>
    where
        S: LandmarkSource + Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let stale_rx = rx.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicU64::new(0));

        let thread_stop = Arc::clone(&stop);
        let thread_dropped = Arc::clone(&dropped);

        let handle = thread::Builder::new()
            .name("landmark-capture".to_string())
            .spawn(move || {
                debug!("Capture stage started");
                while !thread_stop.load(Ordering::Relaxed) {
                    let (message, last) = match source.next_frame() {
                        Ok(Some(obs)) => (StageMessage::Frame(obs), false),
                        Ok(None) => break,
                        Err(e) => {
                            error!("Capture stage source failed: {}", e);
                            (StageMessage::Failed(e), true)
                        }
                    };

                    publish(&tx, &stale_rx, message, &thread_dropped);
                    if last {
                        break;
                    }
                }
                debug!("Capture stage finished");
            })?;

        Ok(Self {
            rx,
            stop,
            dropped,
            handle: Some(handle),
        })
    }

    /// Frames discarded because a newer one arrived first
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Put `message` in the slot, evicting a stale pending frame if needed
fn publish(
    tx: &Sender<StageMessage>,
    stale_rx: &Receiver<StageMessage>,
    mut message: StageMessage,
    dropped: &AtomicU64,
) {
    loop {
        match tx.try_send(message) {
            Ok(()) => return,
            Err(TrySendError::Full(m)) => {
                if stale_rx.try_recv().is_ok() {
                    dropped.fetch_add(1, Ordering::Relaxed);
                }
                message = m;
            }
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}

impl LandmarkSource for LatestFrameStage {
    fn next_frame(&mut self) -> Result<Option<Observation>> {
        match self.rx.recv() {
            Ok(StageMessage::Frame(obs)) => Ok(Some(obs)),
            Ok(StageMessage::Failed(e)) => Err(e),
            // Capture thread exited and the slot is drained
            Err(_) => match self.handle.take().map(JoinHandle::join) {
                Some(Err(_)) => Err(SourceError::Disconnected),
                _ => Ok(None),
            },
        }
    }

    fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Drop for LatestFrameStage {
    fn drop(&mut self) {
        // The capture thread may be blocked on a read; it exits at its next frame
        self.stop.store(true, Ordering::Relaxed);
    }
}
