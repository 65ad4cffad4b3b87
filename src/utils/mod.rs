//! Utilities
//!
//! Startup diagnostics, session metrics, and user-friendly error formatting.
//!
//! - [`diagnostics`]: host and display-session information logged at startup
//! - [`metrics`]: frame-rate meter and per-session counters
//! - [`errors`]: troubleshooting-oriented rendering of top-level failures
//!
//! ```rust
//! use gesture_pointer::utils::{DisplayServer, FrameRateMeter};
//! use std::time::{Duration, Instant};
//!
//! let mut meter = FrameRateMeter::default();
//! let start = Instant::now();
//! meter.tick(start);
//! meter.tick(start + Duration::from_millis(40));
//! assert!((meter.current_fps() - 25.0).abs() < 1e-6);
//!
//! println!("Running on: {}", DisplayServer::detect());
//! ```

pub mod diagnostics;
pub mod errors;
pub mod metrics;

pub use diagnostics::{format_duration, log_startup_diagnostics, DisplayServer, SystemInfo};
pub use errors::format_user_error;
pub use metrics::{FrameRateMeter, HistogramStats, SessionMetrics, SessionStats};
