//! Pointer Sinks
//!
//! The boundary where pointer actions leave the control engine. A sink moves
//! the OS cursor to an absolute screen position and clicks the primary button.
//! Calls are synchronous; a failure ends the session and is never retried.
//!
//! # Implementations
//!
//! | Sink | Effect |
//! |------|--------|
//! | [`EnigoSink`] | Injects real input through `enigo` (feature `os-input`) |
//! | [`LoggingSink`] | Dry run: logs every action |
//! | [`RecordingSink`] | Keeps actions in memory |

#[cfg(feature = "os-input")]
mod os;
mod recording;

#[cfg(feature = "os-input")]
pub use os::EnigoSink;
pub use recording::{LoggingSink, PointerAction, RecordingSink};

use thiserror::Error;

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;

/// Pointer sink error types
#[derive(Error, Debug)]
pub enum SinkError {
    /// Input backend could not be opened (no display, missing permission)
    #[error("Input backend unavailable: {0}")]
    Unavailable(String),

    /// The OS rejected an injected event
    #[error("Input injection rejected: {0}")]
    Injection(String),
}

/// Destination for pointer actions
#[cfg_attr(test, mockall::automock)]
pub trait PointerSink {
    /// Move the cursor to an absolute screen position
    fn move_to(&mut self, x: f64, y: f64) -> Result<()>;

    /// Click the primary button at the current cursor position
    fn click(&mut self) -> Result<()>;
}

impl<S: PointerSink + ?Sized> PointerSink for Box<S> {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        (**self).move_to(x, y)
    }

    fn click(&mut self) -> Result<()> {
        (**self).click()
    }
}
