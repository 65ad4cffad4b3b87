//! Control Engine Error Types
//!
//! Error handling for the gesture-to-pointer control engine.

use thiserror::Error;

use crate::sink::SinkError;
use crate::source::SourceError;

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;

/// Control engine error types
#[derive(Error, Debug)]
pub enum ControlError {
    /// Active region has zero or negative extent
    #[error("Degenerate active region: {0}")]
    DegenerateRegion(String),

    /// Active region reaches outside the camera frame
    #[error("Active region {region} does not fit inside camera frame {frame_width}x{frame_height}")]
    RegionOutsideFrame {
        /// Region description
        region: String,
        /// Camera frame width
        frame_width: f64,
        /// Camera frame height
        frame_height: f64,
    },

    /// Negative margin
    #[error("Invalid margin: {0} (must be >= 0)")]
    InvalidMargin(f64),

    /// Smoothing factor must be greater than one
    #[error("Invalid smoothing factor: {0} (must be > 1)")]
    InvalidSmoothingFactor(f64),

    /// Click threshold must not be negative
    #[error("Invalid click threshold: {0} (must be >= 0)")]
    InvalidClickThreshold(f64),

    /// Screen dimensions must be positive
    #[error("Invalid screen size: {0}x{1}")]
    InvalidScreenSize(f64, f64),

    /// Landmark required by the current mode is missing from the frame
    #[error("Landmark {0} missing from frame")]
    MissingLandmark(usize),

    /// Landmark coordinate is NaN or infinite
    #[error("Non-finite landmark coordinate: ({0}, {1})")]
    NonFiniteLandmark(f64, f64),

    /// Landmark maps to a screen position that is NaN or infinite
    #[error("Landmark ({0}, {1}) maps outside representable screen coordinates")]
    NonFiniteMapping(f64, f64),

    /// Pointer injection failed
    #[error("Pointer injection failed: {0}")]
    Sink(#[from] SinkError),

    /// Landmark source failed
    #[error("Landmark source failed: {0}")]
    Source(#[from] SourceError),
}

/// Error classification for recovery strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid configuration, rejected before any frame
    Configuration,
    /// Malformed per-frame input
    Frame,
    /// OS pointer injection
    Injection,
    /// Landmark source
    Source,
}

/// Classify error for recovery strategy selection
pub fn classify_error(error: &ControlError) -> ErrorKind {
    match error {
        ControlError::DegenerateRegion(_)
        | ControlError::RegionOutsideFrame { .. }
        | ControlError::InvalidMargin(_)
        | ControlError::InvalidSmoothingFactor(_)
        | ControlError::InvalidClickThreshold(_)
        | ControlError::InvalidScreenSize(_, _) => ErrorKind::Configuration,

        ControlError::MissingLandmark(_)
        | ControlError::NonFiniteLandmark(_, _)
        | ControlError::NonFiniteMapping(_, _) => ErrorKind::Frame,

        ControlError::Sink(_) => ErrorKind::Injection,

        ControlError::Source(_) => ErrorKind::Source,
    }
}

/// Recovery action to take after error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Drop this frame and treat it as "no hand"
    SkipFrame,

    /// End the session and propagate the error
    Fail,
}

/// Determine recovery action for error
///
/// Injection failures are never retried.
pub fn recovery_action(error: &ControlError) -> RecoveryAction {
    match classify_error(error) {
        ErrorKind::Frame => RecoveryAction::SkipFrame,
        ErrorKind::Configuration | ErrorKind::Injection | ErrorKind::Source => {
            RecoveryAction::Fail
        }
    }
}

impl ControlError {
    /// Classification shortcut
    pub fn kind(&self) -> ErrorKind {
        classify_error(self)
    }
}
