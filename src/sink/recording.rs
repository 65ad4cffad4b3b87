//! In-memory and dry-run sinks

use super::{PointerSink, Result};
use crate::gesture::Point;
use tracing::info;

/// A pointer action as delivered to a sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Absolute cursor move
    Move(Point),
    /// Primary-button click
    Click,
}

/// Sink that records every action
#[derive(Debug, Default)]
pub struct RecordingSink {
    actions: Vec<PointerAction>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions in delivery order
    pub fn actions(&self) -> &[PointerAction] {
        &self.actions
    }

    /// Recorded move targets
    pub fn moves(&self) -> Vec<Point> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                PointerAction::Move(p) => Some(*p),
                PointerAction::Click => None,
            })
            .collect()
    }

    /// Number of recorded clicks
    pub fn click_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, PointerAction::Click))
            .count()
    }

    /// Drop all recorded actions
    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

impl PointerSink for RecordingSink {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.actions.push(PointerAction::Move(Point::new(x, y)));
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        self.actions.push(PointerAction::Click);
        Ok(())
    }
}

/// Dry-run sink: logs actions instead of injecting them
#[derive(Debug, Default)]
pub struct LoggingSink {
    moves: u64,
    clicks: u64,
}

impl LoggingSink {
    /// Create a dry-run sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointerSink for LoggingSink {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.moves += 1;
        tracing::debug!("[dry-run] move #{} to ({:.1}, {:.1})", self.moves, x, y);
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        self.clicks += 1;
        info!("[dry-run] click #{}", self.clicks);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_order() {
        let mut sink = RecordingSink::new();
        sink.move_to(1.0, 2.0).unwrap();
        sink.click().unwrap();
        sink.move_to(3.0, 4.0).unwrap();

        assert_eq!(
            sink.actions(),
            &[
                PointerAction::Move(Point::new(1.0, 2.0)),
                PointerAction::Click,
                PointerAction::Move(Point::new(3.0, 4.0)),
            ]
        );
        assert_eq!(sink.moves().len(), 2);
        assert_eq!(sink.click_count(), 1);

        sink.clear();
        assert!(sink.actions().is_empty());
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let mut sink: Box<dyn PointerSink> = Box::new(LoggingSink::new());
        assert!(sink.move_to(10.0, 10.0).is_ok());
        assert!(sink.click().is_ok());
    }
}
