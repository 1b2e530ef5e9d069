//! Per-round output for external consumers (renderers, recorders).

use selfstab_types::Color;
use serde::{Deserialize, Serialize};

/// Colors of every node after one round.
///
/// Colors use the integer encoding, so placeholders show up as `-1` and
/// `0`. This is everything a renderer needs; nothing flows back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Rounds executed when captured; 0 is the initial state.
    pub round: u64,
    /// Color of node `i` at position `i`.
    pub colors: Vec<i64>,
}

impl RoundSnapshot {
    /// Capture the given colors.
    pub fn new(round: u64, colors: &[Color]) -> Self {
        Self {
            round,
            colors: colors.iter().map(|c| c.raw()).collect(),
        }
    }
}

/// Receives a snapshot after every round.
pub trait SnapshotSink {
    /// Called once per executed round, in round order.
    fn on_round(&mut self, snapshot: &RoundSnapshot);
}

impl<F> SnapshotSink for F
where
    F: FnMut(&RoundSnapshot),
{
    fn on_round(&mut self, snapshot: &RoundSnapshot) {
        self(snapshot)
    }
}

/// Discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn on_round(&mut self, _snapshot: &RoundSnapshot) {}
}

/// Keeps every snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    snapshots: Vec<RoundSnapshot>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far.
    pub fn snapshots(&self) -> &[RoundSnapshot] {
        &self.snapshots
    }

    /// Consume the recorder, returning its snapshots.
    pub fn into_snapshots(self) -> Vec<RoundSnapshot> {
        self.snapshots
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<&RoundSnapshot> {
        self.snapshots.last()
    }
}

impl SnapshotSink for RecordingSink {
    fn on_round(&mut self, snapshot: &RoundSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selfstab_types::Placeholder;

    #[test]
    fn test_snapshot_uses_raw_encoding() {
        let colors = [
            Color::Assigned(2),
            Color::Transitional(Placeholder::First),
            Color::Transitional(Placeholder::Second),
        ];
        let snapshot = RoundSnapshot::new(3, &colors);

        assert_eq!(snapshot.round, 3);
        assert_eq!(snapshot.colors, vec![2, -1, 0]);
    }

    #[test]
    fn test_closure_sink() {
        let mut rounds = Vec::new();
        {
            let mut sink = |s: &RoundSnapshot| rounds.push(s.round);
            sink.on_round(&RoundSnapshot::new(1, &[]));
            sink.on_round(&RoundSnapshot::new(2, &[]));
        }
        assert_eq!(rounds, vec![1, 2]);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingSink::new();
        sink.on_round(&RoundSnapshot::new(1, &[Color::Assigned(1)]));

        assert_eq!(sink.snapshots().len(), 1);
        assert_eq!(sink.last().map(|s| s.round), Some(1));
    }
}
