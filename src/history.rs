//! Bounded undo/redo of series coordinates.
//!
//! Each entry is a full snapshot of one series' coordinates. Both stacks are
//! fixed-capacity deques: pushing onto a full stack evicts its oldest entry.

use crate::geometry::DataPoint;
use crate::series::SeriesId;
use std::collections::VecDeque;

/// Default number of undo steps kept.
pub const DEFAULT_DEPTH: usize = 50;

/// A snapshot of one series' coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Series the snapshot belongs to.
    pub series_id: SeriesId,
    /// Coordinates at the time of the snapshot.
    pub coordinates: Vec<DataPoint>,
}

/// Undo and redo stacks.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl EditHistory {
    /// Create a history keeping at most `capacity` entries per stack.
    /// A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum entries per stack.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record the state of a series before a new edit. Clears redo.
    pub fn record_snapshot(&mut self, series_id: SeriesId, coordinates: Vec<DataPoint>) {
        push_bounded(
            &mut self.undo_stack,
            self.capacity,
            HistoryEntry {
                series_id,
                coordinates,
            },
        );
        self.redo_stack.clear();
        tracing::debug!(
            "Recorded snapshot for series {} ({} undo steps)",
            series_id,
            self.undo_stack.len()
        );
    }

    /// Step back.
    ///
    /// Pops the newest undo entry and pushes the present coordinates of its
    /// series (looked up through `current`) onto redo. The caller applies the
    /// returned entry. If the series no longer exists the entry is dropped.
    pub fn undo<F>(&mut self, current: F) -> Option<HistoryEntry>
    where
        F: FnOnce(SeriesId) -> Option<Vec<DataPoint>>,
    {
        step(
            &mut self.undo_stack,
            &mut self.redo_stack,
            self.capacity,
            current,
        )
    }

    /// Step forward. Mirror image of [`EditHistory::undo`].
    pub fn redo<F>(&mut self, current: F) -> Option<HistoryEntry>
    where
        F: FnOnce(SeriesId) -> Option<Vec<DataPoint>>,
    {
        step(
            &mut self.redo_stack,
            &mut self.undo_stack,
            self.capacity,
            current,
        )
    }

    /// Forget every entry for one series.
    pub fn purge(&mut self, series_id: SeriesId) {
        self.undo_stack.retain(|e| e.series_id != series_id);
        self.redo_stack.retain(|e| e.series_id != series_id);
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Whether undo would do something.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo would do something.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo steps.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

fn push_bounded(stack: &mut VecDeque<HistoryEntry>, capacity: usize, entry: HistoryEntry) {
    if stack.len() == capacity {
        stack.pop_front();
    }
    stack.push_back(entry);
}

fn step<F>(
    from: &mut VecDeque<HistoryEntry>,
    to: &mut VecDeque<HistoryEntry>,
    capacity: usize,
    current: F,
) -> Option<HistoryEntry>
where
    F: FnOnce(SeriesId) -> Option<Vec<DataPoint>>,
{
    let entry = from.pop_back()?;
    let coordinates = current(entry.series_id)?;
    push_bounded(
        to,
        capacity,
        HistoryEntry {
            series_id: entry.series_id,
            coordinates,
        },
    );
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(ys: &[f64]) -> Vec<DataPoint> {
        ys.iter()
            .enumerate()
            .map(|(i, &y)| DataPoint::new(i as f64, y))
            .collect()
    }

    const S: SeriesId = SeriesId(1);

    #[test]
    fn undo_on_empty_is_none() {
        let mut history = EditHistory::default();
        assert!(history.undo(|_| Some(pts(&[1.0]))).is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_pushes_current_state_to_redo() {
        let mut history = EditHistory::default();
        history.record_snapshot(S, pts(&[1.0]));

        let entry = history.undo(|_| Some(pts(&[2.0]))).expect("entry");
        assert_eq!(entry.coordinates, pts(&[1.0]));
        assert_eq!(history.redo_len(), 1);

        let entry = history.redo(|_| Some(pts(&[1.0]))).expect("entry");
        assert_eq!(entry.coordinates, pts(&[2.0]));
        assert_eq!(history.undo_len(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn new_snapshot_clears_redo() {
        let mut history = EditHistory::default();
        history.record_snapshot(S, pts(&[1.0]));
        history.undo(|_| Some(pts(&[2.0])));
        assert!(history.can_redo());

        history.record_snapshot(S, pts(&[1.0]));
        assert!(!history.can_redo());
    }

    #[test]
    fn zero_capacity_keeps_one_step() {
        let mut history = EditHistory::new(0);
        assert_eq!(history.capacity(), 1);
        history.record_snapshot(S, pts(&[1.0]));
        history.record_snapshot(S, pts(&[2.0]));
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn capacity_keeps_most_recent() {
        let mut history = EditHistory::new(50);
        for i in 0..60 {
            history.record_snapshot(S, pts(&[i as f64]));
        }
        assert_eq!(history.undo_len(), 50);

        let mut seen = Vec::new();
        while let Some(entry) = history.undo(|_| Some(pts(&[-1.0]))) {
            seen.push(entry.coordinates[0].y);
        }
        let expected: Vec<f64> = (10..60).rev().map(|i| i as f64).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn redo_stack_is_bounded_too() {
        let mut history = EditHistory::new(3);
        for i in 0..3 {
            history.record_snapshot(S, pts(&[i as f64]));
        }
        while history.undo(|_| Some(pts(&[9.0]))).is_some() {}
        assert_eq!(history.redo_len(), 3);
    }

    #[test]
    fn missing_series_drops_entry() {
        let mut history = EditHistory::default();
        history.record_snapshot(S, pts(&[1.0]));
        assert!(history.undo(|_| None).is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn purge_removes_only_that_series() {
        let mut history = EditHistory::default();
        history.record_snapshot(S, pts(&[1.0]));
        history.record_snapshot(SeriesId(2), pts(&[2.0]));
        history.purge(S);
        assert_eq!(history.undo_len(), 1);

        let entry = history.undo(|_| Some(Vec::new())).expect("entry");
        assert_eq!(entry.series_id, SeriesId(2));
    }
}
