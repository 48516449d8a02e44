//! Phase change history.
//!
//! Provides immutable tracking of a session's phase changes over time,
//! together with the counters at the moment of each change.

use super::phase::Phase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase change.
///
/// # Example
///
/// ```rust
/// use mazerun::core::{Phase, PhaseChange};
/// use chrono::Utc;
///
/// let change = PhaseChange {
///     from: Phase::Idle,
///     to: Phase::Playing,
///     timestamp: Utc::now(),
///     moves: 0,
///     elapsed: 0,
/// };
/// assert_eq!(change.to, Phase::Playing);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseChange {
    /// The phase being left
    pub from: Phase,
    /// The phase being entered
    pub to: Phase,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
    /// Accepted moves at the time of the change
    pub moves: u32,
    /// Elapsed seconds at the time of the change
    pub elapsed: u64,
}

/// Ordered history of phase changes.
///
/// History is immutable - `record` returns a new history with the change
/// appended.
///
/// # Example
///
/// ```rust
/// use mazerun::core::{Phase, PhaseChange, PhaseHistory};
/// use chrono::Utc;
///
/// let history = PhaseHistory::new();
/// let history = history.record(PhaseChange {
///     from: Phase::Idle,
///     to: Phase::Playing,
///     timestamp: Utc::now(),
///     moves: 0,
///     elapsed: 0,
/// });
/// let history = history.record(PhaseChange {
///     from: Phase::Playing,
///     to: Phase::Completed,
///     timestamp: Utc::now(),
///     moves: 12,
///     elapsed: 9,
/// });
///
/// assert_eq!(
///     history.get_path(),
///     vec![&Phase::Idle, &Phase::Playing, &Phase::Completed]
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseHistory {
    changes: Vec<PhaseChange>,
}

impl PhaseHistory {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Record a change, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, change: PhaseChange) -> Self {
        let mut changes = self.changes.clone();
        changes.push(change);
        Self { changes }
    }

    /// Get the path of phases traversed.
    ///
    /// Returns the first change's `from` followed by every `to`.
    pub fn get_path(&self) -> Vec<&Phase> {
        let mut path = Vec::new();
        if let Some(first) = self.changes.first() {
            path.push(&first.from);
        }
        for change in &self.changes {
            path.push(&change.to);
        }
        path
    }

    /// Wall-clock duration from the first to the last change.
    ///
    /// Returns `None` if nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.changes.first(), self.changes.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn changes(&self) -> &[PhaseChange] {
        &self.changes
    }

    pub fn last(&self) -> Option<&PhaseChange> {
        self.changes.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(from: Phase, to: Phase, moves: u32) -> PhaseChange {
        PhaseChange {
            from,
            to,
            timestamp: Utc::now(),
            moves,
            elapsed: 0,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = PhaseHistory::new();
        assert!(history.changes().is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = PhaseHistory::new();
        let new_history = history.record(change(Phase::Idle, Phase::Playing, 0));

        assert_eq!(history.changes().len(), 0);
        assert_eq!(new_history.changes().len(), 1);
    }

    #[test]
    fn get_path_returns_phase_sequence() {
        let history = PhaseHistory::new()
            .record(change(Phase::Idle, Phase::Playing, 0))
            .record(change(Phase::Playing, Phase::Completed, 7));

        let path = history.get_path();
        assert_eq!(path, vec![&Phase::Idle, &Phase::Playing, &Phase::Completed]);
        assert_eq!(history.last().map(|c| c.moves), Some(7));
    }

    #[test]
    fn duration_spans_first_to_last() {
        let start = Utc::now();
        let mut first = change(Phase::Idle, Phase::Playing, 0);
        first.timestamp = start;
        let mut second = change(Phase::Playing, Phase::Completed, 3);
        second.timestamp = start + chrono::Duration::seconds(4);

        let history = PhaseHistory::new().record(first).record(second);

        assert_eq!(history.duration(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = PhaseHistory::new().record(change(Phase::Idle, Phase::Playing, 0));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: PhaseHistory = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
