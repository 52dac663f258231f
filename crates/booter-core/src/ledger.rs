//! Append-only record of completed phases

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// One completed phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseEntry {
    pub phase: Phase,
    pub completed_at: DateTime<Utc>,
}

/// Completed phases of one component, in execution order.
///
/// Entries are never removed and a phase is recorded at most once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusLedger {
    entries: Vec<PhaseEntry>,
}

impl StatusLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed phase. Returns `false` if it was already recorded.
    pub fn record(&mut self, phase: Phase) -> bool {
        if self.contains(phase) {
            return false;
        }
        self.entries.push(PhaseEntry {
            phase,
            completed_at: Utc::now(),
        });
        true
    }

    pub fn contains(&self, phase: Phase) -> bool {
        self.entries.iter().any(|entry| entry.phase == phase)
    }

    /// Completed phase names in execution order
    pub fn phases(&self) -> Vec<Phase> {
        self.entries.iter().map(|entry| entry.phase).collect()
    }

    pub fn entries(&self) -> &[PhaseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_once() {
        let mut ledger = StatusLedger::new();
        assert!(ledger.is_empty());

        assert!(ledger.record(Phase::Start));
        assert!(!ledger.record(Phase::Start));
        assert!(ledger.record(Phase::Activate));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.phases(), vec![Phase::Start, Phase::Activate]);
    }

    #[test]
    fn test_execution_order_is_kept() {
        let mut ledger = StatusLedger::new();
        ledger.record(Phase::Activate);
        ledger.record(Phase::Start);

        assert_eq!(ledger.phases(), vec![Phase::Activate, Phase::Start]);
        assert!(ledger.contains(Phase::Start));
        assert!(!ledger.contains(Phase::Stop));
        assert!(ledger.entries()[0].completed_at <= ledger.entries()[1].completed_at);
    }
}
