//! Change-counter gating.

use crate::fingerprint::Fingerprint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    NoChange,
    Changed,
}

/// Engine-private deduplication state.
///
/// Mutated only from inside the capture loop; cross-thread readers go through
/// the engine handle, never through this struct.
#[derive(Debug, Default)]
pub struct ChangeCounterState {
    last_change_count: Option<i64>,
    last_fingerprint: Option<Fingerprint>,
}

impl ChangeCounterState {
    /// Compare an observed counter against the last recorded one.
    ///
    /// Any difference counts as changed, including a decrease: the OS
    /// contract says the counter only grows, but a wrapped or reset counter
    /// must still trigger processing rather than wedge the gate. The first
    /// observation after startup is also treated as changed so whatever is
    /// on the pasteboard at launch gets captured.
    pub fn observe(&self, change_count: i64) -> ChangeOutcome {
        match self.last_change_count {
            Some(last) if last == change_count => ChangeOutcome::NoChange,
            _ => ChangeOutcome::Changed,
        }
    }

    /// True when the captured content is byte-identical to the previously
    /// accepted capture, i.e. a producer echoed the same payload under a new
    /// counter value.
    pub fn is_duplicate(&self, fingerprint: &Fingerprint) -> bool {
        self.last_fingerprint.as_ref() == Some(fingerprint)
    }

    /// Record a cycle whose content was accepted (emitted or absorbed into a
    /// merge buffer).
    pub fn record_accepted(&mut self, change_count: i64, fingerprint: Fingerprint) {
        self.last_change_count = Some(change_count);
        self.last_fingerprint = Some(fingerprint);
    }

    /// Record a cycle that produced nothing (suppressed, empty, or failed).
    ///
    /// The fingerprint is cleared rather than kept: it describes the last
    /// accepted payload only, and a stale value here would swallow a genuine
    /// re-copy of that payload after an unrelated suppressed cycle.
    pub fn record_rejected(&mut self, change_count: i64) {
        self.last_change_count = Some(change_count);
        self.last_fingerprint = None;
    }

    /// Record a no-op cycle where the counter moved but the bytes did not.
    /// The fingerprint still describes the last accepted payload, so it is
    /// kept.
    pub fn record_duplicate(&mut self, change_count: i64) {
        self.last_change_count = Some(change_count);
    }

    pub fn last_change_count(&self) -> Option<i64> {
        self.last_change_count
    }
}
