//! Engine error taxonomy.
//!
//! Only input failures and malformed requests are errors. Allocation
//! shortfalls and conflict findings are ordinary outcomes, reported in
//! [`AllocationOutcome`](crate::allocator::AllocationOutcome) and on the
//! affected assignments.

use thiserror::Error;

/// Failure fetching the schedule/invigilator snapshot from the store.
#[derive(Debug, Clone, Error)]
#[error("snapshot fetch failed: {reason}")]
pub struct SnapshotError {
    /// Store-reported cause, propagated opaquely.
    pub reason: String,
}

impl SnapshotError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failure submitting the commit batch as a whole.
///
/// Per-assignment failures inside an accepted batch are not an error;
/// they are reported in [`CommitReport`](crate::ports::CommitReport) so
/// the operator can retry only the failed pairs.
#[derive(Debug, Clone, Error)]
#[error("commit failed: {reason}")]
pub struct CommitError {
    /// Store-reported cause.
    pub reason: String,
    /// Pairs persisted before the batch failed, if the store reported it.
    pub persisted_before_failure: usize,
}

impl CommitError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            persisted_before_failure: 0,
        }
    }
}

/// Errors raised by the allocation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The snapshot could not be fetched; no allocation was attempted.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// An override targeted an index outside the preview list.
    #[error("no assignment at index {0}")]
    InvalidAssignmentIndex(usize),

    /// The quota ledger was asked about an invigilator missing from the
    /// snapshot pool.
    #[error("unknown invigilator id: {0}")]
    UnknownInvigilator(String),

    /// A reservation would have pushed an invigilator past their quota.
    /// The ledger rejects rather than clamps; callers gate on capacity
    /// first, so surfacing this means a caller skipped the check.
    #[error("quota exhausted for invigilator {0}")]
    QuotaExhausted(String),
}
