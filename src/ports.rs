//! External collaborator seams.
//!
//! The engine consumes and produces plain data; fetching the snapshot
//! and persisting the final links belong to the surrounding application.
//! These traits are the contract at that seam, with in-memory
//! implementations for tests and embedding.
//!
//! The engine never writes to the store itself: a run is re-runnable
//! against a fresh snapshot with no side effects, and any timeout/retry
//! policy belongs to the implementations behind these traits (failures
//! propagate, the engine does not retry).

use serde::{Deserialize, Serialize};

use crate::allocator::ScheduleFilter;
use crate::error::{CommitError, SnapshotError};
use crate::models::{Assignment, ExamSchedule, Invigilator};

/// Point-in-time view of the store: the schedules and the invigilator
/// pool one allocation run works from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schedules matching the run's filter, in store order. The matcher
    /// passes iterate this order; it is part of the observable behavior.
    pub schedules: Vec<ExamSchedule>,
    /// Invigilator pool, in store order (also order-significant).
    pub invigilators: Vec<Invigilator>,
}

impl Snapshot {
    pub fn new(schedules: Vec<ExamSchedule>, invigilators: Vec<Invigilator>) -> Self {
        Self {
            schedules,
            invigilators,
        }
    }
}

/// Supplies the schedule/invigilator snapshot for a run.
pub trait SnapshotSource {
    /// Fetches a snapshot restricted to the filter criteria.
    fn fetch(&self, filter: &ScheduleFilter) -> Result<Snapshot, SnapshotError>;
}

/// In-memory snapshot source, filtering a fixed data set. The test and
/// embedding counterpart of the application's store-backed source.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshot: Snapshot,
}

impl InMemorySource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl SnapshotSource for InMemorySource {
    fn fetch(&self, filter: &ScheduleFilter) -> Result<Snapshot, SnapshotError> {
        let schedules = self
            .snapshot
            .schedules
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        Ok(Snapshot {
            schedules,
            invigilators: self.snapshot.invigilators.clone(),
        })
    }
}

/// One schedule → invigilator link to persist. `new_invigilator_id =
/// None` means "clear the link on this schedule".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRef {
    pub schedule_id: String,
    pub new_invigilator_id: Option<String>,
}

impl From<&Assignment> for AssignmentRef {
    fn from(a: &Assignment) -> Self {
        Self {
            schedule_id: a.schedule_id.clone(),
            new_invigilator_id: Some(a.new_invigilator_id.clone()),
        }
    }
}

/// A pair the store failed to persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitFailure {
    pub schedule_id: String,
    pub reason: String,
}

/// Result of a commit batch. Partial success is representable: the
/// operator retries exactly the failed pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitReport {
    /// Pairs successfully persisted.
    pub persisted: usize,
    /// Pairs the store rejected, with reasons.
    pub failures: Vec<CommitFailure>,
}

impl CommitReport {
    /// Whether every pair in the batch was persisted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Persists final schedule → invigilator links.
///
/// The implementation owns the transaction model: writing each link,
/// adjusting `assigned_quota` counters (decrement the replaced
/// invigilator, increment the new one; plain increment for a first-time
/// assignment), and reporting per-pair failures.
pub trait CommitSink {
    fn commit(&mut self, assignments: &[AssignmentRef]) -> Result<CommitReport, CommitError>;
}

/// Converts a preview list into commit pairs.
pub fn to_commit_refs(assignments: &[Assignment]) -> Vec<AssignmentRef> {
    assignments.iter().map(AssignmentRef::from).collect()
}
