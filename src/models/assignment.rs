//! Assignment output model.
//!
//! An [`Assignment`] is one proposed schedule → invigilator link in the
//! preview list. It exists only in memory during a run: created by the
//! matcher passes, annotated by the conflict detector, possibly edited by
//! the override handler, and finally either handed to the commit adapter
//! or discarded.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ExamSchedule, Invigilator, InvigilatorType, TimeSlot};

/// Descriptor of another assignment colliding with this one: same
/// invigilator, same calendar day, same time-slot label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConflict {
    /// Day of the colliding sitting.
    pub date: NaiveDate,
    /// Slot label of the colliding sitting.
    pub time_slot: TimeSlot,
    /// Subject code of the colliding sitting.
    pub subject_code: String,
}

/// One proposed schedule → invigilator link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Schedule being covered.
    pub schedule_id: String,
    /// Day of the sitting (denormalized for conflict checks and display).
    pub date: NaiveDate,
    /// Slot label of the sitting.
    pub time_slot: TimeSlot,
    /// Subject code of the sitting.
    pub subject_code: String,
    /// Subject display name.
    pub subject_name: String,
    /// Department owning the subject.
    pub department: String,
    /// Invigilator the store already held for this schedule, if any.
    pub current_invigilator_id: Option<String>,
    /// Proposed invigilator.
    pub new_invigilator_id: String,
    /// Proposed invigilator's display name.
    pub new_invigilator_name: String,
    /// Proposed invigilator's classification.
    pub invigilator_type: InvigilatorType,
    /// Proposed invigilator's department, if known.
    pub invigilator_department: Option<String>,
    /// The invigilator's assignment count *before* this assignment
    /// (display value, snapshotted at proposal time).
    pub quota_used: u32,
    /// The invigilator's quota cap.
    pub quota_total: u32,
    /// Whether the proposed invigilator teaches this schedule's subject.
    pub is_teaching_faculty: bool,
    /// "Also supervising …" context from the invigilator's persisted
    /// bookings, if any.
    pub other_assignments: Option<String>,
    /// Collisions with other assignments in the preview, set by the
    /// conflict detector. `None` when none were found.
    pub time_conflicts: Option<Vec<TimeConflict>>,
}

impl Assignment {
    /// Builds a proposed assignment from a schedule and the accepted
    /// invigilator. `quota_used` is the invigilator's count before this
    /// assignment, as reported by the quota ledger.
    pub fn propose(
        schedule: &ExamSchedule,
        invigilator: &Invigilator,
        quota_used: u32,
        is_teaching_faculty: bool,
    ) -> Self {
        Self {
            schedule_id: schedule.id.clone(),
            date: schedule.date,
            time_slot: schedule.time_slot,
            subject_code: schedule.subject_code.clone(),
            subject_name: schedule.subject_name.clone(),
            department: schedule.department.clone(),
            current_invigilator_id: schedule.current_invigilator_id.clone(),
            new_invigilator_id: invigilator.id.clone(),
            new_invigilator_name: invigilator.display_name.clone(),
            invigilator_type: invigilator.invigilator_type,
            invigilator_department: invigilator.department.clone(),
            quota_used,
            quota_total: invigilator.quota,
            is_teaching_faculty,
            other_assignments: invigilator.other_assignments_label(),
            time_conflicts: None,
        }
    }

    /// Coarse collision test against another assignment: same calendar
    /// day and same slot label. This is the canonical reported-conflict
    /// definition; exact start/end overlap is checked only at allocation
    /// time.
    pub fn collides_with(&self, other: &Assignment) -> bool {
        self.date == other.date && self.time_slot == other.time_slot
    }

    /// Conflict descriptor pointing at this assignment, for attaching to
    /// a colliding peer.
    pub fn as_conflict(&self) -> TimeConflict {
        TimeConflict {
            date: self.date,
            time_slot: self.time_slot,
            subject_code: self.subject_code.clone(),
        }
    }

    /// Number of recorded conflicts.
    pub fn conflict_count(&self) -> usize {
        self.time_conflicts.as_ref().map_or(0, |c| c.len())
    }
}
