//! Allocation run configuration.
//!
//! One typed struct per concern: [`ScheduleFilter`] selects which
//! schedules a run considers, [`AllocationConfig`] holds the policy flags
//! that shape matching. Every flag documents its exact effect; there is
//! no untyped options bag.

use serde::{Deserialize, Serialize};

use crate::models::{ExamSchedule, ExamType};

/// Criteria selecting the schedules an allocation run considers.
///
/// Unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleFilter {
    /// Restrict to one examination period.
    pub exam_type: Option<ExamType>,
    /// Restrict to one academic year.
    pub academic_year: Option<i32>,
    /// Restrict to one semester.
    pub semester: Option<u8>,
    /// Restrict to one owning department.
    pub department: Option<String>,
}

impl ScheduleFilter {
    /// Creates a filter matching all schedules.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to an examination period.
    pub fn with_exam_type(mut self, exam_type: ExamType) -> Self {
        self.exam_type = Some(exam_type);
        self
    }

    /// Restricts to an academic year.
    pub fn with_academic_year(mut self, year: i32) -> Self {
        self.academic_year = Some(year);
        self
    }

    /// Restricts to a semester.
    pub fn with_semester(mut self, semester: u8) -> Self {
        self.semester = Some(semester);
        self
    }

    /// Restricts to a department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Whether a schedule satisfies every set criterion.
    pub fn matches(&self, schedule: &ExamSchedule) -> bool {
        if let Some(t) = self.exam_type {
            if schedule.exam_type != t {
                return false;
            }
        }
        if let Some(y) = self.academic_year {
            if schedule.academic_year != y {
                return false;
            }
        }
        if let Some(s) = self.semester {
            if schedule.semester != s {
                return false;
            }
        }
        if let Some(d) = &self.department {
            if &schedule.department != d {
                return false;
            }
        }
        true
    }
}

/// Policy flags for one allocation run.
///
/// Defaults keep every safeguard on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Fallback pass sorts the pool descending by remaining quota
    /// (`quota - assigned`) before scanning; ties keep pool order
    /// (stable sort). Off = plain pool order.
    pub prioritize_quota: bool,
    /// Skip schedules that already carry an invigilator in the store.
    /// Off = re-propose those too (the commit adapter handles the swap).
    pub exclude_already_assigned: bool,
    /// Master switch for the matcher-time availability guard. When off,
    /// neither pass checks the candidate's other bookings at all.
    pub respect_time_constraints: bool,
    /// When the guard runs, also reject a candidate already booked in the
    /// same (date, slot-label) even if the minute bounds do not
    /// intersect; and make the override handler demand confirmation when
    /// it finds such collisions.
    pub avoid_same_time_slot: bool,
    /// When `false`, the guard rejects any same-day pairing outright,
    /// regardless of slot or exact times.
    pub allow_same_day_different_slot: bool,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            prioritize_quota: true,
            exclude_already_assigned: true,
            respect_time_constraints: true,
            avoid_same_time_slot: true,
            allow_same_day_different_slot: true,
        }
    }
}

impl AllocationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets quota-balanced ordering for the fallback pass.
    pub fn with_prioritize_quota(mut self, on: bool) -> Self {
        self.prioritize_quota = on;
        self
    }

    /// Sets whether already-assigned schedules are skipped.
    pub fn with_exclude_already_assigned(mut self, on: bool) -> Self {
        self.exclude_already_assigned = on;
        self
    }

    /// Sets the matcher-time availability guard.
    pub fn with_respect_time_constraints(mut self, on: bool) -> Self {
        self.respect_time_constraints = on;
        self
    }

    /// Sets same-slot rejection and override confirmation.
    pub fn with_avoid_same_time_slot(mut self, on: bool) -> Self {
        self.avoid_same_time_slot = on;
        self
    }

    /// Sets whether two sittings on one day in different slots may share
    /// an invigilator.
    pub fn with_allow_same_day_different_slot(mut self, on: bool) -> Self {
        self.allow_same_day_different_slot = on;
        self
    }
}
