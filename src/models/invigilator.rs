//! Invigilator model.
//!
//! An [`Invigilator`] is a person eligible to supervise exams, with a
//! period quota. Faculty invigilators carry a professor link, which is the
//! join key for teaching-preference matching; staff do not.
//!
//! Quotas arrive pre-computed from the surrounding application
//! (`professor_quota = floor(total_rows / professor_count)`, remainder
//! redistributed to staff); this crate never recomputes them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{ExamSchedule, TimeSlot};

/// Invigilator classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvigilatorType {
    /// Teaching faculty, linked to a professor identity.
    Faculty,
    /// Administrative or support staff.
    Staff,
}

/// A sitting already bound to an invigilator in the store.
///
/// Read-only during a run: the overlap guard consults these, and the
/// report surfaces them as "also supervising" context. A dry-run never
/// mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingBooking {
    /// Calendar day of the booked sitting.
    pub date: NaiveDate,
    /// Half-day label, derived from the start instant.
    pub time_slot: TimeSlot,
    /// Exact start instant.
    pub start_time: NaiveDateTime,
    /// Exact end instant.
    pub end_time: NaiveDateTime,
    /// Subject code of the booked sitting.
    pub subject_code: String,
}

impl ExistingBooking {
    /// Creates a booking; date and slot derive from the start instant.
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        subject_code: impl Into<String>,
    ) -> Self {
        Self {
            date: start_time.date(),
            time_slot: TimeSlot::from_start(start_time),
            start_time,
            end_time,
            subject_code: subject_code.into(),
        }
    }

    /// Records a schedule accepted during the current run as a booking,
    /// so later matcher iterations see it in the overlap guard.
    pub fn from_schedule(schedule: &ExamSchedule) -> Self {
        Self {
            date: schedule.date,
            time_slot: schedule.time_slot,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            subject_code: schedule.subject_code.clone(),
        }
    }
}

/// A person eligible to supervise exams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invigilator {
    /// Unique invigilator identifier.
    pub id: String,
    /// Name shown in reports and previews.
    pub display_name: String,
    /// Faculty or staff.
    pub invigilator_type: InvigilatorType,
    /// Teaching identity; set only for faculty.
    pub professor_id: Option<String>,
    /// Home department, if known.
    pub department: Option<String>,
    /// Upper bound on assignments for the period.
    pub quota: u32,
    /// Assignments already persisted against the quota. The allocator
    /// tracks run-time increments in its own ledger and never mutates
    /// this snapshot value.
    pub assigned_quota: u32,
    /// Sittings already bound to this person in the store.
    pub existing_schedules: Vec<ExistingBooking>,
}

impl Invigilator {
    /// Creates a faculty invigilator linked to a professor identity.
    pub fn faculty(
        id: impl Into<String>,
        display_name: impl Into<String>,
        professor_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            invigilator_type: InvigilatorType::Faculty,
            professor_id: Some(professor_id.into()),
            department: None,
            quota: 0,
            assigned_quota: 0,
            existing_schedules: Vec::new(),
        }
    }

    /// Creates a staff invigilator (no teaching identity).
    pub fn staff(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            invigilator_type: InvigilatorType::Staff,
            professor_id: None,
            department: None,
            quota: 0,
            assigned_quota: 0,
            existing_schedules: Vec::new(),
        }
    }

    /// Sets the quota cap.
    pub fn with_quota(mut self, quota: u32) -> Self {
        self.quota = quota;
        self
    }

    /// Sets the already-persisted assignment count.
    pub fn with_assigned(mut self, assigned_quota: u32) -> Self {
        self.assigned_quota = assigned_quota;
        self
    }

    /// Sets the home department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Adds an already-persisted booking.
    pub fn with_booking(mut self, booking: ExistingBooking) -> Self {
        self.existing_schedules.push(booking);
        self
    }

    /// Whether this invigilator teaches the given schedule's subject
    /// group (faculty with a professor id in the schedule's teaching set).
    pub fn teaches(&self, schedule: &ExamSchedule) -> bool {
        match &self.professor_id {
            Some(pid) => schedule.is_taught_by(pid),
            None => false,
        }
    }

    /// Human-facing "also supervising …" line listing existing bookings,
    /// or `None` when there are none.
    pub fn other_assignments_label(&self) -> Option<String> {
        if self.existing_schedules.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .existing_schedules
            .iter()
            .map(|b| format!("{} ({})", b.subject_code, b.date))
            .collect();
        Some(parts.join(", "))
    }
}
