//! Exam schedule model.
//!
//! An [`ExamSchedule`] is one exam sitting: a subject group in a room on a
//! date, with an exact time range and a coarse time-slot label. Schedules
//! are immutable for the duration of an allocation run; only the proposed
//! assignment output refers to them.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Coarse half-day label for an exam sitting.
///
/// Derived from the start time (before noon = morning). Used for the
/// human-facing conflict report: two sittings in the same labeled slot on
/// the same day count as "the same meeting period" even when their
/// minute-level bounds differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    /// Starts before 12:00.
    Morning,
    /// Starts at or after 12:00.
    Afternoon,
}

impl TimeSlot {
    /// Derives the slot label from a start time.
    pub fn from_start(start: NaiveDateTime) -> Self {
        if start.hour() < 12 {
            TimeSlot::Morning
        } else {
            TimeSlot::Afternoon
        }
    }
}

/// Examination period classification, used as a filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamType {
    Midterm,
    Final,
}

/// One exam sitting requiring exactly one invigilator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSchedule {
    /// Unique schedule identifier.
    pub id: String,
    /// Calendar day of the sitting.
    pub date: NaiveDate,
    /// Coarse half-day label, derived from `start_time`.
    pub time_slot: TimeSlot,
    /// Exact start instant (used for overlap checks).
    pub start_time: NaiveDateTime,
    /// Exact end instant (used for overlap checks).
    pub end_time: NaiveDateTime,
    /// Examination period.
    pub exam_type: ExamType,
    /// Academic year the sitting belongs to.
    pub academic_year: i32,
    /// Semester number within the academic year.
    pub semester: u8,
    /// Subject code (e.g., "CS-301").
    pub subject_code: String,
    /// Subject display name.
    pub subject_name: String,
    /// Department owning the subject.
    pub department: String,
    /// Professors who teach this schedule's subject group: the primary
    /// professor plus any co-professors.
    pub teaching_professor_ids: HashSet<String>,
    /// Room building.
    pub room_building: String,
    /// Room number within the building.
    pub room_number: String,
    /// Pre-existing assignment, if the store already holds one.
    pub current_invigilator_id: Option<String>,
}

impl ExamSchedule {
    /// Creates a schedule; the date and time-slot label are derived from
    /// the start instant.
    pub fn new(id: impl Into<String>, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            date: start_time.date(),
            time_slot: TimeSlot::from_start(start_time),
            start_time,
            end_time,
            exam_type: ExamType::Midterm,
            academic_year: 0,
            semester: 1,
            subject_code: String::new(),
            subject_name: String::new(),
            department: String::new(),
            teaching_professor_ids: HashSet::new(),
            room_building: String::new(),
            room_number: String::new(),
            current_invigilator_id: None,
        }
    }

    /// Sets the subject code and name.
    pub fn with_subject(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.subject_code = code.into();
        self.subject_name = name.into();
        self
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the examination term (type, academic year, semester).
    pub fn with_term(mut self, exam_type: ExamType, academic_year: i32, semester: u8) -> Self {
        self.exam_type = exam_type;
        self.academic_year = academic_year;
        self.semester = semester;
        self
    }

    /// Adds a teaching professor (primary or co-professor).
    pub fn with_professor(mut self, professor_id: impl Into<String>) -> Self {
        self.teaching_professor_ids.insert(professor_id.into());
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, building: impl Into<String>, number: impl Into<String>) -> Self {
        self.room_building = building.into();
        self.room_number = number.into();
        self
    }

    /// Marks the schedule as already assigned in the store.
    pub fn with_current_invigilator(mut self, invigilator_id: impl Into<String>) -> Self {
        self.current_invigilator_id = Some(invigilator_id.into());
        self
    }

    /// Whether a professor teaches this schedule's subject group.
    pub fn is_taught_by(&self, professor_id: &str) -> bool {
        self.teaching_professor_ids.contains(professor_id)
    }

    /// Whether a time range on the same day intersects this sitting.
    ///
    /// Bounds are inclusive: `other.start <= self.end && other.end >=
    /// self.start`. Back-to-back sittings that share an instant therefore
    /// count as overlapping, matching the conservative check the matcher
    /// relies on.
    pub fn intersects(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.end_time && end >= self.start_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_time_slot_from_start() {
        assert_eq!(TimeSlot::from_start(at(1, 9)), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_start(at(1, 11)), TimeSlot::Morning);
        assert_eq!(TimeSlot::from_start(at(1, 12)), TimeSlot::Afternoon);
        assert_eq!(TimeSlot::from_start(at(1, 13)), TimeSlot::Afternoon);
    }

    #[test]
    fn test_schedule_builder() {
        let s = ExamSchedule::new("S1", at(2, 9), at(2, 11))
            .with_subject("CS-301", "Operating Systems")
            .with_department("Computer Science")
            .with_term(ExamType::Final, 2026, 2)
            .with_professor("P1")
            .with_professor("P2")
            .with_room("ENG", "201")
            .with_current_invigilator("I9");

        assert_eq!(s.date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(s.time_slot, TimeSlot::Morning);
        assert_eq!(s.subject_code, "CS-301");
        assert_eq!(s.exam_type, ExamType::Final);
        assert!(s.is_taught_by("P1"));
        assert!(s.is_taught_by("P2"));
        assert!(!s.is_taught_by("P3"));
        assert_eq!(s.current_invigilator_id.as_deref(), Some("I9"));
    }

    #[test]
    fn test_intersects_inclusive_bounds() {
        let s = ExamSchedule::new("S1", at(2, 9), at(2, 11));

        // Strict overlap
        assert!(s.intersects(at(2, 10), at(2, 12)));
        // Fully contained
        assert!(s.intersects(at(2, 9), at(2, 10)));
        // Shared instant counts as overlap (inclusive bounds)
        assert!(s.intersects(at(2, 11), at(2, 13)));
        assert!(s.intersects(at(2, 7), at(2, 9)));
        // Disjoint
        assert!(!s.intersects(at(2, 12), at(2, 14)));
        assert!(!s.intersects(at(2, 6), at(2, 8)));
    }

    #[test]
    fn test_serde_round_trip() {
        let s = ExamSchedule::new("S1", at(2, 9), at(2, 11)).with_subject("CS-301", "OS");
        let json = serde_json::to_string(&s).unwrap();
        let back: ExamSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "S1");
        assert_eq!(back.time_slot, TimeSlot::Morning);
    }
}
