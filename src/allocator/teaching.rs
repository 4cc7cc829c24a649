//! Teaching-preference pass.
//!
//! First allocation pass: hand each sitting to an invigilator who
//! teaches it, when one is eligible. Greedy and single-pass by design —
//! schedules are visited in store order, the pool is scanned in pool
//! order, and the first eligible teaching invigilator wins. There is no
//! back-tracking and no fairness between co-professors; teaching match
//! takes priority over balance. Results therefore depend on pool order,
//! and callers wanting reproducible previews must fix their iteration
//! order upstream.

use tracing::debug;

use crate::error::EngineError;
use crate::models::{ExamSchedule, Invigilator, InvigilatorType};

use super::config::AllocationConfig;
use super::guard::is_available;
use super::RunState;

/// Assigns sittings to their teaching professors where possible.
///
/// A candidate is accepted iff they are faculty with a professor id in
/// the sitting's teaching set, have quota headroom, and pass the time
/// guard against both persisted and run-proposed bookings.
pub(crate) fn run(
    schedules: &[ExamSchedule],
    pool: &[Invigilator],
    config: &AllocationConfig,
    state: &mut RunState,
) -> Result<(), EngineError> {
    for schedule in schedules {
        if state.is_assigned(&schedule.id) {
            continue;
        }

        let accepted = pool.iter().find(|inv| {
            inv.invigilator_type == InvigilatorType::Faculty
                && inv.teaches(schedule)
                && state.ledger.has_capacity(&inv.id)
                && is_available(&inv.existing_schedules, schedule, config)
                && is_available(state.proposed_for(&inv.id), schedule, config)
        });

        if let Some(inv) = accepted {
            debug!(
                schedule = %schedule.id,
                invigilator = %inv.id,
                subject = %schedule.subject_code,
                "teaching-preference match"
            );
            state.accept(schedule, inv, true)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExistingBooking;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sched(id: &str, day: u32, start_h: u32, prof: &str) -> ExamSchedule {
        ExamSchedule::new(id, at(day, start_h), at(day, start_h + 2))
            .with_subject(format!("SUB-{id}"), "Subject")
            .with_professor(prof)
    }

    #[test]
    fn test_first_pool_order_teacher_wins() {
        // Both I1 and I2 teach S1; pool order decides, not balance
        let schedules = vec![
            sched("S1", 2, 9, "P1").with_professor("P2"),
        ];
        let pool = vec![
            Invigilator::faculty("I1", "Dr. Arun", "P1").with_quota(1),
            Invigilator::faculty("I2", "Dr. Boon", "P2").with_quota(5),
        ];
        let mut state = RunState::new(&pool);
        run(&schedules, &pool, &AllocationConfig::default(), &mut state).unwrap();

        assert_eq!(state.assignments.len(), 1);
        assert_eq!(state.assignments[0].new_invigilator_id, "I1");
        assert!(state.assignments[0].is_teaching_faculty);
        assert_eq!(state.assignments[0].quota_used, 0);
    }

    #[test]
    fn test_non_teachers_skipped() {
        let schedules = vec![sched("S1", 2, 9, "P9")];
        let pool = vec![
            Invigilator::faculty("I1", "Dr. Arun", "P1").with_quota(5),
            Invigilator::staff("I2", "Ms. Siriporn").with_quota(5),
        ];
        let mut state = RunState::new(&pool);
        run(&schedules, &pool, &AllocationConfig::default(), &mut state).unwrap();
        assert!(state.assignments.is_empty());
    }

    #[test]
    fn test_quota_respected_across_schedules() {
        // P1 teaches three sittings on different days but has quota 2
        let schedules = vec![
            sched("S1", 2, 9, "P1"),
            sched("S2", 3, 9, "P1"),
            sched("S3", 4, 9, "P1"),
        ];
        let pool = vec![Invigilator::faculty("I1", "Dr. Arun", "P1").with_quota(2)];
        let mut state = RunState::new(&pool);
        run(&schedules, &pool, &AllocationConfig::default(), &mut state).unwrap();

        assert_eq!(state.assignments.len(), 2);
        assert_eq!(state.assignments[0].schedule_id, "S1");
        assert_eq!(state.assignments[1].schedule_id, "S2");
        assert!(!state.is_assigned("S3"));
    }

    #[test]
    fn test_time_guard_blocks_same_slot() {
        // Two same-morning sittings taught by the same professor: the
        // second must not land on them
        let schedules = vec![sched("S1", 2, 9, "P1"), sched("S2", 2, 9, "P1")];
        let pool = vec![Invigilator::faculty("I1", "Dr. Arun", "P1").with_quota(5)];
        let mut state = RunState::new(&pool);
        run(&schedules, &pool, &AllocationConfig::default(), &mut state).unwrap();

        assert_eq!(state.assignments.len(), 1);
        assert!(state.is_assigned("S1"));
        assert!(!state.is_assigned("S2"));
    }

    #[test]
    fn test_persisted_booking_blocks() {
        let schedules = vec![sched("S1", 2, 9, "P1")];
        let pool = vec![Invigilator::faculty("I1", "Dr. Arun", "P1")
            .with_quota(5)
            .with_booking(ExistingBooking::new(at(2, 10), at(2, 12), "MA-101"))];
        let mut state = RunState::new(&pool);
        run(&schedules, &pool, &AllocationConfig::default(), &mut state).unwrap();
        assert!(state.assignments.is_empty());
    }

    #[test]
    fn test_guard_off_allows_double_booking() {
        let schedules = vec![sched("S1", 2, 9, "P1"), sched("S2", 2, 9, "P1")];
        let pool = vec![Invigilator::faculty("I1", "Dr. Arun", "P1").with_quota(5)];
        let config = AllocationConfig::default().with_respect_time_constraints(false);
        let mut state = RunState::new(&pool);
        run(&schedules, &pool, &config, &mut state).unwrap();
        assert_eq!(state.assignments.len(), 2);
    }
}
