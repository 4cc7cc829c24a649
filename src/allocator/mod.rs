//! Two-pass allocation pipeline.
//!
//! One run is synchronous and single-threaded: the teaching-preference
//! pass and the quota-balanced fallback pass execute sequentially over
//! one shared [`QuotaLedger`], then the conflict detector annotates the
//! result. Work is bounded by `O(schedules × invigilators)` comparisons,
//! so a run completes before its preview is shown; there is no
//! cancellation.
//!
//! # Order dependence
//!
//! Both passes are greedy and first-fit. The schedule order and pool
//! order of the snapshot are part of the observable behavior: reordering
//! the pool can change which eligible invigilator a sitting gets.
//! Callers wanting reproducible previews must fix their store order.

mod config;
mod fallback;
mod guard;
mod quota;
mod teaching;

pub use config::{AllocationConfig, ScheduleFilter};
pub use quota::QuotaLedger;

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::conflict::detect_conflicts;
use crate::error::EngineError;
use crate::models::{Assignment, ExamSchedule, ExistingBooking, Invigilator};
use crate::ports::{Snapshot, SnapshotSource};
use crate::summary::RunSummary;

/// Mutable state shared by the two matcher passes.
#[derive(Debug)]
pub(crate) struct RunState {
    /// Shared quota counters, seeded from the snapshot.
    pub ledger: QuotaLedger,
    /// Bookings proposed earlier in this run, by invigilator id, so
    /// later iterations see them in the time guard.
    proposed: HashMap<String, Vec<ExistingBooking>>,
    /// The preview list under construction.
    pub assignments: Vec<Assignment>,
    assigned: HashSet<String>,
}

impl RunState {
    pub(crate) fn new(pool: &[Invigilator]) -> Self {
        Self {
            ledger: QuotaLedger::from_pool(pool),
            proposed: HashMap::new(),
            assignments: Vec::new(),
            assigned: HashSet::new(),
        }
    }

    pub(crate) fn is_assigned(&self, schedule_id: &str) -> bool {
        self.assigned.contains(schedule_id)
    }

    pub(crate) fn proposed_for(&self, invigilator_id: &str) -> &[ExistingBooking] {
        self.proposed
            .get(invigilator_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Accepts a schedule → invigilator match: reserves quota, emits the
    /// assignment, and records the booking for later guard checks.
    pub(crate) fn accept(
        &mut self,
        schedule: &ExamSchedule,
        invigilator: &Invigilator,
        is_teaching_faculty: bool,
    ) -> Result<(), EngineError> {
        let quota_used = self.ledger.reserve(&invigilator.id)?;
        self.assignments.push(Assignment::propose(
            schedule,
            invigilator,
            quota_used,
            is_teaching_faculty,
        ));
        self.proposed
            .entry(invigilator.id.clone())
            .or_default()
            .push(ExistingBooking::from_schedule(schedule));
        self.assigned.insert(schedule.id.clone());
        Ok(())
    }
}

/// Result of one allocation run: the preview list plus what could not be
/// placed.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// Proposed assignments, annotated with any conflicts.
    pub assignments: Vec<Assignment>,
    /// Schedule ids the run considered but could not place. A shortfall,
    /// not an error; the operator resolves these by override or by
    /// relaxing constraints.
    pub unassigned: Vec<String>,
    /// Colliding pairs found by the conflict detector.
    pub conflict_pairs: usize,
    /// Aggregate counts for the preview header.
    pub summary: RunSummary,
}

/// Runs both matcher passes and the conflict detector over a snapshot.
pub fn allocate(snapshot: &Snapshot, config: &AllocationConfig) -> Result<AllocationOutcome, EngineError> {
    let considered: Vec<ExamSchedule> = if config.exclude_already_assigned {
        snapshot
            .schedules
            .iter()
            .filter(|s| s.current_invigilator_id.is_none())
            .cloned()
            .collect()
    } else {
        snapshot.schedules.clone()
    };

    let mut state = RunState::new(&snapshot.invigilators);
    teaching::run(&considered, &snapshot.invigilators, config, &mut state)?;
    fallback::run(&considered, &snapshot.invigilators, config, &mut state)?;

    let unassigned: Vec<String> = considered
        .iter()
        .filter(|s| !state.is_assigned(&s.id))
        .map(|s| s.id.clone())
        .collect();

    let mut assignments = state.assignments;
    let conflict_pairs = detect_conflicts(&mut assignments);

    let summary = RunSummary::compute(
        &assignments,
        snapshot.schedules.len(),
        considered.len(),
        &snapshot.invigilators,
    );
    info!(
        assigned = summary.total_assigned,
        considered = summary.total_schedules,
        unassigned = unassigned.len(),
        conflict_pairs,
        "allocation run complete"
    );

    Ok(AllocationOutcome {
        assignments,
        unassigned,
        conflict_pairs,
        summary,
    })
}

/// Fetches a snapshot and runs an allocation over it.
///
/// Snapshot failures are reported immediately; no partial allocation is
/// attempted.
pub fn preview<S: SnapshotSource>(
    source: &S,
    filter: &ScheduleFilter,
    config: &AllocationConfig,
) -> Result<AllocationOutcome, EngineError> {
    let snapshot = source.fetch(filter)?;
    allocate(&snapshot, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnapshotError;
    use crate::models::InvigilatorType;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sched(id: &str, day: u32, start_h: u32) -> ExamSchedule {
        ExamSchedule::new(id, at(day, start_h), at(day, start_h + 2))
            .with_subject(format!("SUB-{id}"), "Subject")
    }

    /// Three same-morning sittings of a subject taught by
    /// P (quota 2), pool = [P(faculty, 2), Q(staff, 5)]. The guard must
    /// keep P off the second sitting even though quota would allow it.
    #[test]
    fn test_teaching_priority_with_time_guard() {
        let snapshot = Snapshot::new(
            vec![
                sched("S1", 2, 8).with_professor("P"),
                sched("S2", 2, 8).with_professor("P"),
                sched("S3", 2, 8).with_professor("P"),
            ],
            vec![
                Invigilator::faculty("P", "Prof. P", "P").with_quota(2),
                Invigilator::staff("Q", "Staff Q").with_quota(5),
            ],
        );
        let outcome = allocate(&snapshot, &AllocationConfig::default()).unwrap();

        assert_eq!(outcome.assignments.len(), 3);
        let by_schedule: Vec<(&str, &str, bool)> = outcome
            .assignments
            .iter()
            .map(|a| (a.schedule_id.as_str(), a.new_invigilator_id.as_str(), a.is_teaching_faculty))
            .collect();
        assert!(by_schedule.contains(&("S1", "P", true)));
        // S2 skips P (same morning) and falls through to Q in the
        // fallback pass; S3 likewise cannot go to Q twice that morning
        assert!(by_schedule.contains(&("S2", "Q", false)));
        assert_eq!(outcome.unassigned, vec!["S3".to_string()]);

        // No double booking made it through, so no conflicts to report
        assert_eq!(outcome.conflict_pairs, 0);
        assert!(outcome.assignments.iter().all(|a| a.time_conflicts.is_none()));
    }

    #[test]
    fn test_quota_never_exceeded() {
        let snapshot = Snapshot::new(
            (0..6).map(|i| sched(&format!("S{i}"), 2 + i, 9)).collect(),
            vec![
                Invigilator::staff("I1", "A").with_quota(2),
                Invigilator::staff("I2", "B").with_quota(2),
            ],
        );
        let outcome = allocate(&snapshot, &AllocationConfig::default()).unwrap();

        assert_eq!(outcome.assignments.len(), 4);
        assert_eq!(outcome.unassigned.len(), 2);
        let load = crate::summary::load_by_invigilator(&outcome.assignments);
        assert!(load.values().all(|&n| n <= 2));
    }

    #[test]
    fn test_teaching_match_preferred_over_fallback() {
        // P2's subject sits second in store order, but still goes to its
        // teacher rather than the bigger-quota staff member
        let snapshot = Snapshot::new(
            vec![sched("S1", 2, 9), sched("S2", 3, 9).with_professor("P2")],
            vec![
                Invigilator::faculty("I2", "Dr. Boon", "P2").with_quota(1),
                Invigilator::staff("I3", "Ms. Siriporn").with_quota(10),
            ],
        );
        let outcome = allocate(&snapshot, &AllocationConfig::default()).unwrap();

        let s2 = outcome.assignments.iter().find(|a| a.schedule_id == "S2").unwrap();
        assert_eq!(s2.new_invigilator_id, "I2");
        assert!(s2.is_teaching_faculty);
        let s1 = outcome.assignments.iter().find(|a| a.schedule_id == "S1").unwrap();
        assert_eq!(s1.new_invigilator_id, "I3");
    }

    #[test]
    fn test_exclude_already_assigned() {
        let snapshot = Snapshot::new(
            vec![
                sched("S1", 2, 9).with_current_invigilator("I9"),
                sched("S2", 3, 9),
            ],
            vec![Invigilator::staff("I1", "A").with_quota(5)],
        );

        let outcome = allocate(&snapshot, &AllocationConfig::default()).unwrap();
        assert_eq!(outcome.assignments.len(), 1);
        assert_eq!(outcome.assignments[0].schedule_id, "S2");
        assert_eq!(outcome.summary.total_schedules, 1);
        // Average quota still targets the full snapshot
        assert_eq!(outcome.summary.average_quota, 2);

        let config = AllocationConfig::default().with_exclude_already_assigned(false);
        let outcome = allocate(&snapshot, &config).unwrap();
        assert_eq!(outcome.assignments.len(), 2);
        let s1 = outcome.assignments.iter().find(|a| a.schedule_id == "S1").unwrap();
        assert_eq!(s1.current_invigilator_id.as_deref(), Some("I9"));
    }

    #[test]
    fn test_summary_by_type() {
        let snapshot = Snapshot::new(
            vec![sched("S1", 2, 9).with_professor("P1"), sched("S2", 3, 9)],
            vec![
                Invigilator::faculty("I1", "Dr. Arun", "P1").with_quota(2),
                Invigilator::staff("I2", "Ms. Siriporn").with_quota(2),
            ],
        );
        let outcome = allocate(&snapshot, &AllocationConfig::default()).unwrap();
        assert_eq!(outcome.summary.faculty_assignments, 1);
        assert_eq!(outcome.summary.staff_assignments, 1);
        assert!(outcome
            .assignments
            .iter()
            .any(|a| a.invigilator_type == InvigilatorType::Faculty));
    }

    #[test]
    fn test_empty_inputs() {
        let outcome = allocate(&Snapshot::default(), &AllocationConfig::default()).unwrap();
        assert!(outcome.assignments.is_empty());
        assert!(outcome.unassigned.is_empty());
        assert_eq!(outcome.conflict_pairs, 0);
        assert_eq!(outcome.summary.average_quota, 0);
    }

    #[test]
    fn test_preview_propagates_snapshot_failure() {
        struct Failing;
        impl SnapshotSource for Failing {
            fn fetch(&self, _: &ScheduleFilter) -> Result<Snapshot, SnapshotError> {
                Err(SnapshotError::new("store unreachable"))
            }
        }

        let err = preview(&Failing, &ScheduleFilter::all(), &AllocationConfig::default());
        assert!(matches!(err, Err(EngineError::Snapshot(_))));
    }

    #[test]
    fn test_rerun_same_snapshot_is_identical() {
        // The run mutates only its own ledger, never the snapshot
        let snapshot = Snapshot::new(
            vec![sched("S1", 2, 9), sched("S2", 3, 9)],
            vec![Invigilator::staff("I1", "A").with_quota(1).with_assigned(0)],
        );
        let first = allocate(&snapshot, &AllocationConfig::default()).unwrap();
        let second = allocate(&snapshot, &AllocationConfig::default()).unwrap();

        assert_eq!(first.assignments.len(), second.assignments.len());
        assert_eq!(first.unassigned, second.unassigned);
        assert_eq!(snapshot.invigilators[0].assigned_quota, 0);
    }
}
