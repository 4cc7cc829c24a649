//! Run summary counts.
//!
//! Aggregates for the preview header: how much was placed, against what
//! average target, and by whom. Always recomputed from the current
//! preview list — the override handler edits assignments in place without
//! touching any running totals, so the list is the only authoritative
//! state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Invigilator, InvigilatorType};

/// Aggregate counts for one allocation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Schedules the run considered (after the already-assigned filter).
    pub total_schedules: usize,
    /// Assignments in the preview.
    pub total_assigned: usize,
    /// Invigilators in the snapshot pool.
    pub total_invigilators: usize,
    /// Average quota target: `ceil(snapshot schedules / pool size)`.
    /// Zero when the pool is empty.
    pub average_quota: u32,
    /// Preview assignments going to teaching faculty invigilators.
    pub faculty_assignments: usize,
    /// Preview assignments going to staff invigilators.
    pub staff_assignments: usize,
}

impl RunSummary {
    /// Computes the summary from the preview list and the snapshot it
    /// was produced from.
    ///
    /// `snapshot_schedules` is the unfiltered schedule count (the basis
    /// for the average-quota target); `considered` is the count after the
    /// already-assigned filter.
    pub fn compute(
        assignments: &[Assignment],
        snapshot_schedules: usize,
        considered: usize,
        pool: &[Invigilator],
    ) -> Self {
        let average_quota = if pool.is_empty() {
            0
        } else {
            (snapshot_schedules as u32).div_ceil(pool.len() as u32)
        };

        let faculty_assignments = assignments
            .iter()
            .filter(|a| a.invigilator_type == InvigilatorType::Faculty)
            .count();

        Self {
            total_schedules: considered,
            total_assigned: assignments.len(),
            total_invigilators: pool.len(),
            average_quota,
            faculty_assignments,
            staff_assignments: assignments.len() - faculty_assignments,
        }
    }

    /// Shortfall: considered schedules left without an invigilator.
    pub fn unassigned(&self) -> usize {
        self.total_schedules - self.total_assigned
    }
}

/// Per-invigilator load in the current preview, recomputed on demand.
pub fn load_by_invigilator(assignments: &[Assignment]) -> HashMap<String, usize> {
    let mut load = HashMap::new();
    for a in assignments {
        *load.entry(a.new_invigilator_id.clone()).or_insert(0) += 1;
    }
    load
}
