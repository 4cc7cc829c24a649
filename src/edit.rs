//! Manual override handler.
//!
//! Lets an operator replace the invigilator on one preview assignment.
//! The override is checked with the same coarse (date, slot) rule the
//! conflict detector uses: collisions against the candidate's other
//! preview assignments are surfaced, and when `avoid_same_time_slot` is
//! active the handler withholds the edit until the operator explicitly
//! confirms (fail-safe, not fail-closed — a confirmed operator may
//! proceed into a flagged state).
//!
//! An override never re-runs the matcher passes and never adjusts the
//! run ledger; the preview list is the authoritative state, and display
//! aggregates are recomputed from it (see [`crate::summary`]). Conflict
//! annotations for the previous and new invigilator are re-evaluated,
//! scoped to those two groups.

use tracing::warn;

use crate::allocator::AllocationConfig;
use crate::conflict::refresh_for_invigilator;
use crate::error::EngineError;
use crate::models::{Assignment, Invigilator, TimeConflict};

/// An operator request to put `invigilator` on the assignment at
/// `index`.
#[derive(Debug, Clone)]
pub struct OverrideRequest<'a> {
    /// Position of the target assignment in the preview list.
    pub index: usize,
    /// Replacement invigilator.
    pub invigilator: &'a Invigilator,
    /// Operator confirmation for proceeding despite collisions.
    pub confirmed: bool,
}

impl<'a> OverrideRequest<'a> {
    pub fn new(index: usize, invigilator: &'a Invigilator) -> Self {
        Self {
            index,
            invigilator,
            confirmed: false,
        }
    }

    /// Marks the request as operator-confirmed.
    pub fn confirmed(mut self) -> Self {
        self.confirmed = true;
        self
    }
}

/// Result of an override attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideOutcome {
    /// The edit was applied; the target now carries `conflicts`
    /// collisions (possibly zero).
    Applied { conflicts: usize },
    /// Collisions were found, `avoid_same_time_slot` is active, and the
    /// request was not confirmed. Nothing was changed; the collisions
    /// are returned for the operator to review.
    NeedsConfirmation { conflicts: Vec<TimeConflict> },
}

/// Collisions between the target assignment, under a candidate
/// invigilator, and that candidate's other assignments in the preview.
pub fn preview_conflicts(
    assignments: &[Assignment],
    index: usize,
    invigilator: &Invigilator,
) -> Result<Vec<TimeConflict>, EngineError> {
    let target = assignments
        .get(index)
        .ok_or(EngineError::InvalidAssignmentIndex(index))?;

    Ok(assignments
        .iter()
        .enumerate()
        .filter(|(idx, a)| {
            *idx != index && a.new_invigilator_id == invigilator.id && a.collides_with(target)
        })
        .map(|(_, a)| a.as_conflict())
        .collect())
}

/// Replaces the invigilator on one preview assignment.
///
/// When collisions are found and `avoid_same_time_slot` is on, an
/// unconfirmed request returns [`OverrideOutcome::NeedsConfirmation`]
/// without touching the list. Otherwise the target's invigilator fields
/// are replaced, its quota display values are snapshotted from the
/// candidate, `is_teaching_faculty` is cleared (an operator override is
/// not a teaching-preference match), and conflict annotations for both
/// affected invigilators are re-evaluated.
pub fn apply_override(
    assignments: &mut [Assignment],
    request: &OverrideRequest<'_>,
    config: &AllocationConfig,
) -> Result<OverrideOutcome, EngineError> {
    let conflicts = preview_conflicts(assignments, request.index, request.invigilator)?;

    if !conflicts.is_empty() && config.avoid_same_time_slot && !request.confirmed {
        warn!(
            index = request.index,
            invigilator = %request.invigilator.id,
            collisions = conflicts.len(),
            "override withheld pending confirmation"
        );
        return Ok(OverrideOutcome::NeedsConfirmation { conflicts });
    }

    let previous_invigilator = assignments[request.index].new_invigilator_id.clone();

    let target = &mut assignments[request.index];
    target.new_invigilator_id = request.invigilator.id.clone();
    target.new_invigilator_name = request.invigilator.display_name.clone();
    target.invigilator_type = request.invigilator.invigilator_type;
    target.invigilator_department = request.invigilator.department.clone();
    target.quota_used = request.invigilator.assigned_quota;
    target.quota_total = request.invigilator.quota;
    target.is_teaching_faculty = false;
    target.other_assignments = request.invigilator.other_assignments_label();

    if previous_invigilator != request.invigilator.id {
        refresh_for_invigilator(assignments, &previous_invigilator);
    }
    refresh_for_invigilator(assignments, &request.invigilator.id);

    Ok(OverrideOutcome::Applied {
        conflicts: assignments[request.index].conflict_count(),
    })
}
