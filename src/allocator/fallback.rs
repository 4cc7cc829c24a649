//! Quota-balanced fallback pass.
//!
//! Second allocation pass: place the sittings the teaching-preference
//! pass left behind, drawing from the whole pool. With
//! `prioritize_quota` the pool is scanned most-remaining-capacity first
//! (stable sort, computed once from the post-first-pass ledger); ties
//! keep pool order.
//!
//! A professor is never given their own subject here: a sitting reaching
//! this pass was already offered to its teachers in the first pass and
//! none qualified, and a fallback placement carries different semantics
//! (`is_teaching_faculty = false`) than a teaching match.

use tracing::debug;

use crate::error::EngineError;
use crate::models::{ExamSchedule, Invigilator};

use super::config::AllocationConfig;
use super::guard::is_available;
use super::RunState;

/// Assigns remaining sittings from the general pool.
///
/// Sittings no invigilator qualifies for stay unassigned; that is a
/// shortfall for the summary, not an error.
pub(crate) fn run(
    schedules: &[ExamSchedule],
    pool: &[Invigilator],
    config: &AllocationConfig,
    state: &mut RunState,
) -> Result<(), EngineError> {
    let mut order: Vec<&Invigilator> = pool.iter().collect();
    if config.prioritize_quota {
        order.sort_by(|a, b| state.ledger.remaining(&b.id).cmp(&state.ledger.remaining(&a.id)));
    }

    for schedule in schedules {
        if state.is_assigned(&schedule.id) {
            continue;
        }

        let accepted = order.iter().find(|inv| {
            state.ledger.has_capacity(&inv.id)
                && !inv.teaches(schedule)
                && is_available(&inv.existing_schedules, schedule, config)
                && is_available(state.proposed_for(&inv.id), schedule, config)
        });

        if let Some(inv) = accepted {
            debug!(
                schedule = %schedule.id,
                invigilator = %inv.id,
                remaining = state.ledger.remaining(&inv.id),
                "fallback match"
            );
            state.accept(schedule, inv, false)?;
        }
    }
    Ok(())
}
