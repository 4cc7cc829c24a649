//! Conflict detector for the assignment preview.
//!
//! Finds invigilators double-booked in the preview and annotates the
//! affected assignments. Two assignments conflict when they share the
//! same invigilator, the same calendar day, and the same time-slot
//! label — the canonical, human-facing definition of "conflict" in this
//! crate. It is deliberately coarser than the start/end interval test the
//! matcher passes use for prevention: two sittings in one labeled slot
//! are the same meeting period to a reviewer even when their minute
//! bounds differ.
//!
//! Conflicts are surfaced, never auto-resolved: no assignment is dropped
//! or rewritten, only its `time_conflicts` list is filled in. Stale
//! annotations are cleared first, so running the detector twice over an
//! unchanged list yields the same result.

use std::collections::HashMap;

use tracing::warn;

use crate::models::Assignment;

/// Annotates all same-(invigilator, date, slot) collisions in the list,
/// symmetrically, and returns the number of colliding pairs.
pub fn detect_conflicts(assignments: &mut [Assignment]) -> usize {
    for a in assignments.iter_mut() {
        a.time_conflicts = None;
    }

    // Group indices by invigilator, preserving first-seen order so the
    // annotation order is deterministic.
    let mut group_of: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (idx, a) in assignments.iter().enumerate() {
        match group_of.get(&a.new_invigilator_id) {
            Some(&g) => groups[g].push(idx),
            None => {
                group_of.insert(a.new_invigilator_id.clone(), groups.len());
                groups.push(vec![idx]);
            }
        }
    }

    let mut pairs = 0;
    for group in &mut groups {
        group.sort_by(|&a, &b| {
            (assignments[a].date, assignments[a].time_slot)
                .cmp(&(assignments[b].date, assignments[b].time_slot))
        });

        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let (a, b) = (group[i], group[j]);
                if !assignments[a].collides_with(&assignments[b]) {
                    continue;
                }
                let conflict_for_a = assignments[b].as_conflict();
                let conflict_for_b = assignments[a].as_conflict();
                assignments[a]
                    .time_conflicts
                    .get_or_insert_with(Vec::new)
                    .push(conflict_for_a);
                assignments[b]
                    .time_conflicts
                    .get_or_insert_with(Vec::new)
                    .push(conflict_for_b);
                pairs += 1;
            }
        }
    }

    if pairs > 0 {
        warn!(pairs, "double-booked time slots in preview");
    }
    pairs
}

/// Re-evaluates conflicts for one invigilator's assignments only.
///
/// Used after a manual override: collisions only ever arise within one
/// invigilator's group, so clearing and re-annotating the affected
/// group(s) leaves every other annotation valid. Returns the group's
/// colliding-pair count.
pub fn refresh_for_invigilator(assignments: &mut [Assignment], invigilator_id: &str) -> usize {
    let mut group: Vec<usize> = Vec::new();
    for (idx, a) in assignments.iter_mut().enumerate() {
        if a.new_invigilator_id == invigilator_id {
            a.time_conflicts = None;
            group.push(idx);
        }
    }

    group.sort_by(|&a, &b| {
        (assignments[a].date, assignments[a].time_slot)
            .cmp(&(assignments[b].date, assignments[b].time_slot))
    });

    let mut pairs = 0;
    for i in 0..group.len() {
        for j in (i + 1)..group.len() {
            let (a, b) = (group[i], group[j]);
            if !assignments[a].collides_with(&assignments[b]) {
                continue;
            }
            let conflict_for_a = assignments[b].as_conflict();
            let conflict_for_b = assignments[a].as_conflict();
            assignments[a]
                .time_conflicts
                .get_or_insert_with(Vec::new)
                .push(conflict_for_a);
            assignments[b]
                .time_conflicts
                .get_or_insert_with(Vec::new)
                .push(conflict_for_b);
            pairs += 1;
        }
    }
    pairs
}
