//! Snapshot validation.
//!
//! Checks structural integrity of a snapshot before a run. Detects:
//! - Duplicate IDs (schedules and invigilators)
//! - Inverted time ranges
//! - Quota counters already over their cap
//! - Dangling invigilator references on schedules
//!
//! Validation is advisory: the allocator itself tolerates odd inputs
//! (an over-quota invigilator simply never has capacity), but running
//! it over garbage produces previews that are hard to reason about.

use std::collections::HashSet;

use crate::ports::Snapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A schedule ends at or before it starts.
    InvalidTimeRange,
    /// An invigilator's assigned counter exceeds their quota.
    QuotaExceeded,
    /// A schedule references an invigilator not in the pool.
    UnknownInvigilator,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a snapshot.
///
/// Checks:
/// 1. No duplicate schedule IDs
/// 2. No duplicate invigilator IDs
/// 3. Every schedule's end time is after its start time
/// 4. No invigilator's assigned counter exceeds their quota
/// 5. Every `current_invigilator_id` points into the pool
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &Snapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut invigilator_ids = HashSet::new();
    for inv in &snapshot.invigilators {
        if !invigilator_ids.insert(inv.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate invigilator ID: {}", inv.id),
            ));
        }

        if inv.assigned_quota > inv.quota {
            errors.push(ValidationError::new(
                ValidationErrorKind::QuotaExceeded,
                format!(
                    "Invigilator '{}' is assigned {} of quota {}",
                    inv.id, inv.assigned_quota, inv.quota
                ),
            ));
        }
    }

    let mut schedule_ids = HashSet::new();
    for schedule in &snapshot.schedules {
        if !schedule_ids.insert(schedule.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate schedule ID: {}", schedule.id),
            ));
        }

        if schedule.end_time <= schedule.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                format!(
                    "Schedule '{}' ends at or before it starts ({} .. {})",
                    schedule.id, schedule.start_time, schedule.end_time
                ),
            ));
        }

        if let Some(inv_id) = &schedule.current_invigilator_id {
            if !invigilator_ids.contains(inv_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownInvigilator,
                    format!(
                        "Schedule '{}' references unknown invigilator '{}'",
                        schedule.id, inv_id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
