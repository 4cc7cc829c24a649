//! Time-availability guard shared by both matcher passes.
//!
//! Answers one question: may this candidate invigilator take this
//! sitting, given everything they are already booked for? "Already booked"
//! covers both persisted bookings from the snapshot and assignments
//! proposed earlier in the same run.
//!
//! The guard applies the fine start/end interval test (prevention). The
//! coarse (date, slot-label) test used for *reporting* lives in the
//! conflict detector; the guard only borrows the coarse label when
//! `avoid_same_time_slot` asks for stricter prevention.

use crate::models::{ExamSchedule, ExistingBooking};

use super::config::AllocationConfig;

/// Whether a candidate with the given bookings may take `schedule`.
///
/// Always true when `respect_time_constraints` is off. Otherwise a
/// booking on the same calendar day blocks the candidate if any of:
///
/// - same-day pairing is disallowed (`allow_same_day_different_slot`
///   off),
/// - its time range intersects the sitting (inclusive bounds),
/// - it carries the same slot label and `avoid_same_time_slot` is on.
pub(crate) fn is_available(
    bookings: &[ExistingBooking],
    schedule: &ExamSchedule,
    config: &AllocationConfig,
) -> bool {
    if !config.respect_time_constraints {
        return true;
    }
    for booking in bookings {
        if booking.date != schedule.date {
            continue;
        }
        if !config.allow_same_day_different_slot {
            return false;
        }
        if schedule.intersects(booking.start_time, booking.end_time) {
            return false;
        }
        if config.avoid_same_time_slot && booking.time_slot == schedule.time_slot {
            return false;
        }
    }
    true
}
