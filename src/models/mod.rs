//! Allocation domain models.
//!
//! Core data types for one allocation run: the immutable inputs
//! ([`ExamSchedule`], [`Invigilator`]) and the in-memory output
//! ([`Assignment`]). Inputs come from the surrounding application's store
//! via a snapshot; outputs live only until commit or cancel.

mod assignment;
mod invigilator;
mod schedule;

pub use assignment::{Assignment, TimeConflict};
pub use invigilator::{ExistingBooking, Invigilator, InvigilatorType};
pub use schedule::{ExamSchedule, ExamType, TimeSlot};
