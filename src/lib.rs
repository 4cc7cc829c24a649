//! Invigilator allocation engine for exam schedules.
//!
//! Matches exam sittings to a pool of invigilators under quota,
//! teaching-preference, and time-overlap constraints, then lets an
//! operator review, edit, and commit the result. The engine itself is
//! pure data-in/data-out: it works from a [`ports::Snapshot`] and
//! produces a preview of proposed [`models::Assignment`]s, never
//! writing to the store directly.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ExamSchedule`, `Invigilator`,
//!   `Assignment`, `TimeConflict`
//! - **`allocator`**: The two-pass greedy matcher (teaching preference,
//!   then quota-balanced fallback) and its policy configuration
//! - **`conflict`**: Double-booking detector for the preview
//! - **`edit`**: Manual override of individual preview assignments
//! - **`summary`**: Aggregate counts for the preview header
//! - **`validation`**: Snapshot integrity checks
//! - **`ports`**: Snapshot and commit seams to the surrounding store
//!
//! # Pipeline
//!
//! Fetch snapshot → [`allocator::allocate`] → review / [`edit`] →
//! [`ports::CommitSink::commit`]. Each run is stateless and
//! deterministic for a given snapshot and configuration; re-running
//! against a fresh snapshot is the supported way to react to store
//! changes.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"

pub mod allocator;
pub mod conflict;
pub mod edit;
pub mod error;
pub mod models;
pub mod ports;
pub mod summary;
pub mod validation;

pub use allocator::{allocate, preview, AllocationConfig, AllocationOutcome, ScheduleFilter};
pub use conflict::detect_conflicts;
pub use edit::{apply_override, OverrideOutcome, OverrideRequest};
pub use error::EngineError;
pub use models::{Assignment, ExamSchedule, Invigilator, InvigilatorType, TimeConflict, TimeSlot};
pub use ports::{CommitSink, Snapshot, SnapshotSource};
pub use summary::RunSummary;
