//! Core domain types for GradTrack.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application: the stored record shapes, lifecycle status enums, the error
//! taxonomy, and the read-side view types produced by the workflow engine.

mod error;
mod grade;
mod record;
mod views;

pub use error::{StoreError, WorkflowError};
pub use grade::{GRADE_MAX, GRADE_MIN, LetterGrade, mean_grade};
pub use record::{
    Course, Proposal, ProposalStatus, Role, Thesis, ThesisStatus, User,
};
pub use views::{
    ArchiveEntry, CourseAvailability, Decision, DefenseDecision, DefenseQueueEntry,
    DefenseRequest, PendingProposal, PerformanceReport, Principal, ProfessorLoad,
    ReviewQueueEntry, SearchField, StudentStatus, SupervisedThesis,
};
