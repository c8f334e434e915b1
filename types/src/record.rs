//! Stored record shapes for the four persisted collections.
//!
//! Field names and value encodings are the on-disk contract: they must stay
//! interoperable with existing stored data, so every serde attribute here is
//! load-bearing. Dates are `YYYY-MM-DD` strings; the engine parses them at
//! the point of comparison rather than at the storage boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Account role. Determines which workflow operations a principal may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Professor,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account, created at seed time and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// SHA-256 hex digest of the account secret.
    pub password_hash: String,
}

/// A thesis course offered by a professor. Capacity is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub professor_id: String,
    pub year: i64,
    pub semester: String,
    pub capacity: u32,
    pub resources: String,
    pub sessions: u32,
    pub credits: u32,
}

/// Lifecycle status of a thesis proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProposalStatus {
    /// An active proposal blocks the student from submitting another one.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, ProposalStatus::Pending | ProposalStatus::Approved)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

/// A student's request to undertake a thesis topic under a specific course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal_id: String,
    pub student_id: String,
    pub course_id: String,
    /// `YYYY-MM-DD`.
    pub request_date: String,
    pub status: ProposalStatus,
    /// `YYYY-MM-DD`; set only when the proposal is approved.
    pub approval_date: Option<String>,
}

/// Lifecycle status of a thesis, from defense request to the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThesisStatus {
    DefensePending,
    DefenseApproved,
    DefenseRejected,
    Graded,
    /// Terminal archival state. No workflow transition produces it; it is an
    /// externally settable marker carried for stored data that has it.
    Defended,
}

impl ThesisStatus {
    /// Archived theses are the candidate set for search and reporting.
    #[must_use]
    pub fn is_archived(self) -> bool {
        matches!(self, ThesisStatus::Graded | ThesisStatus::Defended)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ThesisStatus::DefensePending => "defense_pending",
            ThesisStatus::DefenseApproved => "defense_approved",
            ThesisStatus::DefenseRejected => "defense_rejected",
            ThesisStatus::Graded => "graded",
            ThesisStatus::Defended => "defended",
        }
    }
}

/// A thesis, created 1:1 from an approved proposal when the student requests
/// a defense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thesis {
    pub thesis_id: String,
    pub proposal_id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Comma-separated, as entered by the student.
    pub keywords: String,
    pub pdf_path: String,
    pub cover_image_path: String,
    pub status: ThesisStatus,
    /// `YYYY-MM-DD`.
    pub defense_request_date: String,
    /// `YYYY-MM-DD`; stored data omits the key until the defense is approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_date: Option<String>,
    /// Grader id -> score in [0, 20]. Ordered map keeps serialization stable.
    pub grades: BTreeMap<String, f64>,
    /// Exactly two professor ids once the defense is approved.
    pub reviewers: Vec<String>,
}
