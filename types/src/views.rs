//! Inputs and read-side views exchanged with the workflow engine.
//!
//! These are transient values assembled per operation by joining the stored
//! collections; none of them are persisted. Invalid shapes are kept
//! unrepresentable where practical (a defense approval *carries* its date
//! and its two reviewers) so the engine validates meaning, not structure.

use crate::record::{Course, Proposal, Role, Thesis, User};
use crate::LetterGrade;

/// An authenticated user, passed explicitly to role-gated entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Verdict on a pending proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::Rejected => "rejected",
        }
    }
}

/// Verdict on a pending defense request.
///
/// Approval requires a scheduled date and exactly two reviewers; both are
/// stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefenseDecision {
    Approve {
        /// `YYYY-MM-DD`.
        defense_date: String,
        reviewers: [String; 2],
    },
    Reject,
}

/// Everything a student supplies when requesting a defense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefenseRequest {
    pub title: String,
    pub abstract_text: String,
    /// Comma-separated.
    pub keywords: String,
    pub pdf_path: String,
    pub cover_image_path: String,
}

/// A course with open seats, as shown to students.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseAvailability {
    pub course: Course,
    pub supervisor_name: String,
    pub remaining: u32,
}

/// Where a student currently stands in the workflow.
///
/// Once a thesis exists its status supersedes the proposal's for display.
#[derive(Debug, Clone, PartialEq)]
pub enum StudentStatus {
    NoProposal,
    Proposal {
        proposal: Proposal,
        course: Option<Course>,
    },
    Defense {
        thesis: Thesis,
        course: Option<Course>,
    },
}

/// A pending proposal on one of the professor's courses, joined for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingProposal {
    pub proposal: Proposal,
    pub student: User,
    pub course: Course,
}

/// A pending defense request on one of the professor's courses.
#[derive(Debug, Clone, PartialEq)]
pub struct DefenseQueueEntry {
    pub thesis: Thesis,
    pub student: User,
}

/// An approved defense assigned to the professor for review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewQueueEntry {
    pub thesis: Thesis,
    pub student: User,
}

/// Current supervision and review load against the fixed limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfessorLoad {
    pub supervision: u32,
    pub supervision_limit: u32,
    pub review: u32,
    pub review_limit: u32,
}

/// One supervised, archived thesis in a performance report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisedThesis {
    pub student_name: String,
    pub thesis_title: String,
    /// Mean of recorded grades, formatted to two decimals.
    pub final_grade: String,
}

/// A professor's supervision and review record over archived theses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PerformanceReport {
    pub supervised_count: usize,
    pub reviewed_count: usize,
    pub supervised: Vec<SupervisedThesis>,
}

/// Which field an archive query matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Keyword,
    Author,
    Supervisor,
    Reviewer,
    Year,
}

impl SearchField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Keyword => "keyword",
            SearchField::Author => "author",
            SearchField::Supervisor => "supervisor",
            SearchField::Reviewer => "reviewer",
            SearchField::Year => "year",
        }
    }
}

impl std::str::FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SearchField::Title),
            "keyword" => Ok(SearchField::Keyword),
            "author" => Ok(SearchField::Author),
            "supervisor" => Ok(SearchField::Supervisor),
            "reviewer" => Ok(SearchField::Reviewer),
            "year" => Ok(SearchField::Year),
            other => Err(format!(
                "unknown search field '{other}' (expected title, keyword, author, supervisor, reviewer, or year)"
            )),
        }
    }
}

/// One archived thesis matched by a search query.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    pub author: String,
    pub year: i64,
    pub semester: String,
    pub supervisor: String,
    pub reviewers: Vec<String>,
    pub download_link: String,
    /// Mean of recorded grades, formatted to two decimals.
    pub final_grade_score: String,
    pub final_grade_letter: LetterGrade,
}
