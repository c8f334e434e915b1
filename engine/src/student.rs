//! Student-side operations: proposal submission, status, defense requests.

use chrono::Duration;

use gradtrack_types::{
    DefenseRequest, Proposal, ProposalStatus, StudentStatus, Thesis, ThesisStatus, WorkflowError,
};

use gradtrack_store::Gateway;

use crate::clock::{format_date, parse_date};
use crate::workflow::Workflow;

/// Days that must elapse between proposal approval and a defense request.
/// The gate is inclusive: a request exactly on day 90 is admitted.
pub const DEFENSE_WAIT_DAYS: i64 = 90;

/// Capability handle for an authenticated student.
pub struct StudentOps<'a, S: Gateway> {
    workflow: &'a Workflow<S>,
    student_id: String,
}

impl<S: Gateway> std::fmt::Debug for StudentOps<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentOps")
            .field("student_id", &self.student_id)
            .finish_non_exhaustive()
    }
}

impl<'a, S: Gateway> StudentOps<'a, S> {
    pub(crate) fn new(workflow: &'a Workflow<S>, student_id: String) -> Self {
        Self {
            workflow,
            student_id,
        }
    }

    /// Submit a thesis proposal against a course.
    ///
    /// A student may hold at most one proposal with status pending or
    /// approved; a second submission is refused. Submission is deliberately
    /// capacity-blind and existence-blind: open seats only filter the course
    /// listing, they do not gate submission itself.
    pub fn submit_proposal(&self, course_id: &str) -> Result<Proposal, WorkflowError> {
        let mut proposals = self.workflow.store.proposals();

        if proposals
            .iter()
            .any(|p| p.student_id == self.student_id && p.status.is_active())
        {
            return Err(WorkflowError::DuplicateActiveProposal);
        }

        let proposal = Proposal {
            proposal_id: self.workflow.tokens.generate(),
            student_id: self.student_id.clone(),
            course_id: course_id.to_string(),
            request_date: format_date(self.workflow.clock.today()),
            status: ProposalStatus::Pending,
            approval_date: None,
        };
        proposals.push(proposal.clone());
        self.workflow.store.save_proposals(&proposals)?;

        tracing::debug!(
            student = %self.student_id,
            course = %course_id,
            proposal = %proposal.proposal_id,
            "Proposal submitted"
        );
        Ok(proposal)
    }

    /// Where this student stands: no proposal yet, a proposal (joined with
    /// its course), or - once a thesis exists - the defense status, which
    /// supersedes the proposal for display.
    #[must_use]
    pub fn status(&self) -> StudentStatus {
        let proposals = self.workflow.store.proposals();
        let Some(proposal) = proposals.iter().find(|p| p.student_id == self.student_id) else {
            return StudentStatus::NoProposal;
        };

        let course = self
            .workflow
            .store
            .courses()
            .into_iter()
            .find(|c| c.id == proposal.course_id);

        let thesis = self
            .workflow
            .store
            .theses()
            .into_iter()
            .find(|t| t.proposal_id == proposal.proposal_id);

        match thesis {
            Some(thesis) => StudentStatus::Defense { thesis, course },
            None => StudentStatus::Proposal {
                proposal: proposal.clone(),
                course,
            },
        }
    }

    /// Request a defense against the student's approved proposal.
    ///
    /// Admitted only once 90 days have elapsed since the approval date.
    /// Creates the thesis in `defense_pending` with no reviewers and no
    /// grades.
    pub fn request_defense(&self, request: DefenseRequest) -> Result<Thesis, WorkflowError> {
        let proposals = self.workflow.store.proposals();
        let proposal = proposals
            .iter()
            .find(|p| {
                p.student_id == self.student_id && p.status == ProposalStatus::Approved
            })
            .ok_or(WorkflowError::NoApprovedProposal)?;

        let approval_date_str = proposal
            .approval_date
            .as_deref()
            .ok_or(WorkflowError::MissingApprovalDate)?;
        let approval_date = parse_date(approval_date_str).ok_or_else(|| {
            WorkflowError::validation(format!(
                "stored approval date '{approval_date_str}' is not a valid date"
            ))
        })?;

        let today = self.workflow.clock.today();
        if today < approval_date + Duration::days(DEFENSE_WAIT_DAYS) {
            return Err(WorkflowError::TooEarly(format!(
                "at least {DEFENSE_WAIT_DAYS} days must pass after proposal approval ({approval_date_str})"
            )));
        }

        let mut theses = self.workflow.store.theses();
        let thesis = Thesis {
            thesis_id: self.workflow.tokens.generate(),
            proposal_id: proposal.proposal_id.clone(),
            title: request.title,
            abstract_text: request.abstract_text,
            keywords: request.keywords,
            pdf_path: request.pdf_path,
            cover_image_path: request.cover_image_path,
            status: ThesisStatus::DefensePending,
            defense_request_date: format_date(today),
            defense_date: None,
            grades: std::collections::BTreeMap::new(),
            reviewers: Vec::new(),
        };
        theses.push(thesis.clone());
        self.workflow.store.save_theses(&theses)?;

        tracing::debug!(
            student = %self.student_id,
            thesis = %thesis.thesis_id,
            "Defense requested"
        );
        Ok(thesis)
    }
}
