//! Professor-side operations: proposal decisions, defense decisions,
//! grading, load, and the performance report.

use gradtrack_types::{
    Course, Decision, DefenseDecision, DefenseQueueEntry, GRADE_MAX, GRADE_MIN, PendingProposal,
    PerformanceReport, ProfessorLoad, Proposal, ProposalStatus, ReviewQueueEntry, SupervisedThesis,
    ThesisStatus, WorkflowError, mean_grade,
};

use gradtrack_store::Gateway;

use crate::clock::{format_date, parse_date};
use crate::workflow::Workflow;

/// Most approved proposals a professor may supervise at once.
pub const SUPERVISION_LIMIT: u32 = 5;
/// Most concurrent reviewer assignments. Displayed alongside the load;
/// assignment itself is not refused at the limit.
pub const REVIEW_LIMIT: u32 = 10;

/// Capability handle for an authenticated professor.
pub struct ProfessorOps<'a, S: Gateway> {
    workflow: &'a Workflow<S>,
    professor_id: String,
}

impl<S: Gateway> std::fmt::Debug for ProfessorOps<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfessorOps")
            .field("professor_id", &self.professor_id)
            .finish_non_exhaustive()
    }
}

impl<'a, S: Gateway> ProfessorOps<'a, S> {
    pub(crate) fn new(workflow: &'a Workflow<S>, professor_id: String) -> Self {
        Self {
            workflow,
            professor_id,
        }
    }

    /// Ownership rule: a professor supervises a proposal when they own the
    /// course it was submitted against.
    fn supervises(&self, courses: &[Course], proposal: &Proposal) -> bool {
        courses
            .iter()
            .any(|c| c.id == proposal.course_id && c.professor_id == self.professor_id)
    }

    /// Current supervision and review load against the fixed limits.
    #[must_use]
    pub fn load(&self) -> ProfessorLoad {
        let courses = self.workflow.store.courses();
        let supervision = self
            .workflow
            .store
            .proposals()
            .iter()
            .filter(|p| p.status == ProposalStatus::Approved && self.supervises(&courses, p))
            .count() as u32;
        let review = self
            .workflow
            .store
            .theses()
            .iter()
            .filter(|t| t.reviewers.iter().any(|r| r == &self.professor_id))
            .count() as u32;

        ProfessorLoad {
            supervision,
            supervision_limit: SUPERVISION_LIMIT,
            review,
            review_limit: REVIEW_LIMIT,
        }
    }

    /// Pending proposals on this professor's courses, joined with student
    /// and course. Entries whose joins cannot be resolved are dropped.
    #[must_use]
    pub fn pending_proposals(&self) -> Vec<PendingProposal> {
        let users = self.workflow.store.users();
        let courses = self.workflow.store.courses();

        self.workflow
            .store
            .proposals()
            .into_iter()
            .filter(|p| p.status == ProposalStatus::Pending && self.supervises(&courses, p))
            .filter_map(|proposal| {
                let student = users.iter().find(|u| u.id == proposal.student_id);
                let course = courses.iter().find(|c| c.id == proposal.course_id);
                match (student, course) {
                    (Some(student), Some(course)) => Some(PendingProposal {
                        proposal,
                        student: student.clone(),
                        course: course.clone(),
                    }),
                    _ => {
                        tracing::warn!(
                            proposal = %proposal.proposal_id,
                            "Skipping proposal with unresolvable student or course"
                        );
                        None
                    }
                }
            })
            .collect()
    }

    /// Approve or reject a proposal on one of this professor's courses.
    ///
    /// Approval is refused at the supervision limit, stamps the approval
    /// date, and force-rejects every other pending proposal of the same
    /// student so the at-most-one-active rule holds transactionally. The
    /// collection is persisted exactly once per call.
    pub fn decide_proposal(
        &self,
        proposal_id: &str,
        decision: Decision,
    ) -> Result<(), WorkflowError> {
        let courses = self.workflow.store.courses();
        let mut proposals = self.workflow.store.proposals();

        let index = proposals
            .iter()
            .position(|p| p.proposal_id == proposal_id && self.supervises(&courses, p))
            .ok_or_else(|| WorkflowError::not_found("proposal", proposal_id))?;

        if decision == Decision::Approved {
            let supervision = proposals
                .iter()
                .filter(|p| p.status == ProposalStatus::Approved && self.supervises(&courses, p))
                .count() as u32;
            if supervision >= SUPERVISION_LIMIT {
                return Err(WorkflowError::CapacityExceeded {
                    limit: SUPERVISION_LIMIT,
                });
            }
        }

        match decision {
            Decision::Approved => {
                proposals[index].status = ProposalStatus::Approved;
                proposals[index].approval_date = Some(format_date(self.workflow.clock.today()));

                // Cascade: the student's other pending proposals lose, silently.
                let student_id = proposals[index].student_id.clone();
                for other in &mut proposals {
                    if other.student_id == student_id && other.status == ProposalStatus::Pending {
                        other.status = ProposalStatus::Rejected;
                    }
                }
            }
            Decision::Rejected => {
                proposals[index].status = ProposalStatus::Rejected;
            }
        }

        self.workflow.store.save_proposals(&proposals)?;
        tracing::debug!(
            professor = %self.professor_id,
            proposal = %proposal_id,
            decision = decision.as_str(),
            "Proposal decided"
        );
        Ok(())
    }

    /// Defense requests waiting on this professor, joined with the student.
    #[must_use]
    pub fn pending_defense_requests(&self) -> Vec<DefenseQueueEntry> {
        let users = self.workflow.store.users();
        let courses = self.workflow.store.courses();
        let proposals = self.workflow.store.proposals();

        self.workflow
            .store
            .theses()
            .into_iter()
            .filter(|t| t.status == ThesisStatus::DefensePending)
            .filter_map(|thesis| {
                let proposal = proposals
                    .iter()
                    .find(|p| p.proposal_id == thesis.proposal_id)?;
                if !self.supervises(&courses, proposal) {
                    return None;
                }
                let Some(student) = users.iter().find(|u| u.id == proposal.student_id) else {
                    tracing::warn!(
                        thesis = %thesis.thesis_id,
                        "Skipping defense request with unresolvable student"
                    );
                    return None;
                };
                Some(DefenseQueueEntry {
                    thesis,
                    student: student.clone(),
                })
            })
            .collect()
    }

    /// Approve or reject a defense request.
    ///
    /// Approval carries the scheduled date and exactly two reviewer ids,
    /// both stored verbatim. Reviewer ids are not checked against the user
    /// collection and are not required to differ from the supervisor; see
    /// the non-distinct-reviewer tests for the documented consequence.
    /// Ownership is enforced by the listing surface
    /// ([`Self::pending_defense_requests`]), not re-validated here.
    pub fn decide_defense(
        &self,
        thesis_id: &str,
        decision: DefenseDecision,
    ) -> Result<(), WorkflowError> {
        let mut theses = self.workflow.store.theses();
        let thesis = theses
            .iter_mut()
            .find(|t| t.thesis_id == thesis_id)
            .ok_or_else(|| WorkflowError::not_found("thesis", thesis_id))?;

        match decision {
            DefenseDecision::Approve {
                defense_date,
                reviewers,
            } => {
                thesis.status = ThesisStatus::DefenseApproved;
                thesis.defense_date = Some(defense_date);
                thesis.reviewers = reviewers.into();
            }
            DefenseDecision::Reject => {
                thesis.status = ThesisStatus::DefenseRejected;
            }
        }

        self.workflow.store.save_theses(&theses)?;
        tracing::debug!(
            professor = %self.professor_id,
            thesis = %thesis_id,
            "Defense decided"
        );
        Ok(())
    }

    /// Approved defenses where this professor is an assigned reviewer.
    #[must_use]
    pub fn theses_to_review(&self) -> Vec<ReviewQueueEntry> {
        let users = self.workflow.store.users();
        let proposals = self.workflow.store.proposals();

        self.workflow
            .store
            .theses()
            .into_iter()
            .filter(|t| {
                t.status == ThesisStatus::DefenseApproved
                    && t.reviewers.iter().any(|r| r == &self.professor_id)
            })
            .filter_map(|thesis| {
                let student = proposals
                    .iter()
                    .find(|p| p.proposal_id == thesis.proposal_id)
                    .and_then(|p| users.iter().find(|u| u.id == p.student_id));
                let Some(student) = student else {
                    tracing::warn!(
                        thesis = %thesis.thesis_id,
                        "Skipping review entry with unresolvable student"
                    );
                    return None;
                };
                Some(ReviewQueueEntry {
                    thesis,
                    student: student.clone(),
                })
            })
            .collect()
    }

    /// Record this professor's grade for a thesis.
    ///
    /// Refused before the stored defense date (day granularity).
    /// Resubmission overwrites the previous score - idempotent per grader.
    /// Once the full grader set ({supervisor} union reviewers) has
    /// submitted, the thesis flips to `graded`; until then the status is
    /// untouched. Returns the status after the call.
    pub fn submit_grade(
        &self,
        thesis_id: &str,
        grade: f64,
    ) -> Result<ThesisStatus, WorkflowError> {
        if !(GRADE_MIN..=GRADE_MAX).contains(&grade) {
            return Err(WorkflowError::validation(format!(
                "grade must be between {GRADE_MIN} and {GRADE_MAX}"
            )));
        }

        let mut theses = self.workflow.store.theses();
        let thesis = theses
            .iter_mut()
            .find(|t| t.thesis_id == thesis_id)
            .ok_or_else(|| WorkflowError::not_found("thesis", thesis_id))?;

        let defense_date_str =
            thesis
                .defense_date
                .as_deref()
                .ok_or_else(|| WorkflowError::MissingDefenseDate {
                    thesis_id: thesis_id.to_string(),
                })?;
        let defense_date = parse_date(defense_date_str).ok_or_else(|| {
            WorkflowError::validation(format!(
                "stored defense date '{defense_date_str}' is not a valid date"
            ))
        })?;

        if self.workflow.clock.today() < defense_date {
            return Err(WorkflowError::TooEarly(format!(
                "the defense session is scheduled for {defense_date_str}"
            )));
        }

        thesis.grades.insert(self.professor_id.clone(), grade);

        // Complete grader set: the two reviewers plus the supervising
        // professor, derived thesis -> proposal -> course.
        let supervisor = self
            .workflow
            .store
            .proposals()
            .iter()
            .find(|p| p.proposal_id == thesis.proposal_id)
            .and_then(|p| {
                self.workflow
                    .store
                    .courses()
                    .into_iter()
                    .find(|c| c.id == p.course_id)
            })
            .map(|c| c.professor_id);

        match supervisor {
            Some(supervisor_id) => {
                let mut graders: Vec<&str> =
                    thesis.reviewers.iter().map(String::as_str).collect();
                graders.push(&supervisor_id);
                if graders.iter().all(|g| thesis.grades.contains_key(*g)) {
                    thesis.status = ThesisStatus::Graded;
                }
            }
            None => {
                // Unresolvable join: record the grade but leave the status
                // alone rather than guessing at the grader set.
                tracing::warn!(
                    thesis = %thesis_id,
                    "Cannot derive supervisor for grading consensus; status unchanged"
                );
            }
        }

        let status = thesis.status;
        self.workflow.store.save_theses(&theses)?;
        tracing::debug!(
            professor = %self.professor_id,
            thesis = %thesis_id,
            status = status.as_str(),
            "Grade recorded"
        );
        Ok(status)
    }

    /// Supervision and review record over archived (graded or defended)
    /// theses, with per-student mean grades.
    #[must_use]
    pub fn performance_report(&self) -> PerformanceReport {
        let users = self.workflow.store.users();
        let courses = self.workflow.store.courses();
        let proposals = self.workflow.store.proposals();

        let mut report = PerformanceReport::default();

        for thesis in self
            .workflow
            .store
            .theses()
            .into_iter()
            .filter(|t| t.status.is_archived())
        {
            let proposal = proposals
                .iter()
                .find(|p| p.proposal_id == thesis.proposal_id);

            if let Some(proposal) = proposal {
                if self.supervises(&courses, proposal) {
                    report.supervised_count += 1;
                    let student_name = users
                        .iter()
                        .find(|u| u.id == proposal.student_id)
                        .map_or_else(|| "N/A".to_string(), |u| u.name.clone());
                    report.supervised.push(SupervisedThesis {
                        student_name,
                        thesis_title: thesis.title.clone(),
                        final_grade: format!("{:.2}", mean_grade(&thesis.grades)),
                    });
                }
            }

            if thesis.reviewers.iter().any(|r| r == &self.professor_id) {
                report.reviewed_count += 1;
            }
        }

        report
    }
}
