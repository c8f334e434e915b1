//! The workflow engine and its role-neutral operations.

use gradtrack_types::{
    ArchiveEntry, Course, CourseAvailability, Principal, ProposalStatus, Role, SearchField,
    WorkflowError,
};

use gradtrack_store::Gateway;

use crate::archive;
use crate::clock::{Clock, SystemClock, TokenGen, UuidTokens};
use crate::credential;
use crate::professor::ProfessorOps;
use crate::student::StudentOps;

/// The workflow engine over a persistence gateway.
///
/// Holds no domain state of its own: every operation reads what it needs
/// from the gateway and writes back the full mutated collection. Role-gated
/// operations hang off the capability handles returned by [`Workflow::student`]
/// and [`Workflow::professor`].
pub struct Workflow<S: Gateway> {
    pub(crate) store: S,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) tokens: Box<dyn TokenGen>,
}

impl<S: Gateway> Workflow<S> {
    /// Wire the engine with wall-clock time and UUID-derived tokens.
    pub fn new(store: S) -> Self {
        Self::with_collaborators(store, Box::new(SystemClock), Box::new(UuidTokens))
    }

    /// Wire the engine with explicit collaborators. Tests use this to pin
    /// the current date and make generated ids predictable.
    pub fn with_collaborators(
        store: S,
        clock: Box<dyn Clock>,
        tokens: Box<dyn TokenGen>,
    ) -> Self {
        Self {
            store,
            clock,
            tokens,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Authenticate a user id + secret against the stored credential digest.
    ///
    /// Read-only; returns the typed principal carried by every role-gated
    /// entry point.
    pub fn authenticate(&self, user_id: &str, secret: &str) -> Result<Principal, WorkflowError> {
        let users = self.store.users();
        let user = users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| WorkflowError::not_found("user", user_id))?;

        if !credential::verify_secret(secret, &user.password_hash) {
            return Err(WorkflowError::InvalidCredential);
        }

        Ok(Principal {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        })
    }

    /// Student capability handle for `principal`.
    pub fn student(&self, principal: &Principal) -> Result<StudentOps<'_, S>, WorkflowError> {
        if principal.role != Role::Student {
            return Err(WorkflowError::RoleMismatch {
                expected: Role::Student,
            });
        }
        Ok(StudentOps::new(self, principal.id.clone()))
    }

    /// Professor capability handle for `principal`.
    pub fn professor(&self, principal: &Principal) -> Result<ProfessorOps<'_, S>, WorkflowError> {
        if principal.role != Role::Professor {
            return Err(WorkflowError::RoleMismatch {
                expected: Role::Professor,
            });
        }
        Ok(ProfessorOps::new(self, principal.id.clone()))
    }

    /// Seats left on a course: capacity minus approved proposals.
    ///
    /// Derived per read, never cached. Clamped at zero for display; stored
    /// data is never silently corrected.
    #[must_use]
    pub fn remaining_capacity(&self, course: &Course) -> u32 {
        let approved = self
            .store
            .proposals()
            .iter()
            .filter(|p| p.course_id == course.id && p.status == ProposalStatus::Approved)
            .count() as u32;
        course.capacity.saturating_sub(approved)
    }

    /// Courses with at least one open seat, in storage order, joined with
    /// the supervising professor's name.
    #[must_use]
    pub fn available_courses(&self) -> Vec<CourseAvailability> {
        let users = self.store.users();
        let proposals = self.store.proposals();

        self.store
            .courses()
            .into_iter()
            .filter_map(|course| {
                let approved = proposals
                    .iter()
                    .filter(|p| p.course_id == course.id && p.status == ProposalStatus::Approved)
                    .count() as u32;
                let remaining = course.capacity.saturating_sub(approved);
                if remaining == 0 {
                    return None;
                }
                let supervisor_name = users
                    .iter()
                    .find(|u| u.id == course.professor_id)
                    .map_or_else(|| "N/A".to_string(), |u| u.name.clone());
                Some(CourseAvailability {
                    course,
                    supervisor_name,
                    remaining,
                })
            })
            .collect()
    }

    /// Search the archive of completed theses. Open to every role.
    #[must_use]
    pub fn search_archive(&self, query: &str, field: SearchField) -> Vec<ArchiveEntry> {
        archive::search(self, query, field)
    }
}
