//! In-process implementation of the persistence gateway.

use std::cell::RefCell;

use gradtrack_types::{Course, Proposal, StoreError, Thesis, User};

use crate::Gateway;

/// Collections held in memory. Used by tests and ephemeral runs; follows the
/// same read-all / write-all contract as the flat-file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RefCell<Vec<User>>,
    courses: RefCell<Vec<Course>>,
    proposals: RefCell<Vec<Proposal>>,
    theses: RefCell<Vec<Thesis>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed users and courses in one step.
    #[must_use]
    pub fn with_data(users: Vec<User>, courses: Vec<Course>) -> Self {
        let store = Self::new();
        *store.users.borrow_mut() = users;
        *store.courses.borrow_mut() = courses;
        store
    }
}

impl Gateway for MemoryStore {
    fn users(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    fn courses(&self) -> Vec<Course> {
        self.courses.borrow().clone()
    }

    fn proposals(&self) -> Vec<Proposal> {
        self.proposals.borrow().clone()
    }

    fn theses(&self) -> Vec<Thesis> {
        self.theses.borrow().clone()
    }

    fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        *self.users.borrow_mut() = users.to_vec();
        Ok(())
    }

    fn save_courses(&self, courses: &[Course]) -> Result<(), StoreError> {
        *self.courses.borrow_mut() = courses.to_vec();
        Ok(())
    }

    fn save_proposals(&self, proposals: &[Proposal]) -> Result<(), StoreError> {
        *self.proposals.borrow_mut() = proposals.to_vec();
        Ok(())
    }

    fn save_theses(&self, theses: &[Thesis]) -> Result<(), StoreError> {
        *self.theses.borrow_mut() = theses.to_vec();
        Ok(())
    }
}
