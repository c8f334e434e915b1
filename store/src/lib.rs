//! Persistence gateway for GradTrack.
//!
//! The workflow engine treats storage as a collaborator exposing four named
//! collections - users, courses, proposals, theses - with read-all /
//! write-all as the only primitives. This crate defines that contract
//! ([`Gateway`]) and ships two implementations:
//!
//! - [`JsonStore`]: one pretty-printed JSON file per collection, written
//!   crash-safely (temp + rename)
//! - [`MemoryStore`]: in-process collections for tests and ephemeral runs
//!
//! Reads never fail: an absent or unreadable backing file is an empty
//! collection. Writes replace the whole collection.

pub mod atomic;
mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use gradtrack_types::{Course, Proposal, StoreError, Thesis, User};

/// Read-all / write-all access to the four persisted collections.
///
/// A full-collection write is the unit of durability; there is no
/// partial-record patching at this boundary.
pub trait Gateway {
    fn users(&self) -> Vec<User>;
    fn courses(&self) -> Vec<Course>;
    fn proposals(&self) -> Vec<Proposal>;
    fn theses(&self) -> Vec<Thesis>;

    fn save_users(&self, users: &[User]) -> Result<(), StoreError>;
    fn save_courses(&self, courses: &[Course]) -> Result<(), StoreError>;
    fn save_proposals(&self, proposals: &[Proposal]) -> Result<(), StoreError>;
    fn save_theses(&self, theses: &[Thesis]) -> Result<(), StoreError>;
}
