//! Workflow core for GradTrack.
//!
//! Governs a thesis's lifecycle from proposal through defense to final
//! grading: capacity-gated approvals, the 90-day defense window, reviewer
//! assignment, multi-party grading consensus, and the searchable archive of
//! completed theses.
//!
//! The engine is synchronous and stateless between calls. Every mutating
//! operation reads the full affected collection from the [`Gateway`],
//! mutates it in memory, and writes it back exactly once - the gateway's
//! read-all / write-all contract is the unit of durability. Time and id
//! generation are injected collaborators ([`Clock`], [`TokenGen`]) so tests
//! can pin both.

mod archive;
mod clock;
mod credential;
mod professor;
mod student;
mod workflow;


pub use clock::{Clock, SystemClock, TokenGen, UuidTokens, format_date, parse_date};
pub use credential::{hash_secret, verify_secret};
pub use professor::{ProfessorOps, REVIEW_LIMIT, SUPERVISION_LIMIT};
pub use student::{DEFENSE_WAIT_DAYS, StudentOps};
pub use workflow::Workflow;

pub use gradtrack_store::Gateway;
