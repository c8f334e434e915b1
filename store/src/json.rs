//! Flat-file JSON implementation of the persistence gateway.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use gradtrack_types::{Course, Proposal, StoreError, Thesis, User};

use crate::Gateway;
use crate::atomic::atomic_write;

const USERS_FILE: &str = "users.json";
const COURSES_FILE: &str = "courses.json";
const PROPOSALS_FILE: &str = "thesis_proposals.json";
const THESES_FILE: &str = "theses.json";

/// One pretty-printed JSON file per collection under a data directory.
///
/// File names match the layout of existing stored data, so a `JsonStore`
/// pointed at an old data directory reads it as-is.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store over `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.dir.join(file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Unreadable collection file, treating as empty: {e}");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %path.display(), "Malformed collection file, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(&self, file: &str, records: &[T]) -> Result<(), StoreError> {
        let path = self.dir.join(file);
        let bytes = serde_json::to_vec_pretty(records)?;
        atomic_write(&path, &bytes)?;
        tracing::debug!(path = %path.display(), count = records.len(), "Persisted collection");
        Ok(())
    }
}

impl Gateway for JsonStore {
    fn users(&self) -> Vec<User> {
        self.read_collection(USERS_FILE)
    }

    fn courses(&self) -> Vec<Course> {
        self.read_collection(COURSES_FILE)
    }

    fn proposals(&self) -> Vec<Proposal> {
        self.read_collection(PROPOSALS_FILE)
    }

    fn theses(&self) -> Vec<Thesis> {
        self.read_collection(THESES_FILE)
    }

    fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.write_collection(USERS_FILE, users)
    }

    fn save_courses(&self, courses: &[Course]) -> Result<(), StoreError> {
        self.write_collection(COURSES_FILE, courses)
    }

    fn save_proposals(&self, proposals: &[Proposal]) -> Result<(), StoreError> {
        self.write_collection(PROPOSALS_FILE, proposals)
    }

    fn save_theses(&self, theses: &[Thesis]) -> Result<(), StoreError> {
        self.write_collection(THESES_FILE, theses)
    }
}
