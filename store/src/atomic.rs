//! Atomic file write helper.
//!
//! Uses a temp file + rename pattern so a crash mid-write never leaves a
//! torn collection file. On Windows, rename-over-existing fails, so an
//! existing target is moved aside and restored if the rename cannot land.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write `bytes` to `path`, replacing any existing file atomically.
pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if let Err(err) = tmp.persist(path) {
        if path.exists() {
            // Windows fallback: move the target aside, land the temp file,
            // and restore the original on failure.
            let backup = path.with_extension("bak");
            let _ = fs::remove_file(&backup);
            fs::rename(path, &backup)?;

            if let Err(rename_err) = err.file.persist(path) {
                let _ = fs::rename(&backup, path);
                return Err(rename_err.error);
            }
            if let Err(e) = fs::remove_file(&backup) {
                tracing::warn!(path = %backup.display(), "Failed to remove .bak after atomic write: {e}");
            }
        } else {
            return Err(err.error);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::atomic_write;

    #[test]
    fn writes_new_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("users.json");

        atomic_write(&path, b"[]").expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "[]");
    }

    #[test]
    fn overwrites_existing_and_cleans_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("courses.json");

        atomic_write(&path, b"one").expect("write one");
        atomic_write(&path, b"two").expect("write two");

        assert_eq!(fs::read_to_string(&path).expect("read"), "two");
        assert!(!path.with_extension("bak").exists());
    }
}
