//! Filesystem-backed capture file storage

use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::host::MediaStore;

/// How many name collisions we tolerate before giving up on a reservation
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Process-wide reservation sequence; timestamps alone are not unique when
/// two captures start within the same second.
static NEXT_RESERVATION: AtomicU64 = AtomicU64::new(0);

/// [`MediaStore`] backed by a directory on disk
///
/// Capture outputs are named `VIDEO_<timestamp>_<seq>.mp4`, where `seq` is a
/// process-wide counter. Names are reserved without creating the file, so
/// `exists` reflects whether the capture facility actually wrote anything.
#[derive(Debug, Clone)]
pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    /// Store capture outputs under `dir`, creating it on first use
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store capture outputs under the system temporary directory
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir().join("vidrec"))
    }

    /// The directory capture outputs are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl MediaStore for DiskStore {
    fn create_video_file(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        // The sequence keeps reservations within one process distinct; the
        // existence check guards against leftovers from earlier processes.
        for _ in 0..MAX_NAME_ATTEMPTS {
            let seq = NEXT_RESERVATION.fetch_add(1, Ordering::Relaxed);
            let path = self.dir.join(format!("VIDEO_{stamp}_{seq:04}.mp4"));
            if !path.exists() {
                debug!(path = %path.display(), "reserved capture output");
                return Ok(path);
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "could not reserve a unique capture file name",
        ))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) {
        if let Err(err) = fs::remove_file(path) {
            if err.kind() != io::ErrorKind::NotFound {
                debug!(path = %path.display(), %err, "failed to remove capture output");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(tag: &str) -> DiskStore {
        DiskStore::new(std::env::temp_dir().join(format!("vidrec-test-{tag}-{}", std::process::id())))
    }

    #[test]
    fn test_reservation_does_not_create_file() {
        let store = scratch_store("reserve");
        let path = store.create_video_file().unwrap();
        assert!(!store.exists(&path));
        assert!(path.file_name().unwrap().to_string_lossy().starts_with("VIDEO_"));
        assert!(path.extension().unwrap() == "mp4");
    }

    #[test]
    fn test_reservations_are_unique() {
        let store = scratch_store("unique");
        let first = store.create_video_file().unwrap();
        // Occupy the first name so the next reservation has to step past it.
        fs::write(&first, b"x").unwrap();
        let second = store.create_video_file().unwrap();
        assert_ne!(first, second);
        store.remove(&first);
        assert!(!store.exists(&first));
    }

    #[test]
    fn test_same_second_reservations_are_distinct() {
        // Two captures starting within one timestamp tick must not be handed
        // the same output target, even though neither file exists yet.
        let store = scratch_store("burst");
        let first = store.create_video_file().unwrap();
        let second = store.create_video_file().unwrap();
        let third = store.create_video_file().unwrap();
        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_ne!(first, third);
    }

    #[test]
    fn test_remove_missing_file_is_silent() {
        let store = scratch_store("remove");
        store.remove(Path::new("/nonexistent/vidrec/VIDEO_none.mp4"));
    }
}
