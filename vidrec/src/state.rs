//! Pending acquisition state
//!
//! Each in-flight camera capture gets its own correlation token mapped to a
//! per-request context in a keyed table, so concurrent or back-to-back
//! requests never see each other's output paths. The most recently registered
//! camera output path is additionally mirrored into a single field that can
//! be persisted across process-level suspension.

use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Fixed key the pending camera output path is persisted under
pub const SAVED_STATE_KEY: &str = "cameraVideoFileSavePath";

/// Persisted-across-suspend plugin state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    /// Output path of the camera capture that was in flight when the host
    /// process was suspended
    #[serde(rename = "cameraVideoFileSavePath")]
    pub camera_file_save_path: String,
}

/// Context of one in-flight camera capture
#[derive(Debug, Clone)]
pub(crate) struct PendingCapture {
    pub file_save_path: PathBuf,
}

/// Correlation-token table of in-flight captures
pub(crate) struct PendingTable {
    entries: DashMap<Uuid, PendingCapture>,
    camera_file_save_path: RwLock<Option<String>>,
}

impl PendingTable {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            camera_file_save_path: RwLock::new(None),
        }
    }

    /// Register a fresh capture and return its correlation token
    pub fn register(&self, file_save_path: PathBuf) -> Uuid {
        let token = Uuid::new_v4();
        *self.camera_file_save_path.write() = Some(file_save_path.display().to_string());
        self.entries.insert(token, PendingCapture { file_save_path });
        token
    }

    /// Look up the output path registered under `token`
    pub fn path(&self, token: Uuid) -> Option<PathBuf> {
        self.entries
            .get(&token)
            .map(|entry| entry.file_save_path.clone())
    }

    /// Drop the capture registered under `token`, success or failure
    pub fn clear(&self, token: Uuid) {
        self.entries.remove(&token);
        *self.camera_file_save_path.write() = None;
    }

    /// The persistable pending camera output path, if a capture is in flight
    pub fn saved_path(&self) -> Option<String> {
        self.camera_file_save_path.read().clone()
    }

    /// Re-seed the persisted output path from a prior process.
    ///
    /// Only the mirrored field is restored; no table entry is created, since
    /// the capture it belonged to died with the old process. The next
    /// registered capture takes over the persisted slot.
    pub fn restore(&self, path: String) {
        debug!(%path, "restoring pending capture state");
        *self.camera_file_save_path.write() = Some(path);
    }
}
