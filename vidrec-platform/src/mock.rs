//! Scripted in-memory host backend for hardware-free tests
//!
//! [`MockHost`] implements every facility trait at once. Behavior is scripted
//! up front through the fluent setters, and every interaction is recorded so
//! tests can assert not just the outcome of a request but which facilities it
//! touched along the way.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use vidrec_core::{ContentRef, PermissionAlias, PermissionState, SdkVersion};

use crate::host::{
    CameraLauncher, DeviceHost, GalleryHost, LaunchOutcome, MediaStore, PathTranslator,
    PermissionOracle, PickOutcome, SheetHost,
};

/// What the mock camera does when launched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureScript {
    /// Complete and write the output file
    Writes,
    /// Complete without writing anything, as if the user backed out
    Cancels,
    /// No camera application installed
    NoHandler,
}

/// In-memory host implementing all facility traits
pub struct MockHost {
    sdk_version: SdkVersion,
    has_camera: bool,
    declared: HashSet<PermissionAlias>,
    states: RwLock<HashMap<PermissionAlias, PermissionState>>,
    request_outcomes: HashMap<PermissionAlias, PermissionState>,
    capture: CaptureScript,
    pick: PickOutcome,
    sheet_choice: Option<usize>,
    fail_file_creation: bool,
    local_url: String,
    unreadable: HashSet<String>,

    // Recorded interactions
    state_queries: RwLock<Vec<PermissionAlias>>,
    permission_requests: RwLock<Vec<PermissionAlias>>,
    pick_launches: RwLock<Vec<bool>>,
    sheets_presented: RwLock<Vec<(String, Vec<String>)>>,
    files: RwLock<HashSet<PathBuf>>,
    reserved: RwLock<Vec<PathBuf>>,
    removed: RwLock<Vec<PathBuf>>,
    next_file: AtomicU64,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// A host with a camera, every alias declared, all permissions undecided,
    /// a camera that writes its output, and a gallery that cancels
    pub fn new() -> Self {
        Self {
            sdk_version: 34,
            has_camera: true,
            declared: [
                PermissionAlias::Camera,
                PermissionAlias::Videos,
                PermissionAlias::ReadExternalStorage,
                PermissionAlias::Media,
            ]
            .into_iter()
            .collect(),
            states: RwLock::new(HashMap::new()),
            request_outcomes: HashMap::new(),
            capture: CaptureScript::Writes,
            pick: PickOutcome::Cancelled,
            sheet_choice: None,
            fail_file_creation: false,
            local_url: "http://localhost".to_string(),
            unreadable: HashSet::new(),
            state_queries: RwLock::new(Vec::new()),
            permission_requests: RwLock::new(Vec::new()),
            pick_launches: RwLock::new(Vec::new()),
            sheets_presented: RwLock::new(Vec::new()),
            files: RwLock::new(HashSet::new()),
            reserved: RwLock::new(Vec::new()),
            removed: RwLock::new(Vec::new()),
            next_file: AtomicU64::new(1),
        }
    }

    /// Report the given OS SDK version
    pub fn with_sdk_version(mut self, sdk_version: SdkVersion) -> Self {
        self.sdk_version = sdk_version;
        self
    }

    /// Report no camera hardware
    pub fn without_camera(mut self) -> Self {
        self.has_camera = false;
        self
    }

    /// Drop `alias` from the host application's declared permissions
    pub fn undeclare(mut self, alias: PermissionAlias) -> Self {
        self.declared.remove(&alias);
        self
    }

    /// Start `alias` in the given state
    pub fn with_state(mut self, alias: PermissionAlias, state: PermissionState) -> Self {
        self.states.get_mut().insert(alias, state);
        self
    }

    /// Resolve future requests for `alias` to the given state
    /// (unspecified aliases resolve to granted)
    pub fn with_request_outcome(mut self, alias: PermissionAlias, state: PermissionState) -> Self {
        self.request_outcomes.insert(alias, state);
        self
    }

    /// Script the camera behavior
    pub fn with_capture(mut self, capture: CaptureScript) -> Self {
        self.capture = capture;
        self
    }

    /// Script the gallery behavior
    pub fn with_pick(mut self, pick: PickOutcome) -> Self {
        self.pick = pick;
        self
    }

    /// Have the option sheet resolve to `index`
    pub fn with_sheet_choice(mut self, index: usize) -> Self {
        self.sheet_choice = Some(index);
        self
    }

    /// Fail every capture file reservation
    pub fn failing_file_creation(mut self) -> Self {
        self.fail_file_creation = true;
        self
    }

    /// Mark a raw reference as untranslatable
    pub fn with_unreadable(mut self, raw: impl Into<String>) -> Self {
        self.unreadable.insert(raw.into());
        self
    }

    /// Aliases whose state was queried, in order
    pub fn state_queries(&self) -> Vec<PermissionAlias> {
        self.state_queries.read().clone()
    }

    /// Aliases that were requested (prompted for), in order
    pub fn permission_requests(&self) -> Vec<PermissionAlias> {
        self.permission_requests.read().clone()
    }

    /// Whether the permission oracle was never touched at all
    pub fn oracle_untouched(&self) -> bool {
        self.state_queries.read().is_empty() && self.permission_requests.read().is_empty()
    }

    /// `allow_multiple` flags of every gallery launch, in order
    pub fn pick_launches(&self) -> Vec<bool> {
        self.pick_launches.read().clone()
    }

    /// Titles and options of every sheet presented, in order
    pub fn sheets_presented(&self) -> Vec<(String, Vec<String>)> {
        self.sheets_presented.read().clone()
    }

    /// Every capture output reserved, in order
    pub fn reserved_files(&self) -> Vec<PathBuf> {
        self.reserved.read().clone()
    }

    /// Every capture output removed, in order
    pub fn removed_files(&self) -> Vec<PathBuf> {
        self.removed.read().clone()
    }

    /// Whether a capture output currently exists at `path`
    pub fn file_exists(&self, path: &Path) -> bool {
        self.files.read().contains(path)
    }
}

impl DeviceHost for MockHost {
    fn sdk_version(&self) -> SdkVersion {
        self.sdk_version
    }

    fn has_camera(&self) -> bool {
        self.has_camera
    }

    fn is_declared(&self, alias: PermissionAlias) -> bool {
        self.declared.contains(&alias)
    }
}

#[async_trait]
impl PermissionOracle for MockHost {
    fn state(&self, alias: PermissionAlias) -> PermissionState {
        self.state_queries.write().push(alias);
        self.states
            .read()
            .get(&alias)
            .copied()
            .unwrap_or(PermissionState::Prompt)
    }

    async fn request(&self, alias: PermissionAlias) -> PermissionState {
        self.permission_requests.write().push(alias);
        let outcome = self
            .request_outcomes
            .get(&alias)
            .copied()
            .unwrap_or(PermissionState::Granted);
        self.states.write().insert(alias, outcome);
        outcome
    }
}

#[async_trait]
impl CameraLauncher for MockHost {
    async fn capture_video(&self, output: &Path) -> LaunchOutcome {
        match self.capture {
            CaptureScript::NoHandler => LaunchOutcome::NoHandler,
            CaptureScript::Cancels => LaunchOutcome::Completed,
            CaptureScript::Writes => {
                self.files.write().insert(output.to_path_buf());
                LaunchOutcome::Completed
            }
        }
    }
}

#[async_trait]
impl GalleryHost for MockHost {
    async fn pick_videos(&self, allow_multiple: bool) -> PickOutcome {
        self.pick_launches.write().push(allow_multiple);
        self.pick.clone()
    }
}

#[async_trait]
impl SheetHost for MockHost {
    async fn present(&self, title: &str, options: &[String]) -> Option<usize> {
        self.sheets_presented
            .write()
            .push((title.to_string(), options.to_vec()));
        self.sheet_choice
    }
}

impl PathTranslator for MockHost {
    fn to_web_path(&self, reference: &ContentRef) -> Option<String> {
        let raw = reference.as_str();
        if raw.is_empty() || self.unreadable.contains(raw) {
            return None;
        }
        if raw.starts_with(&self.local_url) {
            return Some(raw.to_string());
        }
        let rest = raw
            .strip_prefix("file://")
            .or_else(|| raw.strip_prefix("content://"))
            .unwrap_or(raw);
        Some(format!(
            "{}/_app_file_/{}",
            self.local_url,
            rest.trim_start_matches('/')
        ))
    }
}

impl MediaStore for MockHost {
    fn create_video_file(&self) -> io::Result<PathBuf> {
        if self.fail_file_creation {
            return Err(io::Error::other("no space left on device"));
        }
        let n = self.next_file.fetch_add(1, Ordering::Relaxed);
        let path = PathBuf::from(format!("/mock/videos/VIDEO_{n:04}.mp4"));
        self.reserved.write().push(path.clone());
        Ok(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains(path)
    }

    fn remove(&self, path: &Path) {
        self.files.write().remove(path);
        self.removed.write().push(path.to_path_buf());
    }
}
