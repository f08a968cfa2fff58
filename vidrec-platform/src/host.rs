//! Native facility traits
//!
//! Each trait wraps one external facility as an opaque collaborator. Methods
//! that suspend the request (permission prompts, external activities, the
//! option sheet) are async; pure queries are not. Every outcome a facility
//! can produce, including cancellation and "no application installed", is a
//! value rather than an error, so the orchestrator owns the error mapping.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use vidrec_core::{ContentRef, PermissionAlias, PermissionState, PickedItems, SdkVersion};

/// Static facts about the running device and the host application
pub trait DeviceHost: Send + Sync {
    /// Numeric OS SDK version of the device
    fn sdk_version(&self) -> SdkVersion;

    /// Whether the device has any camera hardware
    fn has_camera(&self) -> bool;

    /// Whether the host application's manifest declares `alias` as required
    fn is_declared(&self, alias: PermissionAlias) -> bool;
}

/// Permission query and request facility of the host OS
#[async_trait]
pub trait PermissionOracle: Send + Sync {
    /// Current state of `alias` without prompting
    fn state(&self, alias: PermissionAlias) -> PermissionState;

    /// Prompt the user for `alias`, suspending until the dialog is dismissed,
    /// and report the resulting state
    async fn request(&self, alias: PermissionAlias) -> PermissionState;
}

/// Outcome of launching an external activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The external application ran and returned control to us
    Completed,
    /// No installed application could handle the launch
    NoHandler,
}

/// The system camera capture facility
#[async_trait]
pub trait CameraLauncher: Send + Sync {
    /// Launch the capture activity writing to `output`, suspending until it
    /// returns. A cancelled capture still reports [`LaunchOutcome::Completed`];
    /// cancellation is detected by the absence of the output file.
    async fn capture_video(&self, output: &Path) -> LaunchOutcome;
}

/// Outcome of a gallery pick
#[derive(Debug, Clone)]
pub enum PickOutcome {
    /// The picker returned one or more raw references
    Picked(PickedItems),
    /// The picker was dismissed without returning data
    Cancelled,
    /// No installed application could handle the pick
    NoHandler,
}

/// The media gallery pick facility
#[async_trait]
pub trait GalleryHost: Send + Sync {
    /// Launch the video picker, suspending until it returns
    async fn pick_videos(&self, allow_multiple: bool) -> PickOutcome;
}

/// The bottom-sheet option prompt facility
#[async_trait]
pub trait SheetHost: Send + Sync {
    /// Present `options` under `title` and suspend until dismissed.
    /// `None` means the sheet was cancelled without a choice.
    async fn present(&self, title: &str, options: &[String]) -> Option<usize>;
}

/// Translation of raw references into locally-servable web paths
pub trait PathTranslator: Send + Sync {
    /// Translate `reference` into a web path, or `None` if it is unreadable.
    ///
    /// Must be idempotent: feeding an already-translated web path back in
    /// returns it unchanged.
    fn to_web_path(&self, reference: &ContentRef) -> Option<String>;
}

/// Capture output file storage
pub trait MediaStore: Send + Sync {
    /// Reserve a fresh output location for a camera capture.
    ///
    /// The file itself is not created; the capture facility writes it, so a
    /// missing file afterwards means the capture never completed.
    fn create_video_file(&self) -> std::io::Result<PathBuf>;

    /// Whether a capture output exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Best-effort removal of an abandoned capture output
    fn remove(&self, path: &Path);
}
