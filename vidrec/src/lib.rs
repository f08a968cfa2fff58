//! # vidrec - Video Acquisition Plugin Runtime
//!
//! vidrec lets an embedding application capture a video with the device
//! camera or pick videos from the media gallery through one permission-aware
//! API, returning a uniform `{path, webPath}` result from either path.
//!
//! ## Key Features
//!
//! - **One result shape**: camera captures and gallery picks normalize to the
//!   same `Video` value
//! - **Version-aware permissions**: the storage permission group is resolved
//!   per OS generation through a single tier table
//! - **Opaque native facilities**: camera, picker, prompt sheet, permission
//!   dialogs, and path translation are traits; ship real hosts or the
//!   bundled mock
//! - **No stuck requests**: every suspension resumes into a terminal
//!   resolve or reject, cancellation included
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidrec::{MockHost, VideoOptions, VideoRecorder, VideoSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let recorder = VideoRecorder::with_host(Arc::new(MockHost::new()));
//!
//!     // Capture a new video with the camera
//!     let video = recorder
//!         .get_video(&VideoOptions::with_source(VideoSource::Camera))
//!         .await?;
//!     println!("captured {} ({})", video.path, video.web_path);
//!
//!     // Let the user pick several videos from the gallery
//!     let videos = recorder.pick_videos().await?;
//!     println!("picked {} videos", videos.results.len());
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use vidrec_core::{
    resolve_alias, AcquireError, AcquireResult, Capability, ContentRef, PermissionAlias,
    PermissionState, PermissionStatus, PickedItems, SdkVersion, Video, VideoSource, Videos,
    MEDIA_PERMISSIONS_SDK, SCOPED_STORAGE_SDK,
};

pub use vidrec_platform::{
    CameraLauncher, CaptureScript, DeviceHost, DiskStore, GalleryHost, LaunchOutcome, MediaStore,
    MockHost, PathTranslator, PermissionOracle, PickOutcome, PortablePathTranslator, SheetHost,
};

// Public API modules
pub mod config;
pub mod recorder;

mod normalize;
mod state;

// Re-export main API types
pub use config::{
    VideoOptions, DEFAULT_PROMPT_HEADER, DEFAULT_PROMPT_PHOTO, DEFAULT_PROMPT_PICTURE,
};
pub use recorder::{HostBindings, VideoRecorder};
pub use state::{SavedState, SAVED_STATE_KEY};
