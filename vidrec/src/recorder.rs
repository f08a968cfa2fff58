//! The acquisition orchestrator
//!
//! [`VideoRecorder`] drives one request through source selection, the
//! permission gate, the external capture or pick facility, and result
//! normalization. Every suspension point is an `await` on a collaborator
//! trait; terminal outcomes are plain `Result`s, so a request can never get
//! stuck in a half-finished state.

use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use vidrec_core::{
    resolve_alias, AcquireError, AcquireResult, Capability, ContentRef, PermissionState,
    PermissionStatus, Video, VideoSource, Videos,
};
use vidrec_platform::{
    CameraLauncher, DeviceHost, GalleryHost, LaunchOutcome, MediaStore, PathTranslator,
    PermissionOracle, PickOutcome, SheetHost,
};

use crate::config::{AcquireSettings, VideoOptions};
use crate::normalize::{normalize_batch, normalize_reference};
use crate::state::{PendingTable, SavedState};

/// The collaborators a [`VideoRecorder`] is wired to
pub struct HostBindings {
    /// Device and manifest facts
    pub device: Arc<dyn DeviceHost>,
    /// Permission query/request facility
    pub permissions: Arc<dyn PermissionOracle>,
    /// Camera capture facility
    pub camera: Arc<dyn CameraLauncher>,
    /// Gallery pick facility
    pub gallery: Arc<dyn GalleryHost>,
    /// Source selection sheet
    pub sheet: Arc<dyn SheetHost>,
    /// Raw-reference-to-web-path translation
    pub translator: Arc<dyn PathTranslator>,
    /// Capture output storage
    pub store: Arc<dyn MediaStore>,
}

/// Source a request ends up using once prompting is resolved
enum EffectiveSource {
    Camera,
    Gallery,
}

/// Video acquisition entry point
///
/// One logical request is in flight per call; per-request state is keyed by a
/// correlation token, so even overlapping calls on the same recorder cannot
/// see each other's capture paths.
pub struct VideoRecorder {
    device: Arc<dyn DeviceHost>,
    permissions: Arc<dyn PermissionOracle>,
    camera: Arc<dyn CameraLauncher>,
    gallery: Arc<dyn GalleryHost>,
    sheet: Arc<dyn SheetHost>,
    translator: Arc<dyn PathTranslator>,
    store: Arc<dyn MediaStore>,
    pending: PendingTable,
}

impl VideoRecorder {
    /// Wire a recorder to the given collaborators
    pub fn new(host: HostBindings) -> Self {
        Self {
            device: host.device,
            permissions: host.permissions,
            camera: host.camera,
            gallery: host.gallery,
            sheet: host.sheet,
            translator: host.translator,
            store: host.store,
            pending: PendingTable::new(),
        }
    }

    /// Wire a recorder to a single host object implementing every facility
    pub fn with_host<H>(host: Arc<H>) -> Self
    where
        H: DeviceHost
            + PermissionOracle
            + CameraLauncher
            + GalleryHost
            + SheetHost
            + PathTranslator
            + MediaStore
            + 'static,
    {
        Self::new(HostBindings {
            device: host.clone(),
            permissions: host.clone(),
            camera: host.clone(),
            gallery: host.clone(),
            sheet: host.clone(),
            translator: host.clone(),
            store: host,
        })
    }

    /// Acquire a single video from the camera or the gallery.
    ///
    /// With no explicit source the user is prompted to choose; cancelling the
    /// prompt, the capture, or the pick rejects the request with
    /// [`AcquireError::UserCancelled`].
    pub async fn get_video(&self, options: &VideoOptions) -> AcquireResult<Video> {
        let settings = options.settings();
        match self.select_source(&settings).await? {
            EffectiveSource::Camera => self.acquire_from_camera().await,
            EffectiveSource::Gallery => self.acquire_from_gallery().await,
        }
    }

    /// Pick multiple videos from the gallery.
    ///
    /// The pick activity grants read access to its own selection, so the
    /// permission gate is skipped by construction.
    pub async fn pick_videos(&self) -> AcquireResult<Videos> {
        match self.gallery.pick_videos(true).await {
            PickOutcome::NoHandler => Err(AcquireError::NoHandlerAvailable {
                facility: "gallery",
            }),
            PickOutcome::Cancelled => Err(AcquireError::UserCancelled { stage: "gallery" }),
            PickOutcome::Picked(items) => {
                // Normalization can touch the filesystem per item, so it runs
                // on a blocking worker. Order is the platform's enumeration
                // order; the first bad item rejects the whole batch.
                let translator = Arc::clone(&self.translator);
                let references = items.into_items();
                match tokio::task::spawn_blocking(move || {
                    normalize_batch(translator.as_ref(), references)
                })
                .await
                {
                    Ok(result) => result,
                    Err(err) => {
                        warn!(%err, "normalization worker failed");
                        Err(AcquireError::ProcessingFailed)
                    }
                }
            }
        }
    }

    /// Current per-capability permission state
    pub fn check_permissions(&self) -> PermissionStatus {
        let sdk = self.device.sdk_version();
        PermissionStatus {
            camera: self
                .permissions
                .state(resolve_alias(Capability::Camera, sdk)),
            videos: self
                .permissions
                .state(resolve_alias(Capability::Videos, sdk)),
        }
    }

    /// Request the named capabilities (or all of them) and report the
    /// resulting state.
    ///
    /// If the host application never declared the camera permission, prompting
    /// for it would be rejected by the OS: a camera-only request then reports
    /// the current state without prompting, and anything wider prompts for the
    /// resolved videos alias only.
    pub async fn request_permissions(
        &self,
        capabilities: Option<&[Capability]>,
    ) -> PermissionStatus {
        let sdk = self.device.sdk_version();
        if self.device.is_declared(resolve_alias(Capability::Camera, sdk)) {
            let requested = capabilities.unwrap_or(&[Capability::Camera, Capability::Videos]);
            for capability in requested {
                let alias = resolve_alias(*capability, sdk);
                if self.permissions.state(alias) != PermissionState::Granted {
                    self.permissions.request(alias).await;
                }
            }
        } else {
            let camera_only = matches!(capabilities, Some([Capability::Camera]));
            if camera_only {
                debug!("camera permission not declared, reporting state without prompting");
            } else {
                self.permissions
                    .request(resolve_alias(Capability::Videos, sdk))
                    .await;
            }
        }
        self.check_permissions()
    }

    /// Persistable pending state, present while a camera capture is in flight
    pub fn save_state(&self) -> Option<SavedState> {
        self.pending.saved_path().map(|path| SavedState {
            camera_file_save_path: path,
        })
    }

    /// Re-seed pending state persisted by [`VideoRecorder::save_state`]
    pub fn restore_state(&self, state: SavedState) {
        self.pending.restore(state.camera_file_save_path);
    }

    async fn select_source(&self, settings: &AcquireSettings) -> AcquireResult<EffectiveSource> {
        match settings.source {
            VideoSource::Camera => Ok(EffectiveSource::Camera),
            VideoSource::Videos => Ok(EffectiveSource::Gallery),
            VideoSource::Prompt => {
                let options = vec![settings.label_videos.clone(), settings.label_camera.clone()];
                match self.sheet.present(&settings.header, &options).await {
                    Some(0) => Ok(EffectiveSource::Gallery),
                    Some(1) => Ok(EffectiveSource::Camera),
                    Some(index) => {
                        warn!(index, "sheet reported an option outside the presented range");
                        Err(AcquireError::UserCancelled { stage: "prompt" })
                    }
                    None => Err(AcquireError::UserCancelled { stage: "prompt" }),
                }
            }
        }
    }

    /// Gate on the permission `capability` resolves to for this device.
    ///
    /// A capability the host application never declared is implicitly granted:
    /// the OS will not enforce what was never requested, and prompting for it
    /// would fail.
    async fn ensure_permission(&self, capability: Capability) -> AcquireResult<()> {
        let alias = resolve_alias(capability, self.device.sdk_version());
        if !self.device.is_declared(alias) {
            debug!(%alias, "permission not declared by host application, skipping gate");
            return Ok(());
        }
        if self.permissions.state(alias) == PermissionState::Granted {
            return Ok(());
        }
        let state = self.permissions.request(alias).await;
        if state != PermissionState::Granted {
            debug!(%capability, ?state, "user denied permission");
            return Err(AcquireError::PermissionDenied { capability });
        }
        Ok(())
    }

    async fn acquire_from_camera(&self) -> AcquireResult<Video> {
        // Hardware check comes first: without a camera there is nothing to
        // ask permission for.
        if !self.device.has_camera() {
            return Err(AcquireError::NoCameraHardware);
        }
        self.ensure_permission(Capability::Camera).await?;

        let output = self.store.create_video_file().map_err(|err| {
            AcquireError::TempFileCreationFailed {
                reason: err.to_string(),
            }
        })?;
        let token = self.pending.register(output);

        let result = self.run_capture(token).await;
        if result.is_err() {
            if let Some(path) = self.pending.path(token) {
                self.store.remove(&path);
            }
        }
        // Pending state is dropped on every terminal outcome, success or
        // failure, before the caller sees the result.
        self.pending.clear(token);
        result
    }

    async fn run_capture(&self, token: Uuid) -> AcquireResult<Video> {
        let output = self
            .pending
            .path(token)
            .ok_or(AcquireError::ProcessingFailed)?;
        match self.camera.capture_video(&output).await {
            LaunchOutcome::NoHandler => Err(AcquireError::NoHandlerAvailable {
                facility: "camera",
            }),
            LaunchOutcome::Completed => {
                if !self.store.exists(&output) {
                    debug!(path = %output.display(), "capture output absent, treating as cancellation");
                    return Err(AcquireError::UserCancelled { stage: "camera" });
                }
                let reference = ContentRef::new(format!("file://{}", output.display()));
                normalize_reference(self.translator.as_ref(), &reference)
            }
        }
    }

    async fn acquire_from_gallery(&self) -> AcquireResult<Video> {
        self.ensure_permission(Capability::Videos).await?;
        match self.gallery.pick_videos(false).await {
            PickOutcome::NoHandler => Err(AcquireError::NoHandlerAvailable {
                facility: "gallery",
            }),
            PickOutcome::Cancelled => Err(AcquireError::UserCancelled { stage: "gallery" }),
            PickOutcome::Picked(items) => {
                let reference = items
                    .into_items()
                    .into_iter()
                    .next()
                    .flatten()
                    .ok_or(AcquireError::ProcessingFailed)?;
                normalize_reference(self.translator.as_ref(), &reference)
            }
        }
    }
}
