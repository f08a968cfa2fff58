//! Integration tests for the acquisition orchestrator
//!
//! All tests run against the scripted mock host, asserting both the outcome
//! of each request and which native facilities it touched on the way.

use std::sync::Arc;

use vidrec::{
    AcquireError, Capability, CaptureScript, ContentRef, MockHost, PathTranslator,
    PermissionAlias, PermissionState, PickOutcome, PickedItems, SavedState, VideoOptions,
    VideoRecorder, VideoSource,
};

fn recorder_on(host: &Arc<MockHost>) -> VideoRecorder {
    VideoRecorder::with_host(Arc::clone(host))
}

fn camera_options() -> VideoOptions {
    VideoOptions::with_source(VideoSource::Camera)
}

fn gallery_options() -> VideoOptions {
    VideoOptions::with_source(VideoSource::Videos)
}

// ============================================================================
// SOURCE SELECTION
// ============================================================================

#[tokio::test]
async fn test_prompt_cancellation_rejects_request() {
    // Default sheet script: dismissed without a choice.
    let host = Arc::new(MockHost::new());
    let recorder = recorder_on(&host);

    let err = recorder.get_video(&VideoOptions::default()).await.unwrap_err();
    assert!(matches!(err, AcquireError::UserCancelled { stage: "prompt" }));
    assert!(err.is_cancellation());
    // Cancelled before any permission or facility work.
    assert!(host.oracle_untouched());
    assert!(host.pick_launches().is_empty());
}

#[tokio::test]
async fn test_prompt_presents_configured_labels() {
    let host = Arc::new(MockHost::new());
    let recorder = recorder_on(&host);

    let options = VideoOptions {
        prompt_label_header: Some("Clip".to_string()),
        ..VideoOptions::default()
    };
    let _ = recorder.get_video(&options).await;

    let sheets = host.sheets_presented();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].0, "Clip");
    assert_eq!(
        sheets[0].1,
        vec!["From Videos".to_string(), "Take Video".to_string()]
    );
}

#[tokio::test]
async fn test_prompt_option_zero_uses_gallery() {
    let host = Arc::new(
        MockHost::new()
            .with_sheet_choice(0)
            .with_state(PermissionAlias::Media, PermissionState::Granted)
            .with_pick(PickOutcome::Picked(PickedItems::Single(Some(
                ContentRef::new("content://media/external/video/5"),
            )))),
    );
    let recorder = recorder_on(&host);

    let video = recorder.get_video(&VideoOptions::default()).await.unwrap();
    assert_eq!(video.path, "content://media/external/video/5");
    // Single-select launch, not multi.
    assert_eq!(host.pick_launches(), vec![false]);
}

#[tokio::test]
async fn test_prompt_option_one_matches_explicit_camera() {
    // Denied camera permission: both entry paths must reject identically.
    let prompted_host = Arc::new(
        MockHost::new()
            .with_sheet_choice(1)
            .with_request_outcome(PermissionAlias::Camera, PermissionState::Denied),
    );
    let explicit_host = Arc::new(
        MockHost::new().with_request_outcome(PermissionAlias::Camera, PermissionState::Denied),
    );

    let prompted = recorder_on(&prompted_host)
        .get_video(&VideoOptions::default())
        .await
        .unwrap_err();
    let explicit = recorder_on(&explicit_host)
        .get_video(&camera_options())
        .await
        .unwrap_err();

    assert!(matches!(
        prompted,
        AcquireError::PermissionDenied {
            capability: Capability::Camera
        }
    ));
    assert!(matches!(
        explicit,
        AcquireError::PermissionDenied {
            capability: Capability::Camera
        }
    ));
    assert_eq!(
        prompted_host.permission_requests(),
        explicit_host.permission_requests()
    );

    // Granted permission: both entry paths must produce the same result.
    let prompted_host = Arc::new(MockHost::new().with_sheet_choice(1));
    let explicit_host = Arc::new(MockHost::new());

    let prompted = recorder_on(&prompted_host)
        .get_video(&VideoOptions::default())
        .await
        .unwrap();
    let explicit = recorder_on(&explicit_host)
        .get_video(&camera_options())
        .await
        .unwrap();
    assert_eq!(prompted, explicit);
}

// ============================================================================
// CAMERA ACQUISITION
// ============================================================================

#[tokio::test]
async fn test_camera_without_hardware_fails_before_permissions() {
    let host = Arc::new(MockHost::new().without_camera());
    let recorder = recorder_on(&host);

    let err = recorder.get_video(&camera_options()).await.unwrap_err();
    assert!(matches!(err, AcquireError::NoCameraHardware));
    // No permission prompt may be issued for a device without a camera.
    assert!(host.oracle_untouched());
    assert!(host.reserved_files().is_empty());
}

#[tokio::test]
async fn test_camera_capture_resolves_normalized_result() {
    let host = Arc::new(MockHost::new());
    let recorder = recorder_on(&host);

    let video = recorder.get_video(&camera_options()).await.unwrap();
    assert_eq!(video.path, "file:///mock/videos/VIDEO_0001.mp4");
    assert_eq!(
        video.web_path,
        "http://localhost/_app_file_/mock/videos/VIDEO_0001.mp4"
    );
    // Undecided permission goes through the request path exactly once.
    assert_eq!(host.permission_requests(), vec![PermissionAlias::Camera]);
    // Terminal outcome leaves nothing pending.
    assert!(recorder.save_state().is_none());
}

#[tokio::test]
async fn test_camera_cancellation_clears_pending_state() {
    let host = Arc::new(MockHost::new().with_capture(CaptureScript::Cancels));
    let recorder = recorder_on(&host);

    let err = recorder.get_video(&camera_options()).await.unwrap_err();
    assert!(matches!(err, AcquireError::UserCancelled { stage: "camera" }));
    assert!(recorder.save_state().is_none());

    // The abandoned output was discarded, and a follow-up capture gets a
    // fresh path rather than stale state from the prior call.
    let reserved = host.reserved_files();
    assert_eq!(host.removed_files(), reserved);

    let err = recorder.get_video(&camera_options()).await.unwrap_err();
    assert!(matches!(err, AcquireError::UserCancelled { stage: "camera" }));
    let reserved = host.reserved_files();
    assert_eq!(reserved.len(), 2);
    assert_ne!(reserved[0], reserved[1]);
}

#[tokio::test]
async fn test_camera_without_handler_application() {
    let host = Arc::new(MockHost::new().with_capture(CaptureScript::NoHandler));
    let recorder = recorder_on(&host);

    let err = recorder.get_video(&camera_options()).await.unwrap_err();
    assert!(matches!(
        err,
        AcquireError::NoHandlerAvailable { facility: "camera" }
    ));
    assert!(recorder.save_state().is_none());
}

#[tokio::test]
async fn test_camera_temp_file_failure() {
    let host = Arc::new(MockHost::new().failing_file_creation());
    let recorder = recorder_on(&host);

    let err = recorder.get_video(&camera_options()).await.unwrap_err();
    assert!(matches!(err, AcquireError::TempFileCreationFailed { .. }));
    assert!(recorder.save_state().is_none());
}

// ============================================================================
// GALLERY ACQUISITION
// ============================================================================

#[tokio::test]
async fn test_gallery_permission_denied() {
    let host = Arc::new(
        MockHost::new().with_request_outcome(PermissionAlias::Media, PermissionState::Denied),
    );
    let recorder = recorder_on(&host);

    let err = recorder.get_video(&gallery_options()).await.unwrap_err();
    assert!(matches!(
        err,
        AcquireError::PermissionDenied {
            capability: Capability::Videos
        }
    ));
    // Denial short-circuits before the picker launches.
    assert!(host.pick_launches().is_empty());
}

#[tokio::test]
async fn test_gallery_alias_follows_sdk_version() {
    for (sdk, alias) in [
        (29, PermissionAlias::Videos),
        (31, PermissionAlias::ReadExternalStorage),
        (34, PermissionAlias::Media),
    ] {
        let host = Arc::new(MockHost::new().with_sdk_version(sdk));
        let recorder = recorder_on(&host);
        let _ = recorder.get_video(&gallery_options()).await;
        assert_eq!(host.permission_requests(), vec![alias], "sdk {sdk}");
    }
}

#[tokio::test]
async fn test_undeclared_permission_is_implicitly_granted() {
    let host = Arc::new(
        MockHost::new()
            .undeclare(PermissionAlias::Media)
            .with_pick(PickOutcome::Picked(PickedItems::Single(Some(
                ContentRef::new("content://media/external/video/8"),
            )))),
    );
    let recorder = recorder_on(&host);

    let video = recorder.get_video(&gallery_options()).await.unwrap();
    assert_eq!(video.path, "content://media/external/video/8");
    assert!(host.oracle_untouched());
}

#[tokio::test]
async fn test_gallery_cancellation_and_missing_handler() {
    let host = Arc::new(MockHost::new().with_state(PermissionAlias::Media, PermissionState::Granted));
    let err = recorder_on(&host)
        .get_video(&gallery_options())
        .await
        .unwrap_err();
    assert!(matches!(err, AcquireError::UserCancelled { stage: "gallery" }));

    let host = Arc::new(
        MockHost::new()
            .with_state(PermissionAlias::Media, PermissionState::Granted)
            .with_pick(PickOutcome::NoHandler),
    );
    let err = recorder_on(&host)
        .get_video(&gallery_options())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AcquireError::NoHandlerAvailable { facility: "gallery" }
    ));
}

// ============================================================================
// MULTI-SELECT
// ============================================================================

#[tokio::test]
async fn test_pick_videos_skips_permission_gate() {
    // Every permission is undecided; the pick must still go through.
    let host = Arc::new(MockHost::new().with_pick(PickOutcome::Picked(PickedItems::Clip(vec![
        Some(ContentRef::new("content://media/1")),
        Some(ContentRef::new("content://media/2")),
        Some(ContentRef::new("content://media/3")),
    ]))));
    let recorder = recorder_on(&host);

    let videos = recorder.pick_videos().await.unwrap();
    let paths: Vec<_> = videos.results.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["content://media/1", "content://media/2", "content://media/3"]
    );
    assert!(host.oracle_untouched());
    // Always a multi-select launch.
    assert_eq!(host.pick_launches(), vec![true]);
}

#[tokio::test]
async fn test_pick_videos_rejects_batch_on_null_item() {
    let host = Arc::new(MockHost::new().with_pick(PickOutcome::Picked(PickedItems::Clip(vec![
        Some(ContentRef::new("content://media/1")),
        None,
        Some(ContentRef::new("content://media/3")),
    ]))));
    let recorder = recorder_on(&host);

    // The second item is null: the whole batch rejects, no partial results.
    let err = recorder.pick_videos().await.unwrap_err();
    assert!(matches!(err, AcquireError::ProcessingFailed));
}

#[tokio::test]
async fn test_pick_videos_handles_legacy_bundle_shape() {
    let host = Arc::new(MockHost::new().with_pick(PickOutcome::Picked(PickedItems::Legacy(
        vec![
            Some(ContentRef::new("content://media/10")),
            Some(ContentRef::new("content://media/11")),
        ],
    ))));
    let recorder = recorder_on(&host);

    let videos = recorder.pick_videos().await.unwrap();
    assert_eq!(videos.results.len(), 2);
    assert_eq!(videos.results[1].path, "content://media/11");
}

#[tokio::test]
async fn test_pick_videos_cancellation() {
    let host = Arc::new(MockHost::new());
    let err = recorder_on(&host).pick_videos().await.unwrap_err();
    assert!(matches!(err, AcquireError::UserCancelled { stage: "gallery" }));
}

// ============================================================================
// PERMISSION OPERATIONS
// ============================================================================

#[tokio::test]
async fn test_check_permissions_reports_current_state() {
    let host = Arc::new(
        MockHost::new()
            .with_state(PermissionAlias::Camera, PermissionState::Granted)
            .with_state(PermissionAlias::Media, PermissionState::Denied),
    );
    let status = recorder_on(&host).check_permissions();
    assert_eq!(status.camera, PermissionState::Granted);
    assert_eq!(status.videos, PermissionState::Denied);
}

#[tokio::test]
async fn test_request_permissions_prompts_for_undecided_aliases() {
    let host = Arc::new(MockHost::new().with_state(PermissionAlias::Camera, PermissionState::Granted));
    let status = recorder_on(&host).request_permissions(None).await;

    // Camera was already granted; only the videos alias needed a prompt.
    assert_eq!(host.permission_requests(), vec![PermissionAlias::Media]);
    assert_eq!(status.camera, PermissionState::Granted);
    assert_eq!(status.videos, PermissionState::Granted);
}

#[tokio::test]
async fn test_request_permissions_camera_only_without_declaration() {
    let host = Arc::new(MockHost::new().undeclare(PermissionAlias::Camera));
    let status = recorder_on(&host)
        .request_permissions(Some(&[Capability::Camera]))
        .await;

    // Nothing to prompt for: just the current state.
    assert!(host.permission_requests().is_empty());
    assert_eq!(status.camera, PermissionState::Prompt);
}

#[tokio::test]
async fn test_request_permissions_without_camera_declaration_prompts_videos() {
    let host = Arc::new(MockHost::new().undeclare(PermissionAlias::Camera));
    let status = recorder_on(&host).request_permissions(None).await;

    assert_eq!(host.permission_requests(), vec![PermissionAlias::Media]);
    assert_eq!(status.videos, PermissionState::Granted);
}

// ============================================================================
// STATE AND NORMALIZATION PROPERTIES
// ============================================================================

#[tokio::test]
async fn test_saved_state_round_trip() {
    let host = Arc::new(MockHost::new());
    let recorder = recorder_on(&host);
    assert!(recorder.save_state().is_none());

    let state = SavedState {
        camera_file_save_path: "/mock/videos/VIDEO_0042.mp4".to_string(),
    };
    recorder.restore_state(state.clone());
    assert_eq!(recorder.save_state(), Some(state));
}

#[tokio::test]
async fn test_restored_state_leaves_no_residue_after_next_capture() {
    let host = Arc::new(MockHost::new());
    let recorder = recorder_on(&host);

    recorder.restore_state(SavedState {
        camera_file_save_path: "/mock/videos/VIDEO_0042.mp4".to_string(),
    });
    assert!(recorder.save_state().is_some());

    // A fresh capture takes over the persisted slot; its terminal outcome
    // must clear everything, restored path included.
    recorder.get_video(&camera_options()).await.unwrap();
    assert!(recorder.save_state().is_none());
}

#[tokio::test]
async fn test_web_path_translation_is_idempotent() {
    let host = Arc::new(MockHost::new());
    let recorder = recorder_on(&host);

    let video = recorder.get_video(&camera_options()).await.unwrap();
    let again = host.to_web_path(&ContentRef::new(video.web_path.clone())).unwrap();
    assert_eq!(video.web_path, again);
}
