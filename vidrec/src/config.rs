//! Request options and prompt label defaults

use serde::{Deserialize, Serialize};
use tracing::debug;

use vidrec_core::VideoSource;

/// Default title of the source selection sheet
pub const DEFAULT_PROMPT_HEADER: &str = "Video";
/// Default label of the gallery option
pub const DEFAULT_PROMPT_PHOTO: &str = "From Videos";
/// Default label of the camera option
pub const DEFAULT_PROMPT_PICTURE: &str = "Take Video";

/// Caller-supplied options for a single acquisition request
///
/// `source` is carried as the caller's raw string: unrecognized values fall
/// back to the prompt source instead of failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoOptions {
    /// Where to get the video from; defaults to prompting the user
    pub source: Option<String>,
    /// Title of the source selection sheet
    pub prompt_label_header: Option<String>,
    /// Label of the gallery option
    pub prompt_label_photo: Option<String>,
    /// Label of the camera option
    pub prompt_label_picture: Option<String>,
}

impl VideoOptions {
    /// Request a specific source without label overrides
    pub fn with_source(source: VideoSource) -> Self {
        Self {
            source: Some(source.as_str().to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn settings(&self) -> AcquireSettings {
        let source = match &self.source {
            None => VideoSource::default(),
            Some(raw) => VideoSource::parse(raw).unwrap_or_else(|err| {
                debug!(%err, "falling back to prompt source");
                VideoSource::Prompt
            }),
        };
        AcquireSettings {
            source,
            header: self
                .prompt_label_header
                .clone()
                .unwrap_or_else(|| DEFAULT_PROMPT_HEADER.to_string()),
            label_videos: self
                .prompt_label_photo
                .clone()
                .unwrap_or_else(|| DEFAULT_PROMPT_PHOTO.to_string()),
            label_camera: self
                .prompt_label_picture
                .clone()
                .unwrap_or_else(|| DEFAULT_PROMPT_PICTURE.to_string()),
        }
    }
}

/// Fully resolved per-request settings
#[derive(Debug, Clone)]
pub(crate) struct AcquireSettings {
    pub source: VideoSource,
    pub header: String,
    pub label_videos: String,
    pub label_camera: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = VideoOptions::default().settings();
        assert_eq!(settings.source, VideoSource::Prompt);
        assert_eq!(settings.header, "Video");
        assert_eq!(settings.label_videos, "From Videos");
        assert_eq!(settings.label_camera, "Take Video");
    }

    #[test]
    fn test_unrecognized_source_falls_back_to_prompt() {
        let options = VideoOptions {
            source: Some("FRONT_CAMERA".to_string()),
            ..VideoOptions::default()
        };
        assert_eq!(options.settings().source, VideoSource::Prompt);
    }

    #[test]
    fn test_label_overrides() {
        let options = VideoOptions {
            source: Some("CAMERA".to_string()),
            prompt_label_header: Some("Clip".to_string()),
            prompt_label_photo: Some("Browse".to_string()),
            prompt_label_picture: Some("Record".to_string()),
        };
        let settings = options.settings();
        assert_eq!(settings.source, VideoSource::Camera);
        assert_eq!(settings.header, "Clip");
        assert_eq!(settings.label_videos, "Browse");
        assert_eq!(settings.label_camera, "Record");
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: VideoOptions =
            serde_json::from_str(r#"{"source":"VIDEOS","promptLabelHeader":"Pick"}"#).unwrap();
        assert_eq!(options.settings().source, VideoSource::Videos);
        assert_eq!(options.settings().header, "Pick");
    }
}
