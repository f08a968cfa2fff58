//! Acquisition source selection

use serde::{Deserialize, Serialize};

use crate::error::AcquireError;

/// Where a requested video should come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoSource {
    /// Ask the user to choose between the gallery and the camera
    #[default]
    Prompt,
    /// Capture a new video with the device camera
    Camera,
    /// Pick an existing video from the gallery
    Videos,
}

impl VideoSource {
    /// Stable string form of this source, as accepted from callers
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoSource::Prompt => "PROMPT",
            VideoSource::Camera => "CAMERA",
            VideoSource::Videos => "VIDEOS",
        }
    }

    /// Parse a caller-supplied source value.
    ///
    /// Unrecognized values are an [`AcquireError::InvalidSource`]; the
    /// options layer catches that and falls back to [`VideoSource::Prompt`].
    pub fn parse(value: &str) -> Result<Self, AcquireError> {
        match value {
            "PROMPT" => Ok(VideoSource::Prompt),
            "CAMERA" => Ok(VideoSource::Camera),
            "VIDEOS" => Ok(VideoSource::Videos),
            other => Err(AcquireError::InvalidSource {
                value: other.to_string(),
            }),
        }
    }
}
