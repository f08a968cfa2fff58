//! Acquisition error types
//!
//! Every failure a caller can observe is one of these variants. All of them
//! are terminal for the current request; nothing in this plugin retries.

use thiserror::Error;

use crate::permissions::Capability;

/// Main error type for video acquisition operations
#[derive(Error, Debug)]
pub enum AcquireError {
    /// The device reports no camera hardware at all
    #[error("device doesn't have a camera available")]
    NoCameraHardware,

    /// No installed application can handle the requested facility
    #[error("unable to resolve {facility} activity")]
    NoHandlerAvailable {
        /// Facility that could not be launched ("camera" or "gallery")
        facility: &'static str,
    },

    /// The user denied the permission required by the chosen source
    #[error("user denied access to {capability}")]
    PermissionDenied {
        /// Capability the denial applies to
        capability: Capability,
    },

    /// The user dismissed a prompt or external application without a result
    #[error("user cancelled {stage}")]
    UserCancelled {
        /// Stage that was dismissed ("prompt", "camera" or "gallery")
        stage: &'static str,
    },

    /// The capture output file could not be created
    #[error("unable to create video on disk: {reason}")]
    TempFileCreationFailed {
        /// Underlying I/O failure
        reason: String,
    },

    /// A raw reference could not be converted into a result
    #[error("unable to process video")]
    ProcessingFailed,

    /// An unrecognized configuration value was supplied
    ///
    /// The options layer catches this and falls back to the default source
    /// instead of surfacing it; it never rejects a request on its own.
    #[error("invalid source option: {value}")]
    InvalidSource {
        /// The unrecognized value as supplied by the caller
        value: String,
    },
}

/// Result type alias for acquisition operations
pub type AcquireResult<T> = Result<T, AcquireError>;

impl AcquireError {
    /// Whether this error means the user backed out rather than something breaking
    pub fn is_cancellation(&self) -> bool {
        matches!(self, AcquireError::UserCancelled { .. })
    }
}
