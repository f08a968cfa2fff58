//! Permission model and the OS-version-tiered alias resolver
//!
//! A [`Capability`] is what the plugin needs ("use the camera", "read videos
//! from shared storage"); a [`PermissionAlias`] is the concrete permission
//! group the running OS version wants us to ask for. The mapping for shared
//! storage changed twice across OS generations, so it is resolved through an
//! ordered threshold table rather than scattered version branches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric OS SDK version as reported by the device
pub type SdkVersion = u32;

/// First SDK version with scoped storage; the legacy combined
/// read/write storage group stops applying here.
pub const SCOPED_STORAGE_SDK: SdkVersion = 30;

/// First SDK version with per-media-type read permissions.
pub const MEDIA_PERMISSIONS_SDK: SdkVersion = 33;

/// Abstract capability a request needs before it can proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Use the device camera to capture a new video
    Camera,
    /// Read existing videos from shared storage
    Videos,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Camera => write!(f, "camera"),
            Capability::Videos => write!(f, "videos"),
        }
    }
}

/// Concrete permission group identifier understood by the host OS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionAlias {
    /// Camera access, version-independent
    Camera,
    /// Legacy combined read/write shared storage group
    Videos,
    /// Read-only shared storage group
    ReadExternalStorage,
    /// Scoped per-media-type read group
    Media,
}

impl PermissionAlias {
    /// Stable string identifier for this alias
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAlias::Camera => "camera",
            PermissionAlias::Videos => "videos",
            PermissionAlias::ReadExternalStorage => "readExternalStorage",
            PermissionAlias::Media => "media",
        }
    }
}

impl fmt::Display for PermissionAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current state of a permission group as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// The user has granted the group
    Granted,
    /// The user has denied the group
    Denied,
    /// The group has not been decided yet; a prompt is required
    Prompt,
}

/// Caller-facing per-capability permission state map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionStatus {
    /// State of the camera capability
    pub camera: PermissionState,
    /// State of the read-videos capability
    pub videos: PermissionState,
}

/// Shared-storage read tiers, newest first. Each entry holds the lowest SDK
/// version the alias applies to; the 0-floor entry is the legacy catch-all.
const VIDEO_PERMISSION_TIERS: &[(SdkVersion, PermissionAlias)] = &[
    (MEDIA_PERMISSIONS_SDK, PermissionAlias::Media),
    (SCOPED_STORAGE_SDK, PermissionAlias::ReadExternalStorage),
    (0, PermissionAlias::Videos),
];

/// Resolve the permission group `capability` requires on `sdk_version`.
///
/// Total over all inputs: exactly one tier applies to any version, and the
/// camera capability is version-independent.
pub fn resolve_alias(capability: Capability, sdk_version: SdkVersion) -> PermissionAlias {
    match capability {
        Capability::Camera => PermissionAlias::Camera,
        Capability::Videos => VIDEO_PERMISSION_TIERS
            .iter()
            .find(|(floor, _)| sdk_version >= *floor)
            .map(|(_, alias)| *alias)
            // the 0-floor tier matches every version
            .unwrap_or(PermissionAlias::Media),
    }
}
