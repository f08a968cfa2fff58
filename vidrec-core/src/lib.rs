//! # vidrec Core
//!
//! Shared data model for the vidrec video acquisition plugin: the caller-facing
//! result shapes, the error enum, the source selection enum, and the
//! permission model including the OS-version-tiered alias resolver.
//!
//! This crate is platform-free. Everything that touches a native facility
//! lives behind the traits in `vidrec-platform`.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod permissions;
pub mod source;
pub mod video;

// Re-export main types
pub use error::{AcquireError, AcquireResult};
pub use permissions::{
    resolve_alias, Capability, PermissionAlias, PermissionState, PermissionStatus, SdkVersion,
    MEDIA_PERMISSIONS_SDK, SCOPED_STORAGE_SDK,
};
pub use source::VideoSource;
pub use video::{ContentRef, PickedItems, Video, Videos};
