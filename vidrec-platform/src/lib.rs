//! # vidrec Platform
//!
//! Collaborator traits for every native facility the vidrec plugin drives:
//! device facts, the permission oracle, the camera capture launcher, the
//! gallery picker, the option sheet, path translation, and capture file
//! storage. The orchestrator in the `vidrec` facade crate only ever talks to
//! these traits.
//!
//! Two backends ship here: [`DiskStore`]/[`PortablePathTranslator`] for real
//! filesystem-backed hosts, and [`MockHost`] for hardware-free tests.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod disk;
pub mod host;
pub mod mock;
pub mod translate;

// Re-export main types
pub use disk::DiskStore;
pub use host::{
    CameraLauncher, DeviceHost, GalleryHost, LaunchOutcome, MediaStore, PathTranslator,
    PermissionOracle, PickOutcome, SheetHost,
};
pub use mock::{CaptureScript, MockHost};
pub use translate::PortablePathTranslator;
