//! Caller-facing result shapes and raw platform references

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical string form of a raw platform content reference
///
/// Wraps whatever the native facility produced (a `file://` URL for camera
/// captures, a content URI for gallery picks) without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentRef(String);

impl ContentRef {
    /// Wrap a raw reference string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single normalized acquisition result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Full platform-specific reference, readable through the filesystem layer
    pub path: String,
    /// Locally-servable translation of `path`, usable as a media `src`
    pub web_path: String,
}

/// Result of a multi-select gallery pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Videos {
    /// All picked videos, in the order the platform enumerated them
    pub results: Vec<Video>,
}

/// The raw shapes a gallery pick result can arrive in
///
/// A platform pick result carries its references in exactly one of three
/// places, checked in this order: a clip-data list, a single-data field, or
/// a legacy bundle array. Individual entries may be null.
#[derive(Debug, Clone)]
pub enum PickedItems {
    /// Clip-data list, in clip order
    Clip(Vec<Option<ContentRef>>),
    /// Single-data fallback
    Single(Option<ContentRef>),
    /// Legacy bundle-array fallback
    Legacy(Vec<Option<ContentRef>>),
}

impl PickedItems {
    /// Flatten into the order the items must be normalized in
    pub fn into_items(self) -> Vec<Option<ContentRef>> {
        match self {
            PickedItems::Clip(items) | PickedItems::Legacy(items) => items,
            PickedItems::Single(item) => vec![item],
        }
    }
}
