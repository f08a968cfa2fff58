//! Local web path translation

use vidrec_core::ContentRef;

use crate::host::PathTranslator;

/// Route under the host application's local URL that serves device files
pub const LOCAL_FILE_ROUTE: &str = "/_app_file_";

/// [`PathTranslator`] that maps device references under the embedding
/// application's local server URL
///
/// `file://` and `content://` references become
/// `<local_url>/_app_file_/<path>`. References already under the local URL
/// are returned unchanged, which keeps translation idempotent.
#[derive(Debug, Clone)]
pub struct PortablePathTranslator {
    local_url: String,
}

impl PortablePathTranslator {
    /// Translate against the given local server URL, e.g. `http://localhost`
    pub fn new(local_url: impl Into<String>) -> Self {
        let mut local_url = local_url.into();
        while local_url.ends_with('/') {
            local_url.pop();
        }
        Self { local_url }
    }
}

impl PathTranslator for PortablePathTranslator {
    fn to_web_path(&self, reference: &ContentRef) -> Option<String> {
        let raw = reference.as_str();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with(&self.local_url) {
            // already translated
            return Some(raw.to_string());
        }
        if let Some(path) = raw.strip_prefix("file://") {
            return Some(format!("{}{}{}", self.local_url, LOCAL_FILE_ROUTE, path));
        }
        if let Some(rest) = raw.strip_prefix("content://") {
            return Some(format!("{}{}/{}", self.local_url, LOCAL_FILE_ROUTE, rest));
        }
        None
    }
}
