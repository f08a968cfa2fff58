//! Result normalization
//!
//! Converts raw platform references into the uniform `{path, webPath}` shape.
//! A null or untranslatable reference is a `ProcessingFailed`; in a batch the
//! first bad item rejects the whole batch, no partial results.

use tracing::warn;

use vidrec_core::{AcquireError, AcquireResult, ContentRef, Video, Videos};
use vidrec_platform::PathTranslator;

/// Normalize a single raw reference
pub(crate) fn normalize_reference(
    translator: &dyn PathTranslator,
    reference: &ContentRef,
) -> AcquireResult<Video> {
    let web_path = translator.to_web_path(reference).ok_or_else(|| {
        warn!(reference = %reference, "reference could not be translated");
        AcquireError::ProcessingFailed
    })?;
    Ok(Video {
        path: reference.to_string(),
        web_path,
    })
}

/// Normalize a batch of raw references in enumeration order
pub(crate) fn normalize_batch(
    translator: &dyn PathTranslator,
    references: Vec<Option<ContentRef>>,
) -> AcquireResult<Videos> {
    let mut results = Vec::with_capacity(references.len());
    for reference in references {
        let reference = reference.ok_or(AcquireError::ProcessingFailed)?;
        results.push(normalize_reference(translator, &reference)?);
    }
    Ok(Videos { results })
}
