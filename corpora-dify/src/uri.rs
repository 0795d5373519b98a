//! Parsing and production of the `dify://` addressing scheme.
//!
//! Recognized shapes: `dify://dataset/{id}` and
//! `dify://knowledge_base/{id}[/document/{docId}]`. The rest of the
//! connector never touches the string format directly.

use url::Url;

use crate::errors::RetrievalError;

const DIFY_SCHEME: &str = "dify";

/// Extract a dataset (knowledge base) ID from a resource URI.
///
/// Returns the last non-empty path segment, or `None` when the scheme
/// does not match or the string is unparsable, so callers can skip
/// unusable resources silently.
pub fn dataset_id(uri: &str) -> Option<String> {
    let parsed = Url::parse(uri).ok()?;
    if parsed.scheme() != DIFY_SCHEME {
        return None;
    }
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_string)
}

/// Strict decoder for document-level addressing.
///
/// Accepts only `dify://knowledge_base/{id}[/document/{docId}]` and
/// yields `(knowledge_base_id, document_id)`, with an empty document
/// ID when the `/document/{docId}` suffix is absent. Any other scheme
/// or path shape fails with [`RetrievalError::InvalidUri`].
pub fn parse_document_uri(uri: &str) -> Result<(String, String), RetrievalError> {
    let invalid = || RetrievalError::InvalidUri(uri.to_string());

    let parsed = Url::parse(uri).map_err(|_| invalid())?;
    if parsed.scheme() != DIFY_SCHEME || parsed.host_str() != Some("knowledge_base") {
        return Err(invalid());
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    let kb_id = segments.first().copied().ok_or_else(invalid)?;
    let doc_id = match (segments.get(1), segments.get(2), segments.len()) {
        (None, _, _) => "",
        (Some(&"document"), Some(&doc_id), 3) => doc_id,
        _ => return Err(invalid()),
    };

    Ok((kb_id.to_string(), doc_id.to_string()))
}

/// Produce the canonical resource URI for a dataset.
pub fn dataset_uri(dataset_id: &str) -> String {
    format!("{DIFY_SCHEME}://dataset/{dataset_id}")
}
