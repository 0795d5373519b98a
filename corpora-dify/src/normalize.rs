//! Conversion of raw Dify retrieval responses into canonical documents.

use std::collections::HashMap;

use crate::api::RetrievalResponse;
use crate::models::{Chunk, Document};

/// Convert one dataset's raw retrieval response into documents.
///
/// Records are grouped by their original `document_id`; the first
/// sighting fixes both the output position and the running index
/// embedded in the synthesized ID (`{dataset}_{docId}_{offset + n}`),
/// so the same original ID never collides across datasets or within
/// one response. Missing fields default to empty strings / 0.0 — a
/// record with no usable content still contributes an empty chunk.
pub(crate) fn normalize_response(
    response: RetrievalResponse,
    dataset_id: &str,
    id_offset: usize,
) -> Vec<Document> {
    let mut documents: Vec<Document> = Vec::new();
    let mut index_by_original: HashMap<String, usize> = HashMap::new();

    for record in response.records {
        let similarity = record.score.unwrap_or(0.0);
        let segment = record.segment.unwrap_or_default();
        let original_id = segment.document_id.unwrap_or_default();
        let content = segment.content.unwrap_or_default();
        let name = segment
            .document
            .and_then(|d| d.name)
            .unwrap_or_default();

        let index = match index_by_original.get(&original_id) {
            Some(&index) => index,
            None => {
                let title = if dataset_id.is_empty() {
                    name
                } else {
                    format!("[{dataset_id}] {name}")
                };
                documents.push(Document {
                    id: format!("{dataset_id}_{original_id}_{}", id_offset + documents.len()),
                    title,
                    chunks: Vec::new(),
                });
                let index = documents.len() - 1;
                index_by_original.insert(original_id, index);
                index
            }
        };

        documents[index].chunks.push(Chunk {
            content,
            similarity,
        });
    }

    documents
}
