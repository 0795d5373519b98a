use serde::{Deserialize, Serialize};

/// An addressable reference to a knowledge base, used for discovery
/// and explicit targeting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    /// URI in the `dify://dataset/{id}` scheme.
    pub uri: String,
    pub title: String,
    pub description: String,
}

/// One scored passage returned by a retrieval query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub content: String,
    /// Source-defined relevance score. Higher is better; scales are
    /// not calibrated across knowledge bases.
    pub similarity: f32,
}

/// A group of chunks sharing one synthesized identity within a single
/// knowledge base.
///
/// IDs have the shape `{datasetId}_{originalDocumentId}_{offset}` and
/// are unique within one aggregated result set, never across calls.
/// Documents are never merged across knowledge bases.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// Chunks in response-arrival order.
    pub chunks: Vec<Chunk>,
}

impl Document {
    /// Highest chunk similarity; 0.0 for a chunkless document.
    pub fn max_similarity(&self) -> f32 {
        self.chunks
            .iter()
            .map(|c| c.similarity)
            .reduce(f32::max)
            .unwrap_or(0.0)
    }
}
