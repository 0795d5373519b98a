/// Call-scoped retrieval failures.
///
/// Failures scoped to a single knowledge base during fan-out are not
/// represented here; they are logged and the source is skipped.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// Listing the available knowledge bases failed.
    #[error("failed to list datasets: {0}")]
    Directory(String),
    /// No knowledge base could be resolved for a retrieval call.
    #[error("no knowledge bases available for querying")]
    NoKnowledgeBases,
    /// A URI did not conform to the `dify://` addressing scheme.
    #[error("invalid dify URI: {0}")]
    InvalidUri(String),
}
