//! Dify knowledge-base retrieval connector.
//!
//! Fans one text query out across multiple Dify datasets, normalizes
//! each source's scored passages, and merges everything into a single
//! ranked document list as if the datasets were one corpus.

pub mod api;
pub mod errors;
pub mod models;
mod normalize;
pub mod provider;
pub mod uri;

pub use corpora_core::{Config, ConfigError};

pub use api::{ApiError, DatasetApi, DifyClient};
pub use errors::RetrievalError;
pub use models::{Chunk, Document, Resource};
pub use provider::DifyProvider;
