//! Knowledge-base discovery and fan-out retrieval across Dify datasets.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, warn};

use corpora_core::Config;

use crate::api::{ApiError, DatasetApi, DifyClient, RetrievalResponse};
use crate::errors::RetrievalError;
use crate::models::{Document, Resource};
use crate::normalize::normalize_response;
use crate::uri::{dataset_id, dataset_uri};

/// Retrieval provider that treats a set of Dify knowledge bases as a
/// single corpus.
///
/// Stateless across calls; cheap to clone and share.
#[derive(Clone)]
pub struct DifyProvider {
    config: Config,
    api: Arc<dyn DatasetApi>,
}

impl DifyProvider {
    /// Build a provider backed by the live HTTP client.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = DifyClient::new(&config.api_url, &config.api_key)?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Build a provider over any dataset API implementation.
    pub fn with_api(config: Config, api: Arc<dyn DatasetApi>) -> Self {
        Self { config, api }
    }

    /// List the knowledge bases known to the Dify deployment.
    ///
    /// When `query` is set it is passed as the server-side keyword
    /// filter and additionally applied as a case-insensitive substring
    /// filter on title and description, in case the server's filter
    /// semantics differ.
    pub async fn list_resources(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<Resource>, RetrievalError> {
        let page = self
            .api
            .list_datasets(query)
            .await
            .map_err(|e| RetrievalError::Directory(e.to_string()))?;

        let needle = query.map(str::to_lowercase);
        let resources = page
            .data
            .into_iter()
            .filter_map(|dataset| {
                let title = dataset.name.unwrap_or_default();
                let description = dataset.description.unwrap_or_default();
                if let Some(needle) = &needle {
                    if !title.to_lowercase().contains(needle)
                        && !description.to_lowercase().contains(needle)
                    {
                        return None;
                    }
                }
                Some(Resource {
                    uri: dataset_uri(&dataset.id),
                    title,
                    description,
                })
            })
            .collect();

        Ok(resources)
    }

    /// Retrieve ranked documents for `query` across knowledge bases.
    ///
    /// With explicit `resources` only those knowledge bases are
    /// targeted; otherwise up to `max_knowledge_bases` discovered
    /// ones. A failing source is logged and skipped — it contributes
    /// nothing but never aborts the call, so the result degrades
    /// gracefully as sources fail. Documents are sorted descending by
    /// max chunk similarity (stable on ties) and truncated to
    /// `page_size × target count`, with the budget fixed at resolution
    /// time.
    pub async fn retrieve_documents(
        &self,
        query: &str,
        resources: &[Resource],
    ) -> Result<Vec<Document>, RetrievalError> {
        let targets = self.resolve_targets(resources).await?;
        debug!(targets = targets.len(), "querying knowledge bases");

        let concurrency = self.config.fanout_concurrency.max(1);
        let outcomes: Vec<(&String, Result<RetrievalResponse, ApiError>)> =
            futures::stream::iter(targets.iter().map(|id| {
                let api = Arc::clone(&self.api);
                async move { (id, api.retrieve(id, query).await) }
            }))
            .buffered(concurrency)
            .collect()
            .await;

        // Outcomes join in resolution order, not completion order, so
        // document IDs and tie-breaks match sequential execution.
        let mut documents: Vec<Document> = Vec::new();
        for (dataset, outcome) in outcomes {
            match outcome {
                Ok(response) => {
                    let normalized = normalize_response(response, dataset, documents.len());
                    debug!(
                        dataset = %dataset,
                        documents = normalized.len(),
                        "normalized knowledge base response"
                    );
                    documents.extend(normalized);
                }
                Err(e) => {
                    warn!(dataset = %dataset, error = %e, "skipping failed knowledge base");
                }
            }
        }

        documents.sort_by(|a, b| {
            b.max_similarity()
                .partial_cmp(&a.max_similarity())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        documents.truncate(self.config.page_size * targets.len());

        Ok(documents)
    }

    /// Resolve the target dataset IDs for one retrieval call, unique
    /// and in first-seen order.
    async fn resolve_targets(&self, resources: &[Resource]) -> Result<Vec<String>, RetrievalError> {
        let mut targets: Vec<String> = Vec::new();

        if resources.is_empty() {
            let all = self.list_resources(None).await?;
            for resource in all.iter().take(self.config.max_knowledge_bases) {
                if let Some(id) = dataset_id(&resource.uri) {
                    if !targets.contains(&id) {
                        targets.push(id);
                    }
                }
            }
        } else {
            for resource in resources {
                if let Some(id) = dataset_id(&resource.uri) {
                    if !targets.contains(&id) {
                        targets.push(id);
                    }
                }
            }
        }

        if targets.is_empty() {
            return Err(RetrievalError::NoKnowledgeBases);
        }

        Ok(targets)
    }
}
