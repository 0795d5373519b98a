//! Dataset API surface and its HTTP implementation.
//!
//! Wire types model the loosely-structured Dify payloads with optional
//! fields instead of dynamic JSON traversal; missing values default
//! downstream in the normalizer.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

/// Timeout applied independently to every outbound dataset API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure of a single dataset API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API key is not a valid header value")]
    InvalidApiKey,
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Dataset-level API of a Dify deployment.
///
/// The provider talks to this trait so tests can substitute an
/// in-memory implementation for the HTTP client.
#[async_trait::async_trait]
pub trait DatasetApi: Send + Sync {
    /// List datasets, optionally filtered server-side by keyword.
    async fn list_datasets(&self, keyword: Option<&str>) -> Result<DatasetPage, ApiError>;

    /// Run a retrieval query against one dataset.
    async fn retrieve(&self, dataset_id: &str, query: &str)
    -> Result<RetrievalResponse, ApiError>;
}

/// HTTP client for the Dify dataset API.
#[derive(Debug, Clone)]
pub struct DifyClient {
    client: reqwest::Client,
    base_url: String,
}

impl DifyClient {
    /// Build a client with the bearer token installed as a default header.
    pub fn new(api_url: &str, api_key: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {api_key}");
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|_| ApiError::InvalidApiKey)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl DatasetApi for DifyClient {
    async fn list_datasets(&self, keyword: Option<&str>) -> Result<DatasetPage, ApiError> {
        let url = format!("{}/datasets", self.base_url);
        let mut request = self
            .client
            .get(&url)
            .query(&[("page", "1"), ("limit", "100")]);
        if let Some(keyword) = keyword {
            request = request.query(&[("keyword", keyword)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Request(format!("JSON parse error: {e}")))
    }

    async fn retrieve(
        &self,
        dataset_id: &str,
        query: &str,
    ) -> Result<RetrievalResponse, ApiError> {
        let url = format!("{}/datasets/{}/retrieve", self.base_url, dataset_id);
        let body = serde_json::json!({ "query": query });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Request(format!("JSON parse error: {e}")))
    }
}

// ── Dify dataset API wire types ──────────────────────────────────

/// One page of the dataset listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetPage {
    #[serde(default)]
    pub data: Vec<DatasetEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Raw response of the dataset retrieval endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrievalResponse {
    #[serde(default)]
    pub records: Vec<RetrievalRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrievalRecord {
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub segment: Option<Segment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub document: Option<SegmentDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SegmentDocument {
    #[serde(default)]
    pub name: Option<String>,
}
