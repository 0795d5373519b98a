//! Knowledge-base directory listing behavior.

use std::sync::{Arc, Mutex};

use corpora_dify::api::{ApiError, DatasetApi, DatasetEntry, DatasetPage, RetrievalResponse};
use corpora_dify::{Config, DifyProvider, RetrievalError};

fn test_config() -> Config {
    Config {
        api_url: "http://127.0.0.1:9".to_string(),
        api_key: "test-key".to_string(),
        page_size: 10,
        max_knowledge_bases: 10,
        fanout_concurrency: 4,
    }
}

struct DirectoryStub {
    outcome: Result<Vec<DatasetEntry>, u16>,
    seen_keyword: Mutex<Option<String>>,
}

impl DirectoryStub {
    fn listing(entries: Vec<DatasetEntry>) -> Self {
        Self {
            outcome: Ok(entries),
            seen_keyword: Mutex::new(None),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            outcome: Err(status),
            seen_keyword: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl DatasetApi for DirectoryStub {
    async fn list_datasets(&self, keyword: Option<&str>) -> Result<DatasetPage, ApiError> {
        *self.seen_keyword.lock().unwrap() = keyword.map(str::to_string);
        match &self.outcome {
            Ok(entries) => Ok(DatasetPage {
                data: entries.clone(),
            }),
            Err(status) => Err(ApiError::Status {
                status: *status,
                body: "stub failure".to_string(),
            }),
        }
    }

    async fn retrieve(
        &self,
        _dataset_id: &str,
        _query: &str,
    ) -> Result<RetrievalResponse, ApiError> {
        Ok(RetrievalResponse::default())
    }
}

fn entry(id: &str, name: &str, description: &str) -> DatasetEntry {
    DatasetEntry {
        id: id.to_string(),
        name: Some(name.to_string()),
        description: Some(description.to_string()),
    }
}

#[tokio::test]
async fn listing_maps_datasets_to_resources() {
    let stub = Arc::new(DirectoryStub::listing(vec![
        entry("kb1", "Finance", "quarterly numbers"),
        entry("kb2", "Engineering", "design docs"),
    ]));
    let provider = DifyProvider::with_api(test_config(), stub.clone());

    let resources = provider.list_resources(None).await.unwrap();

    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].uri, "dify://dataset/kb1");
    assert_eq!(resources[0].title, "Finance");
    assert_eq!(resources[0].description, "quarterly numbers");
    assert_eq!(resources[1].uri, "dify://dataset/kb2");
    assert!(stub.seen_keyword.lock().unwrap().is_none());
}

#[tokio::test]
async fn listing_double_filters_on_query() {
    // The stub returns everything regardless of keyword; the provider
    // must still filter client-side, case-insensitively.
    let stub = Arc::new(DirectoryStub::listing(vec![
        entry("kb1", "Finance", "quarterly REVENUE numbers"),
        entry("kb2", "Engineering", "design docs"),
        entry("kb3", "Revenue Ops", "pipeline"),
    ]));
    let provider = DifyProvider::with_api(test_config(), stub.clone());

    let resources = provider.list_resources(Some("revenue")).await.unwrap();

    let ids: Vec<&str> = resources.iter().map(|r| r.uri.as_str()).collect();
    assert_eq!(ids, ["dify://dataset/kb1", "dify://dataset/kb3"]);
    assert_eq!(
        stub.seen_keyword.lock().unwrap().as_deref(),
        Some("revenue")
    );
}

#[tokio::test]
async fn listing_failure_propagates() {
    let stub = Arc::new(DirectoryStub::failing(502));
    let provider = DifyProvider::with_api(test_config(), stub);

    let err = provider.list_resources(None).await.unwrap_err();

    assert!(matches!(err, RetrievalError::Directory(detail) if detail.contains("502")));
}

#[tokio::test]
async fn retrieval_discovery_propagates_listing_failure() {
    let stub = Arc::new(DirectoryStub::failing(502));
    let provider = DifyProvider::with_api(test_config(), stub);

    let err = provider.retrieve_documents("q", &[]).await.unwrap_err();

    assert!(matches!(err, RetrievalError::Directory(_)));
}
