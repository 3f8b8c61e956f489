//! Appwrite document store implementation
//!
//! This module implements the [`DocumentStore`] trait against the Appwrite
//! Databases REST surface. The client is a thin configured handle: it lists
//! documents (optionally ordered) and creates documents with server-assigned
//! ids, mapping non-success responses to `TaskdeckError::Store`.

use crate::config::StoreConfig;
use crate::error::{Result, TaskdeckError};
use crate::store::{Document, DocumentStore, StoreQuery};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Sentinel document id asking the server to generate a unique id
const AUTO_ID: &str = "unique()";

/// Appwrite Databases API client
///
/// # Examples
///
/// ```no_run
/// use taskdeck::config::StoreConfig;
/// use taskdeck::store::{AppwriteStore, DocumentStore, StoreQuery};
///
/// # async fn example() -> taskdeck::error::Result<()> {
/// let config = StoreConfig {
///     endpoint: "https://cloud.appwrite.io/v1".to_string(),
///     project_id: "my-project".to_string(),
///     database_id: "my-db".to_string(),
///     tasks_collection_id: "tasks".to_string(),
///     chat_collection_id: "chat".to_string(),
///     api_key: "secret".to_string(),
/// };
/// let store = AppwriteStore::new(config)?;
/// let queries = [StoreQuery::OrderAsc("timestamp".to_string())];
/// let documents = store.list_documents("chat", &queries).await?;
/// # Ok(())
/// # }
/// ```
pub struct AppwriteStore {
    client: Client,
    config: StoreConfig,
}

impl AppwriteStore {
    /// Create a new Appwrite store client
    ///
    /// # Arguments
    ///
    /// * `config` - Store configuration with endpoint, project, and key
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("taskdeck/0.2.0")
            .build()
            .map_err(|e| TaskdeckError::Store(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized document store client: endpoint={}, database={}",
            config.endpoint,
            config.database_id
        );

        Ok(Self { client, config })
    }

    /// URL of the documents endpoint for a collection
    fn documents_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database_id,
            collection_id
        )
    }

    /// Attach the project and key headers required on every request
    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", &self.config.api_key)
            .header("Content-Type", "application/json")
    }

    /// Map a non-success response to a store error with status and body
    async fn error_from_response(
        operation: &str,
        response: reqwest::Response,
    ) -> TaskdeckError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Store {} failed: {} {}", operation, status, body);
        TaskdeckError::Store(format!("{} returned {}: {}", operation, status, body))
    }
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[StoreQuery],
    ) -> Result<Vec<Document>> {
        let url = self.documents_url(collection_id);
        tracing::debug!("Listing documents: {}", url);

        let mut request = self.with_auth(self.client.get(&url));
        for query in queries {
            request = request.query(&[("queries[]", query.to_query_string())]);
        }

        let response = request.send().await.map_err(|e| {
            TaskdeckError::Store(format!("Failed to reach document store: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("list_documents", response)
                .await
                .into());
        }

        let body: Value = response.json().await.map_err(|e| {
            TaskdeckError::Store(format!("Failed to parse list response: {}", e))
        })?;

        let documents = body
            .get("documents")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        documents.into_iter().map(Document::from_value).collect()
    }

    async fn create_document(&self, collection_id: &str, data: Value) -> Result<Document> {
        let url = self.documents_url(collection_id);
        tracing::debug!("Creating document in collection {}", collection_id);

        let body = serde_json::json!({
            "documentId": AUTO_ID,
            "data": data,
        });

        let response = self
            .with_auth(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| TaskdeckError::Store(format!("Failed to reach document store: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("create_document", response)
                .await
                .into());
        }

        let value: Value = response.json().await.map_err(|e| {
            TaskdeckError::Store(format!("Failed to parse create response: {}", e))
        })?;

        Document::from_value(value)
    }
}
