//! Document store abstraction and implementations
//!
//! This module defines the [`DocumentStore`] trait consumed by the chat
//! orchestrator and the task service, plus the Appwrite REST implementation.
//! The store is treated as an opaque collaborator: list and create are the
//! only operations this application performs.

mod appwrite;
mod types;

pub use appwrite::AppwriteStore;
pub use types::{ChatMessageRecord, Document, StoreQuery, TaskRecord};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Abstraction over the hosted document database
///
/// Implemented by [`AppwriteStore`] for production and by the in-memory
/// store in `test_utils` for orchestrator and service tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List documents in a collection, applying the given query filters
    ///
    /// # Arguments
    ///
    /// * `collection_id` - Collection to read
    /// * `queries` - Filters to apply (ascending order by attribute)
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is malformed
    async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[StoreQuery],
    ) -> Result<Vec<Document>>;

    /// Create a document with a server-assigned id
    ///
    /// # Arguments
    ///
    /// * `collection_id` - Collection to write to
    /// * `data` - Field payload for the new document
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is malformed
    async fn create_document(&self, collection_id: &str, data: Value) -> Result<Document>;
}
