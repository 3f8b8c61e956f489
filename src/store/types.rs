//! Document and record types for the document store
//!
//! This module defines the raw [`Document`] shape returned by the store,
//! the query filters supported by [`list_documents`], and the typed records
//! persisted in the two collections (chat messages and tasks).
//!
//! [`list_documents`]: crate::store::DocumentStore::list_documents

use crate::error::{Result, TaskdeckError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw document returned by the store
///
/// The store returns documents as JSON objects with `$`-prefixed metadata
/// keys alongside the user-defined fields. The id is extracted eagerly;
/// everything else stays in `fields` until a typed record is requested.
#[derive(Debug, Clone)]
pub struct Document {
    /// Server-assigned document identifier
    pub id: String,
    /// Full field payload, including metadata keys
    pub fields: Value,
}

impl Document {
    /// Build a document from a raw JSON value
    ///
    /// # Errors
    ///
    /// Returns `TaskdeckError::Store` if the value is not a JSON object
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(
                TaskdeckError::Store(format!("Expected document object, got: {}", value)).into(),
            );
        }

        let id = value
            .get("$id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self { id, fields: value })
    }

    /// Deserialize the document's fields into a typed record
    ///
    /// Unknown keys (including the `$`-prefixed metadata) are ignored by the
    /// record types, so this works directly on the full payload.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if required fields are missing or of
    /// the wrong type
    pub fn deserialize_fields<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.fields.clone())?)
    }
}

/// Query filter for document listing
///
/// Only the filters this application uses are modeled. The store encodes
/// queries as JSON method objects in the `queries[]` request parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreQuery {
    /// Order results ascending by the named attribute
    OrderAsc(String),
}

impl StoreQuery {
    /// Encode the query in the store's wire format
    ///
    /// # Examples
    ///
    /// ```
    /// use taskdeck::store::StoreQuery;
    ///
    /// let q = StoreQuery::OrderAsc("timestamp".to_string());
    /// assert!(q.to_query_string().contains("orderAsc"));
    /// ```
    pub fn to_query_string(&self) -> String {
        match self {
            Self::OrderAsc(attribute) => serde_json::json!({
                "method": "orderAsc",
                "attributes": [attribute],
            })
            .to_string(),
        }
    }
}

/// A persisted chat message
///
/// Stored in the chat collection with exactly these field names. The
/// `timestamp` is an ISO-8601 string and is the sole ordering mechanism for
/// history reconstruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRecord {
    /// Message sender: "user" or "assistant"
    pub role: String,
    /// Message text
    pub message: String,
    /// ISO-8601 creation instant
    pub timestamp: String,
}

/// A persisted task
///
/// `due_date` is a single combined ISO-8601 string; the date portion is
/// recovered by splitting on the literal `T`, so the persistence format
/// must keep date and time concatenated with no timezone conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task title
    pub title: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Combined ISO-8601 due instant, if any
    #[serde(default)]
    pub due_date: Option<String>,
    /// Optional location
    #[serde(default)]
    pub location: Option<String>,
    /// Completion flag, false at creation
    #[serde(default)]
    pub completed: bool,
}
