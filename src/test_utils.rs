//! Test utilities for Taskdeck
//!
//! This module provides in-memory doubles for the two remote collaborators:
//! a [`MemoryStore`] implementing [`DocumentStore`] over per-collection
//! vectors, and a [`ScriptedCompletion`] implementing [`CompletionClient`]
//! from a queue of canned replies, optionally gated so tests can hold a
//! submission mid-flight.

use crate::completion::{CompletionClient, Turn};
use crate::error::{Result, TaskdeckError};
use crate::store::{Document, DocumentStore, StoreQuery};

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Semaphore;

/// In-memory document store
///
/// Documents live in per-collection vectors in insertion order. Ids are
/// assigned sequentially. Failure flags let tests exercise the degradation
/// paths without a network.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicUsize,
    create_calls: AtomicUsize,
    fail_lists: AtomicBool,
    fail_creates: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with raw field payloads
    pub fn seed(&self, collection_id: &str, documents: Vec<Value>) {
        let mut collections = self.collections.lock().unwrap();
        let entries = collections.entry(collection_id.to_string()).or_default();
        for mut value in documents {
            let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            if let Some(object) = value.as_object_mut() {
                object.insert("$id".to_string(), Value::String(id));
            }
            entries.push(value);
        }
    }

    /// Snapshot of a collection's field payloads, insertion order
    pub fn documents(&self, collection_id: &str) -> Vec<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(collection_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of create calls attempted, including failed ones
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Make list calls fail
    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Make create calls fail
    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[StoreQuery],
    ) -> Result<Vec<Document>> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(TaskdeckError::Store("simulated list failure".to_string()).into());
        }

        let mut values = self.documents(collection_id);
        for query in queries {
            match query {
                StoreQuery::OrderAsc(attribute) => {
                    values.sort_by(|a, b| {
                        let a = a.get(attribute).and_then(Value::as_str).unwrap_or_default();
                        let b = b.get(attribute).and_then(Value::as_str).unwrap_or_default();
                        a.cmp(b)
                    });
                }
            }
        }

        values.into_iter().map(Document::from_value).collect()
    }

    async fn create_document(&self, collection_id: &str, data: Value) -> Result<Document> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(TaskdeckError::Store("simulated create failure".to_string()).into());
        }

        let id = format!("doc-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut value = data;
        if let Some(object) = value.as_object_mut() {
            object.insert("$id".to_string(), Value::String(id));
        }

        self.collections
            .lock()
            .unwrap()
            .entry(collection_id.to_string())
            .or_default()
            .push(value.clone());

        Document::from_value(value)
    }
}

/// Completion client replaying a queue of canned replies
///
/// Records every call and the history it was given. A gated client parks
/// inside `send_message` until released, letting tests observe the
/// single-flight guard while a submission is outstanding.
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<String>>,
    calls: AtomicUsize,
    last_history: Mutex<Vec<Turn>>,
    fail: bool,
    gated: bool,
    entered: Semaphore,
    release: Semaphore,
}

impl ScriptedCompletion {
    /// Client that answers from the queue in order
    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            last_history: Mutex::new(Vec::new()),
            fail: false,
            gated: false,
            entered: Semaphore::new(0),
            release: Semaphore::new(0),
        }
    }

    /// Client whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_replies(Vec::new())
        }
    }

    /// Client that parks inside each call until [`release`] is invoked
    ///
    /// [`release`]: ScriptedCompletion::release
    pub fn gated(replies: Vec<String>) -> Self {
        Self {
            gated: true,
            ..Self::with_replies(replies)
        }
    }

    /// Number of calls received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// History turns supplied with the most recent call
    pub fn last_history(&self) -> Vec<Turn> {
        self.last_history.lock().unwrap().clone()
    }

    /// Wait until a gated call has entered `send_message`
    pub async fn wait_for_call(&self) {
        self.entered.acquire().await.unwrap().forget();
    }

    /// Let one parked gated call proceed
    pub fn release(&self) {
        self.release.add_permits(1);
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn send_message(&self, history: &[Turn], _text: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history.lock().unwrap() = history.to_vec();

        if self.gated {
            self.entered.add_permits(1);
            self.release.acquire().await.unwrap().forget();
        }

        if self.fail {
            return Err(TaskdeckError::Completion("simulated failure".to_string()).into());
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TaskdeckError::Completion("script exhausted".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_create_then_list() {
        let store = MemoryStore::new();
        store
            .create_document("tasks", serde_json::json!({"title": "a"}))
            .await
            .unwrap();
        store
            .create_document("tasks", serde_json::json!({"title": "b"}))
            .await
            .unwrap();

        let documents = store.list_documents("tasks", &[]).await.unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].fields["title"], "a");
        assert!(!documents[0].id.is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_order_asc() {
        let store = MemoryStore::new();
        store.seed(
            "chat",
            vec![
                serde_json::json!({"message": "late", "timestamp": "2025-03-15T10:00:00.000+00:00"}),
                serde_json::json!({"message": "early", "timestamp": "2025-03-15T09:00:00.000+00:00"}),
            ],
        );

        let queries = [StoreQuery::OrderAsc("timestamp".to_string())];
        let documents = store.list_documents("chat", &queries).await.unwrap();
        assert_eq!(documents[0].fields["message"], "early");
        assert_eq!(documents[1].fields["message"], "late");
    }

    #[tokio::test]
    async fn test_scripted_completion_replays_in_order() {
        let completion = ScriptedCompletion::with_replies(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(completion.send_message(&[], "x").await.unwrap(), "one");
        assert_eq!(completion.send_message(&[], "y").await.unwrap(), "two");
        assert!(completion.send_message(&[], "z").await.is_err());
        assert_eq!(completion.calls(), 3);
    }

    #[tokio::test]
    async fn test_scripted_completion_failing() {
        let completion = ScriptedCompletion::failing();
        assert!(completion.send_message(&[], "x").await.is_err());
    }
}
