//! Chat and task-extraction orchestrator
//!
//! This module coordinates one chat turn end to end: persist the user turn,
//! forward it to the completion service with accumulated session history,
//! classify the response, persist either a chat reply or an extracted task,
//! and persist the assistant turn.
//!
//! The orchestrator is an explicit session object constructed at chat
//! startup; there is no ambient singleton. Its step sequence is strictly
//! ordered, and a single-flight guard rejects overlapping submissions so
//! that timestamp ordering stays total.

use crate::chat::classify::{classify_response, combine_due_date, confirmation_message, Reply};
use crate::chat::session::{ChatMessage, SessionHistory, TimestampSource};
use crate::completion::{CompletionClient, Turn};
use crate::error::{Result, TaskdeckError};
use crate::store::{ChatMessageRecord, DocumentStore, StoreQuery, TaskRecord};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Fixed reply shown when the completion flow fails
pub const ERROR_REPLY: &str = "Error processing request.";

/// Outcome of a message submission
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The assistant's reply, already appended to the displayed history
    Reply(ChatMessage),
    /// Another submission is still in flight; this one was a no-op
    Busy,
}

/// Releases the single-flight flag on every exit path
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Coordinates chat turns across persistence and the completion service
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdeck::chat::Orchestrator;
/// use taskdeck::completion::GeminiClient;
/// use taskdeck::config::Config;
/// use taskdeck::store::AppwriteStore;
///
/// # async fn example() -> taskdeck::error::Result<()> {
/// let config = Config::load("config/config.yaml")?;
/// let store = Arc::new(AppwriteStore::new(config.store.clone())?);
/// let completion = Arc::new(GeminiClient::new(config.completion.clone())?);
/// let orchestrator = Orchestrator::new(
///     store,
///     completion,
///     config.store.chat_collection_id.clone(),
///     config.store.tasks_collection_id.clone(),
/// );
///
/// orchestrator.load_session().await?;
/// let outcome = orchestrator.submit_user_message("I have a meeting Friday at 3 PM").await?;
/// # Ok(())
/// # }
/// ```
pub struct Orchestrator {
    store: Arc<dyn DocumentStore>,
    completion: Arc<dyn CompletionClient>,
    chat_collection_id: String,
    tasks_collection_id: String,
    messages: Mutex<Vec<ChatMessage>>,
    history: Mutex<SessionHistory>,
    timestamps: Mutex<TimestampSource>,
    in_flight: AtomicBool,
}

impl Orchestrator {
    /// Create an orchestrator for a fresh session
    ///
    /// # Arguments
    ///
    /// * `store` - Document store handle
    /// * `completion` - Completion service handle
    /// * `chat_collection_id` - Collection holding chat messages
    /// * `tasks_collection_id` - Collection holding task records
    pub fn new(
        store: Arc<dyn DocumentStore>,
        completion: Arc<dyn CompletionClient>,
        chat_collection_id: String,
        tasks_collection_id: String,
    ) -> Self {
        Self {
            store,
            completion,
            chat_collection_id,
            tasks_collection_id,
            messages: Mutex::new(Vec::new()),
            history: Mutex::new(SessionHistory::new()),
            timestamps: Mutex::new(TimestampSource::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Load persisted chat history and rebuild session state
    ///
    /// Reads all chat documents ordered ascending by `timestamp`,
    /// rehydrates the displayed history, and rebuilds the session-history
    /// projection (assistant turns remapped to model turns). An empty
    /// result is a new session; a store read failure degrades to an empty
    /// session with a warning rather than an error, so chatting can
    /// continue against a fresh history.
    ///
    /// # Returns
    ///
    /// The rehydrated messages, oldest first
    pub async fn load_session(&self) -> Result<Vec<ChatMessage>> {
        let queries = [StoreQuery::OrderAsc("timestamp".to_string())];
        let documents = match self
            .store
            .list_documents(&self.chat_collection_id, &queries)
            .await
        {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!("Failed to load chat history, starting fresh: {}", e);
                return Ok(Vec::new());
            }
        };

        let mut restored = Vec::with_capacity(documents.len());
        for document in &documents {
            match document.deserialize_fields::<ChatMessageRecord>() {
                Ok(record) => restored.push(ChatMessage::from_record(&record)),
                Err(e) => {
                    tracing::warn!("Skipping malformed chat document {}: {}", document.id, e);
                }
            }
        }

        {
            let mut timestamps = self.timestamps.lock().unwrap();
            for message in &restored {
                timestamps.observe(&message.timestamp);
            }
        }
        *self.history.lock().unwrap() = SessionHistory::from_messages(&restored);
        *self.messages.lock().unwrap() = restored.clone();

        tracing::info!("Restored {} chat messages", restored.len());
        Ok(restored)
    }

    /// Snapshot of the displayed history
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Submit one user message and produce exactly one displayed reply
    ///
    /// Steps, in order: append the user turn optimistically and persist it;
    /// call the completion service with the accumulated history; classify
    /// the response; on a Task classification persist a new task record and
    /// reply with a confirmation, otherwise reply with the raw text; append
    /// and persist the assistant turn.
    ///
    /// Completion failures and task-persistence failures degrade to the
    /// fixed error reply. Chat-message persistence failures are logged and
    /// swallowed, since chat continuity takes priority over durability.
    ///
    /// # Arguments
    ///
    /// * `text` - The user-entered message
    ///
    /// # Errors
    ///
    /// Returns `TaskdeckError::InvalidInput` for blank input. Returns
    /// `SubmitOutcome::Busy` (not an error) while another submission is in
    /// flight.
    pub async fn submit_user_message(&self, text: &str) -> Result<SubmitOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskdeckError::InvalidInput("message is empty".to_string()).into());
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("Submission rejected: another turn is in flight");
            return Ok(SubmitOutcome::Busy);
        }
        let _guard = FlightGuard(&self.in_flight);

        // Optimistic append before any network call
        let user_message = ChatMessage::user(trimmed, self.next_timestamp());
        self.messages.lock().unwrap().push(user_message.clone());

        // Snapshot the projection before this turn is added to it
        let prior_turns: Vec<Turn> = self.history.lock().unwrap().turns().to_vec();

        self.persist_message(&user_message).await;

        let reply_text = match self.completion.send_message(&prior_turns, trimmed).await {
            Ok(raw) => self.handle_response(&raw).await,
            Err(e) => {
                tracing::error!("Completion request failed: {}", e);
                ERROR_REPLY.to_string()
            }
        };

        let assistant_message = ChatMessage::assistant(reply_text, self.next_timestamp());
        self.messages.lock().unwrap().push(assistant_message.clone());
        {
            let mut history = self.history.lock().unwrap();
            history.push_message(&user_message);
            history.push_message(&assistant_message);
        }

        self.persist_message(&assistant_message).await;

        Ok(SubmitOutcome::Reply(assistant_message))
    }

    /// Classify a completion response and apply the Task branch
    ///
    /// Returns the text to display as the assistant reply.
    async fn handle_response(&self, raw: &str) -> String {
        match classify_response(raw) {
            Reply::Chat(text) => text,
            Reply::Task(draft) => {
                let due_date = combine_due_date(&draft.due_date, draft.due_time.as_deref());
                let record = TaskRecord {
                    title: draft.title.clone(),
                    description: None,
                    due_date,
                    location: draft.location.clone(),
                    completed: false,
                };

                let data = match serde_json::to_value(&record) {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::error!("Failed to serialize extracted task: {}", e);
                        return ERROR_REPLY.to_string();
                    }
                };

                match self
                    .store
                    .create_document(&self.tasks_collection_id, data)
                    .await
                {
                    Ok(document) => {
                        tracing::info!("Extracted task persisted: {}", document.id);
                        confirmation_message(&draft)
                    }
                    Err(e) => {
                        tracing::error!("Failed to persist extracted task: {}", e);
                        ERROR_REPLY.to_string()
                    }
                }
            }
        }
    }

    /// Persist a chat message, logging and swallowing failures
    async fn persist_message(&self, message: &ChatMessage) {
        let data = match serde_json::to_value(message.to_record()) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Failed to serialize chat message: {}", e);
                return;
            }
        };

        if let Err(e) = self
            .store
            .create_document(&self.chat_collection_id, data)
            .await
        {
            tracing::warn!("Failed to persist {} message: {}", message.role, e);
        }
    }

    fn next_timestamp(&self) -> String {
        self.timestamps.lock().unwrap().next()
    }
}
