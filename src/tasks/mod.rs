//! Task list service and calendar-day filtering
//!
//! This module loads task records from the document store, filters them by
//! calendar day, and creates tasks from the explicit form flow. Day
//! filtering is purely lexical on the stored ISO string: the date portion
//! before the literal `T` is compared for exact equality with the selected
//! `YYYY-MM-DD` value, with no timezone conversion.

use crate::chat::classify::combine_due_date;
use crate::error::{Result, TaskdeckError};
use crate::store::{DocumentStore, TaskRecord};

use std::sync::Arc;

/// Time used when the form leaves the due time blank
const DEFAULT_DUE_TIME: &str = "00:00";

/// Fields collected by the add-task form
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    /// Task title (required)
    pub title: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Due date as `YYYY-MM-DD` (required)
    pub due_date: String,
    /// Due time text; blank means midnight
    pub due_time: String,
    /// Optional location
    pub location: Option<String>,
}

/// Select the tasks due on a given calendar day
///
/// Tasks with a null due date are excluded. Input order is preserved; the
/// result follows the store's natural document order, not re-sorted by
/// time. `selected_date` tolerates a trailing time portion, which is
/// stripped before comparing.
///
/// # Examples
///
/// ```
/// use taskdeck::store::TaskRecord;
/// use taskdeck::tasks::visible_for_date;
///
/// let tasks = vec![TaskRecord {
///     title: "Review".to_string(),
///     description: None,
///     due_date: Some("2025-03-15T09:00:00.000+00:00".to_string()),
///     location: None,
///     completed: false,
/// }];
/// assert_eq!(visible_for_date(&tasks, "2025-03-15").len(), 1);
/// assert!(visible_for_date(&tasks, "2025-03-16").is_empty());
/// ```
pub fn visible_for_date(tasks: &[TaskRecord], selected_date: &str) -> Vec<TaskRecord> {
    let selected = selected_date.split('T').next().unwrap_or(selected_date);

    tasks
        .iter()
        .filter(|task| {
            let due = match &task.due_date {
                Some(due) => due,
                None => return false,
            };
            let task_date = due.split('T').next().unwrap_or(due);
            task_date == selected
        })
        .cloned()
        .collect()
}

/// Task list operations over the document store
pub struct TaskService {
    store: Arc<dyn DocumentStore>,
    tasks_collection_id: String,
}

impl TaskService {
    /// Create a task service for the given collection
    pub fn new(store: Arc<dyn DocumentStore>, tasks_collection_id: String) -> Self {
        Self {
            store,
            tasks_collection_id,
        }
    }

    /// Fetch all task records in natural document order
    ///
    /// Malformed documents are skipped with a warning rather than failing
    /// the whole listing.
    ///
    /// # Errors
    ///
    /// Returns error if the store read fails
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        let documents = self
            .store
            .list_documents(&self.tasks_collection_id, &[])
            .await?;

        let mut tasks = Vec::with_capacity(documents.len());
        for document in &documents {
            match document.deserialize_fields::<TaskRecord>() {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    tracing::warn!("Skipping malformed task document {}: {}", document.id, e);
                }
            }
        }

        tracing::debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Create a task from the form and return the refreshed full list
    ///
    /// Title and due date are validated synchronously: when either is
    /// blank, no remote call is made. The due time defaults to midnight
    /// when left blank. On success the whole list is refetched; the full
    /// reload is the consistency mechanism, there is no incremental
    /// insert.
    ///
    /// # Errors
    ///
    /// Returns `TaskdeckError::InvalidInput` on validation failure, or a
    /// store error if creation or the subsequent reload fails
    pub async fn add_task(&self, form: NewTask) -> Result<Vec<TaskRecord>> {
        if form.title.trim().is_empty() {
            return Err(TaskdeckError::InvalidInput("title is required".to_string()).into());
        }
        if form.due_date.trim().is_empty() {
            return Err(TaskdeckError::InvalidInput("due date is required".to_string()).into());
        }

        let time = if form.due_time.trim().is_empty() {
            DEFAULT_DUE_TIME
        } else {
            form.due_time.trim()
        };

        let due_date = combine_due_date(form.due_date.trim(), Some(time)).ok_or_else(|| {
            TaskdeckError::InvalidInput(format!(
                "unrecognized due date/time: {} {}",
                form.due_date.trim(),
                time
            ))
        })?;

        let record = TaskRecord {
            title: form.title.trim().to_string(),
            description: form
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            due_date: Some(due_date),
            location: form.location.clone(),
            completed: false,
        };

        let document = self
            .store
            .create_document(&self.tasks_collection_id, serde_json::to_value(&record)?)
            .await?;
        tracing::info!("Created task {}: {}", document.id, record.title);

        self.list_tasks().await
    }
}
