//! Configuration management for Taskdeck
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from a YAML file and `TASKDECK_*` environment variables.
//!
//! Both remote services are configured here: the hosted document store
//! (endpoint, project, database, and collection identifiers) and the
//! completion service (API base, model, API key). Missing identifiers or
//! credentials are a fatal startup condition surfaced by [`Config::validate`].

use crate::error::{Result, TaskdeckError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Taskdeck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Completion service configuration
    #[serde(default)]
    pub completion: CompletionConfig,
}

/// Document store configuration
///
/// Identifies the hosted document database and the two collections used by
/// the application: one for task records and one for chat messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base endpoint of the document store REST API
    #[serde(default = "default_store_endpoint")]
    pub endpoint: String,

    /// Project identifier sent with every request
    #[serde(default)]
    pub project_id: String,

    /// Database identifier containing both collections
    #[serde(default)]
    pub database_id: String,

    /// Collection holding task records
    #[serde(default)]
    pub tasks_collection_id: String,

    /// Collection holding chat messages
    #[serde(default)]
    pub chat_collection_id: String,

    /// API key for server-side access
    #[serde(default)]
    pub api_key: String,
}

fn default_store_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_store_endpoint(),
            project_id: String::new(),
            database_id: String::new(),
            tasks_collection_id: String::new(),
            chat_collection_id: String::new(),
            api_key: String::new(),
        }
    }
}

/// Completion service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Base URL for completion endpoints (useful for tests and local mocks)
    ///
    /// When set to a mock server URI, tests can exercise the client without
    /// touching the hosted service.
    #[serde(default = "default_completion_api_base")]
    pub api_base: String,

    /// Model to request completions from
    #[serde(default = "default_completion_model")]
    pub model: String,

    /// API key for the completion service
    #[serde(default)]
    pub api_key: String,
}

fn default_completion_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_completion_model() -> String {
    "gemini-2.0-flash-lite".to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_base: default_completion_api_base(),
            model: default_completion_model(),
            api_key: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file with environment overrides
    ///
    /// A missing file is not an error: defaults are used and environment
    /// variables may still supply the required identifiers.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&contents)
                .map_err(|e| TaskdeckError::Config(format!("Failed to parse {:?}: {}", path, e)))?
        } else {
            tracing::debug!("Config file {:?} not found, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `TASKDECK_*` environment variable overrides
    ///
    /// Environment variables take precedence over file values so deployments
    /// can inject identifiers and credentials without editing the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TASKDECK_STORE_ENDPOINT") {
            self.store.endpoint = v;
        }
        if let Ok(v) = std::env::var("TASKDECK_STORE_PROJECT_ID") {
            self.store.project_id = v;
        }
        if let Ok(v) = std::env::var("TASKDECK_STORE_DATABASE_ID") {
            self.store.database_id = v;
        }
        if let Ok(v) = std::env::var("TASKDECK_TASKS_COLLECTION_ID") {
            self.store.tasks_collection_id = v;
        }
        if let Ok(v) = std::env::var("TASKDECK_CHAT_COLLECTION_ID") {
            self.store.chat_collection_id = v;
        }
        if let Ok(v) = std::env::var("TASKDECK_STORE_API_KEY") {
            self.store.api_key = v;
        }
        if let Ok(v) = std::env::var("TASKDECK_COMPLETION_API_BASE") {
            self.completion.api_base = v;
        }
        if let Ok(v) = std::env::var("TASKDECK_COMPLETION_MODEL") {
            self.completion.model = v;
        }
        if let Ok(v) = std::env::var("TASKDECK_COMPLETION_API_KEY") {
            self.completion.api_key = v;
        }
    }

    /// Validate that all required values are present
    ///
    /// # Errors
    ///
    /// Returns `TaskdeckError::Config` naming the first missing field, or
    /// `TaskdeckError::MissingCredentials` for absent API keys
    pub fn validate(&self) -> Result<()> {
        if self.store.endpoint.trim().is_empty() {
            return Err(TaskdeckError::Config("store.endpoint is required".to_string()).into());
        }
        if self.store.project_id.trim().is_empty() {
            return Err(TaskdeckError::Config("store.project_id is required".to_string()).into());
        }
        if self.store.database_id.trim().is_empty() {
            return Err(TaskdeckError::Config("store.database_id is required".to_string()).into());
        }
        if self.store.tasks_collection_id.trim().is_empty() {
            return Err(
                TaskdeckError::Config("store.tasks_collection_id is required".to_string()).into(),
            );
        }
        if self.store.chat_collection_id.trim().is_empty() {
            return Err(
                TaskdeckError::Config("store.chat_collection_id is required".to_string()).into(),
            );
        }
        if self.store.api_key.trim().is_empty() {
            return Err(TaskdeckError::MissingCredentials("store".to_string()).into());
        }
        if self.completion.api_key.trim().is_empty() {
            return Err(TaskdeckError::MissingCredentials("completion".to_string()).into());
        }
        Ok(())
    }
}
