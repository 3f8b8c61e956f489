//! Taskdeck - Calendar task manager with a chat assistant
//!
//! This library provides the core functionality for Taskdeck: a task list
//! backed by a hosted document database and a chat assistant that turns
//! conversational requests into structured tasks.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `chat`: Conversation orchestration, response classification, and session state
//! - `completion`: Completion client abstraction and the Gemini implementation
//! - `store`: Document store abstraction and the Appwrite implementation
//! - `tasks`: Task service, day filtering, and direct task creation
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use taskdeck::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     // Orchestrator usage would go here
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod prompts;
pub mod store;
pub mod tasks;

// Re-export commonly used types
pub use chat::{ChatMessage, Orchestrator, Reply, Role, SubmitOutcome, TaskDraft};
pub use completion::{CompletionClient, GeminiClient, Turn};
pub use config::Config;
pub use error::{Result, TaskdeckError};
pub use store::{AppwriteStore, DocumentStore};
pub use tasks::TaskService;

#[cfg(test)]
pub mod test_utils;
