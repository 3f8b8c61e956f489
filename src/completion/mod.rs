//! Completion service abstraction and implementations
//!
//! This module defines the conversation turn types supplied as context to
//! the completion service, the [`CompletionClient`] trait consumed by the
//! chat orchestrator, and the Gemini REST implementation.

mod gemini;

pub use gemini::GeminiClient;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a conversation turn as the completion service expects it
///
/// The service uses "model" where the rest of the application says
/// "assistant"; the remap happens when the session projection is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// A user-authored turn
    User,
    /// A model-authored turn
    Model,
}

impl TurnRole {
    /// Wire-format name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

/// One turn of session history supplied as completion context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Who authored the turn
    pub role: TurnRole,
    /// Turn text
    pub text: String,
}

impl Turn {
    /// Creates a user turn
    ///
    /// # Examples
    ///
    /// ```
    /// use taskdeck::completion::{Turn, TurnRole};
    ///
    /// let turn = Turn::user("Hello!");
    /// assert_eq!(turn.role, TurnRole::User);
    /// ```
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    /// Creates a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}

/// Abstraction over the hosted text-generation service
///
/// One call carries the accumulated session history plus the new user turn
/// and returns the raw response text, which may or may not be JSON-encoded.
/// Classifying that text is the orchestrator's job, not the client's.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a user message with session history as context
    ///
    /// # Arguments
    ///
    /// * `history` - Prior turns of the session, oldest first
    /// * `text` - The new user message
    ///
    /// # Returns
    ///
    /// The raw response text from the service
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response carries no text
    async fn send_message(&self, history: &[Turn], text: &str) -> Result<String>;
}
