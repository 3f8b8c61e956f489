//! Session state for the chat assistant
//!
//! This module defines the displayed chat message type, the in-memory
//! session-history projection supplied to the completion service, and the
//! monotonic timestamp source that keeps persisted message ordering total.

use crate::completion::Turn;
use crate::store::ChatMessageRecord;

use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sender of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message typed by the user
    User,
    /// A reply produced by the assistant
    Assistant,
}

impl Role {
    /// Persisted name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    /// Interpret a persisted role string
    ///
    /// Anything that is not exactly "user" is treated as the assistant,
    /// matching how history documents are rehydrated.
    pub fn from_record_str(s: &str) -> Self {
        if s == "user" {
            Self::User
        } else {
            Self::Assistant
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One displayed chat message
///
/// Created on every user submission and every assistant reply; persisted
/// immediately and never mutated. Ordering is defined by `timestamp`
/// ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent the message
    pub role: Role,
    /// Message text
    pub text: String,
    /// ISO-8601 creation instant
    pub timestamp: String,
}

impl ChatMessage {
    /// Creates a user message
    pub fn user(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Creates an assistant message
    pub fn assistant(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Convert to the persisted record shape
    pub fn to_record(&self) -> ChatMessageRecord {
        ChatMessageRecord {
            role: self.role.as_str().to_string(),
            message: self.text.clone(),
            timestamp: self.timestamp.clone(),
        }
    }

    /// Rehydrate from a persisted record
    pub fn from_record(record: &ChatMessageRecord) -> Self {
        Self {
            role: Role::from_record_str(&record.role),
            text: record.message.clone(),
            timestamp: record.timestamp.clone(),
        }
    }
}

/// In-memory session-history projection
///
/// An ordered sequence of turns shaped for the completion service, with
/// `assistant` remapped to `model`. Derived from persisted chat messages and
/// rebuildable at any time; never persisted itself.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    turns: Vec<Turn>,
}

impl SessionHistory {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the projection from displayed messages
    ///
    /// # Examples
    ///
    /// ```
    /// use taskdeck::chat::{ChatMessage, SessionHistory};
    /// use taskdeck::completion::TurnRole;
    ///
    /// let messages = vec![
    ///     ChatMessage::user("hi", "2025-03-15T09:00:00.000+00:00"),
    ///     ChatMessage::assistant("hello", "2025-03-15T09:00:01.000+00:00"),
    /// ];
    /// let history = SessionHistory::from_messages(&messages);
    /// assert_eq!(history.turns()[1].role, TurnRole::Model);
    /// ```
    pub fn from_messages(messages: &[ChatMessage]) -> Self {
        let turns = messages.iter().map(turn_from_message).collect();
        Self { turns }
    }

    /// Append a turn derived from a displayed message
    pub fn push_message(&mut self, message: &ChatMessage) {
        self.turns.push(turn_from_message(message));
    }

    /// The accumulated turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns in the projection
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if no turns have accumulated
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

fn turn_from_message(message: &ChatMessage) -> Turn {
    match message.role {
        Role::User => Turn::user(message.text.clone()),
        Role::Assistant => Turn::model(message.text.clone()),
    }
}

/// Monotonic timestamp source for persisted chat messages
///
/// History reconstruction orders solely by timestamp, so generated instants
/// must strictly increase. When the wall clock does not exceed the last
/// issued instant, the new one is bumped 1 ms past it.
#[derive(Debug, Default)]
pub struct TimestampSource {
    last: Option<DateTime<Utc>>,
}

impl TimestampSource {
    /// Creates a fresh source with no prior instant
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already-persisted timestamp so new ones land after it
    ///
    /// Unparseable values are ignored.
    pub fn observe(&mut self, timestamp: &str) {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
            let parsed = parsed.with_timezone(&Utc);
            if self.last.map_or(true, |last| parsed > last) {
                self.last = Some(parsed);
            }
        }
    }

    /// Issue the next strictly-increasing ISO-8601 timestamp
    ///
    /// The emitted string carries millisecond precision, so the comparison
    /// must happen at millisecond granularity too: two calls in the same
    /// millisecond would otherwise pass a nanosecond-precision check and
    /// still emit identical strings.
    pub fn next(&mut self) -> String {
        let wall = Utc::now();
        let mut now = Utc
            .timestamp_millis_opt(wall.timestamp_millis())
            .single()
            .unwrap_or(wall);
        if let Some(last) = self.last {
            if now <= last {
                now = last + Duration::milliseconds(1);
            }
        }
        self.last = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Millis, false)
    }
}
