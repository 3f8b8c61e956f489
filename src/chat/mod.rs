//! Chat assistant: session state, response classification, orchestration
//!
//! The orchestrator coordinates one chat turn across the document store and
//! the completion service; `session` holds the displayed history and the
//! projection supplied as completion context; `classify` turns raw response
//! text into an explicit Chat-or-Task variant.

pub mod classify;
pub mod orchestrator;
pub mod session;

pub use classify::{
    classify_response, combine_due_date, confirmation_message, is_calendar_date, Reply, TaskDraft,
};
pub use orchestrator::{Orchestrator, SubmitOutcome, ERROR_REPLY};
pub use session::{ChatMessage, Role, SessionHistory, TimestampSource};
