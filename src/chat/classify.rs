//! Completion response classification
//!
//! The completion service returns either ordinary chat text or a JSON
//! object describing an extracted event; nothing in the service contract
//! guarantees which. This module performs the shape inspection in one
//! place, producing an explicit tagged variant instead of ad-hoc property
//! probing at call sites.

use chrono::{NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

/// Input patterns accepted when combining a due date and time
///
/// Covers the 24-hour form the system prompt requests plus the 12-hour
/// clock form users type into the task form.
const DATE_TIME_PATTERNS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
];

/// Structured task fields extracted from a completion response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Event title
    pub title: String,
    /// Due date as `YYYY-MM-DD`
    pub due_date: String,
    /// Optional due time string
    pub due_time: Option<String>,
    /// Optional location
    pub location: Option<String>,
}

/// Classification of a completion response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Ordinary chat text, displayed verbatim
    Chat(String),
    /// A structured event description to persist as a task
    Task(TaskDraft),
}

/// Classify a raw completion response
///
/// The decision procedure, evaluated fresh per call:
/// - text that does not parse as a JSON object is Chat (an expected case,
///   not an error)
/// - a JSON object missing `title` or `dueDate` is Chat, displayed as the
///   raw JSON string
/// - a JSON object with both is Task
///
/// # Examples
///
/// ```
/// use taskdeck::chat::{classify_response, Reply};
///
/// let reply = classify_response("Sure, I can help with that!");
/// assert!(matches!(reply, Reply::Chat(_)));
///
/// let reply = classify_response(r#"{"title":"Meeting","dueDate":"2025-03-22"}"#);
/// assert!(matches!(reply, Reply::Task(_)));
/// ```
pub fn classify_response(text: &str) -> Reply {
    let parsed: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!("Response is not JSON, treating as chat");
            return Reply::Chat(text.to_string());
        }
    };

    let object = match parsed.as_object() {
        Some(object) => object,
        None => return Reply::Chat(text.to_string()),
    };

    let title = object.get("title").and_then(Value::as_str);
    let due_date = object.get("dueDate").and_then(Value::as_str);

    match (title, due_date) {
        (Some(title), Some(due_date)) => Reply::Task(TaskDraft {
            title: title.to_string(),
            due_date: due_date.to_string(),
            due_time: object
                .get("dueTime")
                .and_then(Value::as_str)
                .map(str::to_string),
            location: object
                .get("location")
                .and_then(Value::as_str)
                .map(str::to_string),
        }),
        _ => {
            tracing::debug!("JSON response lacks title/dueDate, treating as chat");
            Reply::Chat(text.to_string())
        }
    }
}

/// Combine a due date and optional time into one ISO-8601 instant
///
/// Parse failure (including an absent time) yields `None` rather than an
/// error: a task with no usable due instant is created with a null due
/// date, never aborted. No timezone conversion happens; the fields are
/// taken as given and stamped UTC.
///
/// # Examples
///
/// ```
/// use taskdeck::chat::combine_due_date;
///
/// let combined = combine_due_date("2025-03-22", Some("15:00")).unwrap();
/// assert_eq!(combined, "2025-03-22T15:00:00.000+00:00");
/// assert!(combine_due_date("someday", Some("15:00")).is_none());
/// ```
pub fn combine_due_date(due_date: &str, due_time: Option<&str>) -> Option<String> {
    let time = due_time?;
    let joined = format!("{} {}", due_date.trim(), time.trim());

    let naive: Option<NaiveDateTime> = DATE_TIME_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(&joined, pattern).ok());

    let naive = match naive {
        Some(naive) => naive,
        None => {
            tracing::debug!("Unparseable due date/time: {:?}", joined);
            return None;
        }
    };

    Some(
        Utc.from_utc_datetime(&naive)
            .to_rfc3339_opts(SecondsFormat::Millis, false),
    )
}

/// Returns true if `date` is a well-formed `YYYY-MM-DD` value
pub fn is_calendar_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Compose the human-readable confirmation for an extracted task
///
/// Embeds the title, date, and any time and location the draft carried.
pub fn confirmation_message(draft: &TaskDraft) -> String {
    let mut message = format!("Task added: {} on {}", draft.title, draft.due_date);
    if let Some(time) = &draft.due_time {
        message.push_str(&format!(" at {}", time));
    }
    if let Some(location) = &draft.location {
        message.push_str(&format!(" in {}", location));
    }
    message
}
