//! System prompt for the task assistant
//!
//! This module provides the fixed system instruction sent to the completion
//! service. The instruction asks the model to answer general questions as
//! plain text and to return a fixed-shape JSON object when the user
//! describes an event.

/// Builds the system instruction for the task assistant
///
/// The instruction is a fixed constant of the deployment: the response
/// contract it establishes (plain text or a `{title, dueDate, dueTime,
/// location}` JSON object) is what the classifier in `chat::classify`
/// inspects.
///
/// # Examples
///
/// ```
/// use taskdeck::prompts::task_assistant_instruction;
///
/// let prompt = task_assistant_instruction();
/// assert!(prompt.contains("dueDate"));
/// assert!(prompt.contains("JSON"));
/// ```
pub fn task_assistant_instruction() -> &'static str {
    r#"You are an AI assistant.
- If the user asks a general question, respond like a normal chatbot.
- If the user describes an event, extract task details and return them in JSON.

Example event input:
"I have a meeting on Friday at 3 PM at Starbucks."

Expected JSON output:
{
  "title": "Meeting",
  "dueDate": "2025-03-22",
  "dueTime": "15:00:00",
  "location": "Starbucks"
}

Dates use YYYY-MM-DD and times use 24-hour HH:MM:SS.
If the input isn't a task, respond normally."#
}
