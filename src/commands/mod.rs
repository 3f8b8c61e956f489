//! Command handlers for Taskdeck
//!
//! Each CLI command gets a handler here. Handlers wire the configured
//! Appwrite store and Gemini client into the chat orchestrator or the
//! task service and drive the terminal interaction.

use crate::chat::{Orchestrator, Role, SubmitOutcome};
use crate::completion::GeminiClient;
use crate::config::Config;
use crate::error::Result;
use crate::store::AppwriteStore;
use crate::tasks::TaskService;

use std::sync::Arc;

// Task listing and creation commands
pub mod tasks;

/// Build the chat orchestrator from configuration
fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let store = Arc::new(AppwriteStore::new(config.store.clone())?);
    let completion = Arc::new(GeminiClient::new(config.completion.clone())?);
    Ok(Orchestrator::new(
        store,
        completion,
        config.store.chat_collection_id.clone(),
        config.store.tasks_collection_id.clone(),
    ))
}

/// Build the task service from configuration
pub(crate) fn build_task_service(config: &Config) -> Result<TaskService> {
    let store = Arc::new(AppwriteStore::new(config.store.clone())?);
    Ok(TaskService::new(
        store,
        config.store.tasks_collection_id.clone(),
    ))
}

// Chat command handler
pub mod chat {
    //! Interactive chat session handler.
    //!
    //! Creates an `Orchestrator`, replays the persisted conversation, and
    //! runs a readline-based loop that submits user input to the assistant.

    use super::*;
    use crate::chat::ChatMessage;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start an interactive chat session
    ///
    /// Restores the persisted conversation before accepting input. Type
    /// `exit` or `quit` (or press CTRL-D) to leave the session.
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Examples
    ///
    /// ```
    /// use taskdeck::commands::chat;
    /// use taskdeck::config::Config;
    ///
    /// // In application code:
    /// // chat::run_chat(Config::default()).await?;
    /// ```
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat session");

        let orchestrator = build_orchestrator(&config)?;

        let restored = orchestrator.load_session().await?;
        print_welcome_banner();
        for message in &restored {
            print_message(message);
        }

        let mut rl = DefaultEditor::new()?;

        loop {
            match rl.readline("you> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit")
                    {
                        break;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    match orchestrator.submit_user_message(trimmed).await {
                        Ok(SubmitOutcome::Reply(reply)) => {
                            print_message(&reply);
                        }
                        Ok(SubmitOutcome::Busy) => {
                            println!("{}", "Still working on the previous message...".yellow());
                        }
                        Err(e) => {
                            eprintln!("{}", format!("Error: {}", e).red());
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Display welcome banner
    fn print_welcome_banner() {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                 Taskdeck Assistant - Welcome!                ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Describe a task with a date and time and I'll add it for you.");
        println!("Type 'exit' to quit\n");
    }

    /// Print a single message with role-specific coloring
    fn print_message(message: &ChatMessage) {
        match message.role {
            Role::User => println!("{} {}", "you>".cyan(), message.text),
            Role::Assistant => println!("{} {}\n", "assistant>".green(), message.text),
        }
    }
}
