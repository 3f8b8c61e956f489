//! Command-line interface definition for Taskdeck
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for the chat assistant and task management.

use clap::{Parser, Subcommand};

/// Taskdeck - Calendar task manager with a chat assistant
///
/// Manage day-to-day tasks stored in a hosted document database and
/// capture new ones through a conversational assistant.
#[derive(Parser, Debug, Clone)]
#[command(name = "taskdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Taskdeck
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session with the assistant
    Chat,

    /// Manage tasks
    Tasks {
        /// Task subcommand
        #[command(subcommand)]
        command: TaskCommand,
    },
}

/// Task management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// List tasks for a day
    List {
        /// Day to show, as YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Show every task regardless of day
        #[arg(short, long)]
        all: bool,
    },

    /// Add a task directly
    Add {
        /// Task title
        #[arg(short, long)]
        title: String,

        /// Longer description
        #[arg(long)]
        description: Option<String>,

        /// Due date as YYYY-MM-DD
        #[arg(short, long)]
        date: String,

        /// Due time as HH:MM (defaults to 00:00)
        #[arg(long)]
        time: Option<String>,

        /// Location
        #[arg(short, long)]
        location: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Chat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Chat));
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["taskdeck", "chat"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(matches!(cli.command, Commands::Chat));
    }

    #[test]
    fn test_cli_parse_tasks_list() {
        let cli = Cli::try_parse_from(["taskdeck", "tasks", "list"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Tasks {
            command: TaskCommand::List { date, all },
        } = cli.command
        {
            assert_eq!(date, None);
            assert!(!all);
        } else {
            panic!("Expected Tasks List command");
        }
    }

    #[test]
    fn test_cli_parse_tasks_list_with_date() {
        let cli = Cli::try_parse_from(["taskdeck", "tasks", "list", "--date", "2025-03-15"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Tasks {
            command: TaskCommand::List { date, all },
        } = cli.command
        {
            assert_eq!(date, Some("2025-03-15".to_string()));
            assert!(!all);
        } else {
            panic!("Expected Tasks List command");
        }
    }

    #[test]
    fn test_cli_parse_tasks_list_all() {
        let cli = Cli::try_parse_from(["taskdeck", "tasks", "list", "--all"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Tasks {
            command: TaskCommand::List { date, all },
        } = cli.command
        {
            assert_eq!(date, None);
            assert!(all);
        } else {
            panic!("Expected Tasks List command");
        }
    }

    #[test]
    fn test_cli_parse_tasks_add() {
        let cli = Cli::try_parse_from([
            "taskdeck", "tasks", "add", "--title", "Dentist", "--date", "2025-03-15",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Tasks {
            command:
                TaskCommand::Add {
                    title,
                    description,
                    date,
                    time,
                    location,
                },
        } = cli.command
        {
            assert_eq!(title, "Dentist");
            assert_eq!(description, None);
            assert_eq!(date, "2025-03-15");
            assert_eq!(time, None);
            assert_eq!(location, None);
        } else {
            panic!("Expected Tasks Add command");
        }
    }

    #[test]
    fn test_cli_parse_tasks_add_full() {
        let cli = Cli::try_parse_from([
            "taskdeck",
            "tasks",
            "add",
            "--title",
            "Dentist",
            "--description",
            "Annual checkup",
            "--date",
            "2025-03-15",
            "--time",
            "14:30",
            "--location",
            "Main St clinic",
        ]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        if let Commands::Tasks {
            command:
                TaskCommand::Add {
                    title,
                    description,
                    date,
                    time,
                    location,
                },
        } = cli.command
        {
            assert_eq!(title, "Dentist");
            assert_eq!(description, Some("Annual checkup".to_string()));
            assert_eq!(date, "2025-03-15");
            assert_eq!(time, Some("14:30".to_string()));
            assert_eq!(location, Some("Main St clinic".to_string()));
        } else {
            panic!("Expected Tasks Add command");
        }
    }

    #[test]
    fn test_cli_parse_tasks_add_requires_title() {
        let cli = Cli::try_parse_from(["taskdeck", "tasks", "add", "--date", "2025-03-15"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_verbose_flag() {
        let cli = Cli::try_parse_from(["taskdeck", "--verbose", "chat"]);
        assert!(cli.is_ok());
        assert!(cli.unwrap().verbose);
    }

    #[test]
    fn test_cli_parse_config_path() {
        let cli = Cli::try_parse_from(["taskdeck", "--config", "custom.yaml", "chat"]);
        assert!(cli.is_ok());
        assert_eq!(cli.unwrap().config, Some("custom.yaml".to_string()));
    }

    #[test]
    fn test_cli_parse_no_command_fails() {
        let cli = Cli::try_parse_from(["taskdeck"]);
        assert!(cli.is_err());
    }
}
