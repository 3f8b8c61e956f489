//! Taskdeck - Calendar task manager with a chat assistant
//!
#![doc = "Taskdeck - Calendar task manager with a chat assistant"]
#![doc = "Main entry point for the Taskdeck application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskdeck::cli::{Cli, Commands, TaskCommand};
use taskdeck::commands;
use taskdeck::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat => {
            tracing::info!("Starting interactive chat session");
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Tasks { command } => match command {
            TaskCommand::List { date, all } => {
                tracing::info!("Listing tasks");
                if let Some(d) = &date {
                    tracing::debug!("Selected day: {}", d);
                }
                commands::tasks::run_list(config, date, all).await?;
                Ok(())
            }
            TaskCommand::Add {
                title,
                description,
                date,
                time,
                location,
            } => {
                tracing::info!("Adding task");
                commands::tasks::run_add(config, title, description, date, time, location).await?;
                Ok(())
            }
        },
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `--verbose` raises the default level to debug; an explicit `RUST_LOG`
/// still wins over both defaults.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "taskdeck=debug"
    } else {
        "taskdeck=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
