//! Task listing and creation command handlers
//!
//! Renders tasks as a table and forwards direct additions to the
//! task service.

use crate::chat::is_calendar_date;
use crate::config::Config;
use crate::error::{Result, TaskdeckError};
use crate::store::TaskRecord;
use crate::tasks::{visible_for_date, NewTask};

use chrono::Local;
use colored::Colorize;
use prettytable::{row, Table};

/// List tasks for a day
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `date` - Day to show as YYYY-MM-DD; defaults to today
/// * `all` - Show every task regardless of day
pub async fn run_list(config: Config, date: Option<String>, all: bool) -> Result<()> {
    let service = super::build_task_service(&config)?;
    let tasks = service.list_tasks().await?;

    if all {
        print_tasks(&tasks, "all days");
        return Ok(());
    }

    let selected = match date {
        Some(d) => {
            if !is_calendar_date(&d) {
                return Err(TaskdeckError::InvalidInput(format!(
                    "invalid date '{}', expected YYYY-MM-DD",
                    d
                ))
                .into());
            }
            d
        }
        None => Local::now().format("%Y-%m-%d").to_string(),
    };

    let visible = visible_for_date(&tasks, &selected);
    print_tasks(&visible, &selected);
    Ok(())
}

/// Add a task directly from the command line
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `title` - Task title
/// * `description` - Optional longer description
/// * `date` - Due date as YYYY-MM-DD
/// * `time` - Optional due time as HH:MM
/// * `location` - Optional location
pub async fn run_add(
    config: Config,
    title: String,
    description: Option<String>,
    date: String,
    time: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let service = super::build_task_service(&config)?;

    let form = NewTask {
        title,
        description,
        due_date: date.clone(),
        due_time: time.unwrap_or_default(),
        location,
    };
    let tasks = service.add_task(form).await?;

    println!("{}", "Task added.".green());
    let visible = visible_for_date(&tasks, &date);
    print_tasks(&visible, &date);
    Ok(())
}

/// Render tasks as a table
fn print_tasks(tasks: &[TaskRecord], day_label: &str) {
    if tasks.is_empty() {
        println!("\nNo tasks for {}.\n", day_label);
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["Title", "Due", "Location", "Description", "Done"]);

    for task in tasks {
        let due = task.due_date.as_deref().unwrap_or("-");
        let location = task.location.as_deref().unwrap_or("-");
        let description = task.description.as_deref().unwrap_or("-");
        let done = if task.completed { "Yes" } else { "No" };

        table.add_row(row![task.title, due, location, description, done]);
    }

    println!("\nTasks for {}:\n", day_label);
    table.printstd();
    println!();
}
