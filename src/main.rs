//! Command-line shell over the task board.
//!
//! Usage:
//!
//! ```text
//! taskboard show [--search <term>] [--category <name>]
//! taskboard move <task-id> <pending|in_progress|completed>
//! taskboard complete <task-id>
//! taskboard edit <task-id> [--title <title>] [--description <text>]
//! ```
//!
//! Configuration comes from `taskboard.toml` and `TASKBOARD_*` variables;
//! the bearer token is read from `api.token`.

use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::sync::Arc;
use taskboard::board::{
    adapters::{http::HttpTaskApi, log::TracingNotifier},
    domain::{
        BoardColumn, CategoryFilter, DeadlineBadge, TaskFilter, TaskId, TaskPatch, TaskTitle,
    },
    services::{BoardProjection, DropOutcome, TaskBoard},
};
use taskboard::config::BoardConfig;
use thiserror::Error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type Board = TaskBoard<HttpTaskApi, TracingNotifier>;

#[derive(Debug, Parser)]
#[command(name = "taskboard", about = "Inspect and move tasks on the board")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the three board columns.
    Show {
        /// Only show tasks whose title contains this text.
        #[arg(long)]
        search: Option<String>,
        /// Only show tasks in this category (`all` for every category).
        #[arg(long)]
        category: Option<String>,
    },
    /// Move a task to another column.
    Move {
        /// Task identifier.
        task_id: String,
        /// Destination column.
        column: String,
    },
    /// Mark a task as completed.
    Complete {
        /// Task identifier.
        task_id: String,
    },
    /// Change a task's title or description.
    Edit {
        /// Task identifier.
        task_id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description; an empty value clears it.
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Error)]
enum ShellError {
    #[error("change was not applied: {0}")]
    NotApplied(String),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = BoardConfig::load_with_dotenv()?;
    taskboard::telemetry::init(&config.log)?;

    let api = HttpTaskApi::new(&config.api, config.api.session())?;
    let board = TaskBoard::new(Arc::new(api), Arc::new(TracingNotifier));
    board.refresh().await?;

    match cli.command {
        Command::Show { search, category } => {
            let mut filter = TaskFilter::new();
            if let Some(term) = search {
                filter = filter.with_search(term);
            }
            if let Some(name) = category {
                filter = filter.with_category(CategoryFilter::parse(&name));
            }
            let projection = board.filtered_projection(&filter)?;
            render(&board, &projection)?;
        }
        Command::Move { task_id, column } => {
            let column = BoardColumn::try_from(column.as_str())?;
            let outcome = board.move_task(&TaskId::new(task_id), column).await?;
            report(&outcome)?;
        }
        Command::Complete { task_id } => {
            let outcome = board.mark_completed(&TaskId::new(task_id)).await?;
            report(&outcome)?;
        }
        Command::Edit {
            task_id,
            title,
            description,
        } => {
            let patch = TaskPatch {
                title: title.map(TaskTitle::new).transpose()?,
                description: description
                    .map(|text| Some(text).filter(|text| !text.trim().is_empty())),
                ..TaskPatch::default()
            };
            let outcome = board.edit_task(&TaskId::new(task_id), patch).await?;
            report(&outcome)?;
        }
    }
    Ok(())
}

fn render(board: &Board, projection: &BoardProjection) -> Result<(), BoxError> {
    let mut out = io::stdout().lock();
    for column in BoardColumn::ALL {
        let tasks = projection.column(column);
        writeln!(out, "== {column} ({})", tasks.len())?;
        for task in tasks {
            let names: Vec<String> = board
                .collaborator_labels(task.id())?
                .iter()
                .map(|label| label.display_name().to_owned())
                .collect();
            let badge = DeadlineBadge::evaluate(task, &DefaultClock)
                .map(|badge| format!(" [{badge}]"))
                .unwrap_or_default();
            let reminder = if task.remind_me() { " (reminder)" } else { "" };
            writeln!(out, "  {} {}{badge}{reminder}", task.id(), task.title())?;
            if !names.is_empty() {
                writeln!(out, "    with {}", names.join(", "))?;
            }
        }
    }
    if projection.hidden() > 0 {
        writeln!(out, "({} archived or unrecognized tasks hidden)", projection.hidden())?;
    }
    Ok(())
}

fn report(outcome: &DropOutcome) -> Result<(), BoxError> {
    let mut out = io::stdout().lock();
    match outcome {
        DropOutcome::Persisted(task) => {
            writeln!(out, "{} is now {}", task.id(), task.status())?;
            Ok(())
        }
        DropOutcome::Unchanged => {
            writeln!(out, "nothing to change")?;
            Ok(())
        }
        DropOutcome::RolledBack(err) => Err(ShellError::NotApplied(err.to_string()).into()),
        other => Err(ShellError::NotApplied(format!("{other:?}")).into()),
    }
}
