//! Command-line client for the task API.
//!
//! Usage:
//!
//! ```text
//! taskctl [--api-url <url>] <command>
//! ```
//!
//! Without `--api-url` the client reads `TASKS_API_URL` and falls back to
//! `http://localhost:5209`.

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use taskboard::api::{CreateTaskDto, TaskDto};
use taskboard::client::TaskApi;
use taskboard::client::editor::{EditorError, InlineEditor};
use taskboard::client::render::{render_card, render_task_list};
use taskboard::client::{HttpTaskApi, TaskListState};
use taskboard::config::ClientConfig;
use taskboard::telemetry;
use thiserror::Error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "taskctl")]
#[command(about = "Command-line client for the task API")]
struct Cli {
    /// Base URL of the task API
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List tasks, open ones first
    List,
    /// Show one task as currently stored on the server
    Show {
        /// Task id
        id: i64,
    },
    /// Add a task; without a title a numbered placeholder is created
    Add {
        /// Task title
        #[arg(long)]
        title: Option<String>,
        /// Task description
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a task's title
    Rename {
        /// Task id
        id: i64,
        /// New title
        title: String,
    },
    /// Change a task's description
    Describe {
        /// Task id
        id: i64,
        /// New description
        description: String,
    },
    /// Mark a task as done
    Complete {
        /// Task id
        id: i64,
    },
    /// Mark a task as not done
    Reopen {
        /// Task id
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: i64,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("task {0} not found")]
    UnknownTask(i64),
    #[error("task {0} is completed and cannot be edited")]
    ReadOnly(i64),
    #[error("task {id}: {source}")]
    Rejected { id: i64, source: EditorError },
    #[error("{0}")]
    Refresh(String),
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init_for_cli();
    let cli = Cli::parse();
    let api_url = cli
        .api_url
        .unwrap_or_else(|| ClientConfig::from_env().api_url);
    let state = TaskListState::new(HttpTaskApi::new(api_url));

    state.refresh().await;
    if let Some(message) = state.snapshot().error {
        return Err(CliError::Refresh(message).into());
    }

    let output = execute(&state, cli.command).await?;
    writeln!(io::stdout().lock(), "{output}")?;
    Ok(())
}

async fn execute(
    state: &TaskListState<HttpTaskApi>,
    command: Command,
) -> Result<String, BoxError> {
    match command {
        Command::List => Ok(render_task_list(&state.snapshot().tasks)),
        Command::Show { id } => Ok(render_card(&state.api().get_task(id).await?)),
        Command::Add { title, description } => {
            let created = match title {
                Some(text) => {
                    let titled = CreateTaskDto::titled(text);
                    let body = match description {
                        Some(extra) => titled.with_description(extra),
                        None => titled,
                    };
                    state.create(body).await?
                }
                None => state.add_untitled().await?,
            };
            Ok(render_card(&created))
        }
        Command::Rename { id, title } => {
            let task = cached(state, id)?;
            let mut editor = InlineEditor::title(&task, state.needs_naming(id));
            if let Some(value) = save_with(&mut editor, id, &title)? {
                state.update_title(id, value).await?;
            }
            Ok(render_card(&cached(state, id)?))
        }
        Command::Describe { id, description } => {
            let task = cached(state, id)?;
            let mut editor = InlineEditor::description(&task);
            if let Some(value) = save_with(&mut editor, id, &description)? {
                state.update_description(id, value).await?;
            }
            Ok(render_card(&cached(state, id)?))
        }
        Command::Complete { id } => {
            state.toggle_completion(id, true).await?;
            Ok(render_card(&cached(state, id)?))
        }
        Command::Reopen { id } => {
            state.toggle_completion(id, false).await?;
            Ok(render_card(&cached(state, id)?))
        }
        Command::Delete { id } => {
            state.delete(id).await?;
            Ok(format!("deleted task {id}"))
        }
    }
}

fn cached(state: &TaskListState<HttpTaskApi>, id: i64) -> Result<TaskDto, CliError> {
    state
        .snapshot()
        .tasks
        .into_iter()
        .find(|task| task.id == id)
        .ok_or(CliError::UnknownTask(id))
}

/// Runs the whole of `text` through the editor. `None` means the value is
/// unchanged; over-long values are refused rather than clipped.
fn save_with(
    editor: &mut InlineEditor,
    id: i64,
    text: &str,
) -> Result<Option<String>, CliError> {
    editor.paste(text).map_err(|source| match source {
        EditorError::ReadOnly => CliError::ReadOnly(id),
        EditorError::TooLong { .. } => CliError::Rejected { id, source },
    })?;
    let value = editor.commit();
    if value.is_none() {
        tracing::info!(task_id = id, "value unchanged, nothing to save");
    }
    Ok(value)
}
