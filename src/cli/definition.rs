//! Command-line definition for `task-cli`

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::add::AddArgs;
use super::delete::DeleteArgs;
use super::list::{ListArgs, StatusListArgs};
use super::mark::MarkArgs;
use super::update::UpdateArgs;

#[derive(Parser)]
#[command(name = "task-cli")]
#[command(about = "Track tasks in a JSON file from the command line")]
#[command(version)]
pub struct Cli {
    /// Task file to use (defaults to the configured path, then ./tasks.json)
    #[arg(long, global = true, env = "TASK_CLI_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    Add(AddArgs),

    /// Delete a task
    Delete(DeleteArgs),

    /// Change a task's description
    Update(UpdateArgs),

    /// Mark a task as in progress
    MarkInProgress(MarkArgs),

    /// Mark a task as done
    MarkDone(MarkArgs),

    /// List tasks, optionally filtered by status
    List(ListArgs),

    /// List tasks that are still todo
    Todo(StatusListArgs),

    /// List tasks in progress
    InProgress(StatusListArgs),

    /// List finished tasks
    Done(StatusListArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
