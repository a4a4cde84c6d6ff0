//! `task-cli mark-in-progress` / `mark-done` command implementation

use anyhow::Result;
use clap::Args;

use crate::task::{TaskId, TaskStatus, TaskStore};

#[derive(Args)]
pub struct MarkArgs {
    /// Task ID
    id: String,
}

pub fn run(store: &TaskStore, args: MarkArgs, status: TaskStatus) -> Result<()> {
    let id: TaskId = args.id.parse()?;
    let task = store.set_status(id, status)?;
    println!("Task {} marked as {}", task.id, task.status);
    Ok(())
}
