//! `task-cli update` command implementation

use anyhow::Result;
use clap::Args;

use crate::task::{TaskId, TaskStore};

#[derive(Args)]
pub struct UpdateArgs {
    /// Task ID
    id: String,

    /// New description
    description: String,
}

pub fn run(store: &TaskStore, args: UpdateArgs) -> Result<()> {
    let id: TaskId = args.id.parse()?;
    let task = store.update(id, &args.description)?;
    println!("Updated task {}: {}", task.id, task.description);
    Ok(())
}
