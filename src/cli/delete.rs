//! `task-cli delete` command implementation

use anyhow::Result;
use clap::Args;

use crate::task::{TaskId, TaskStore};

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    id: String,
}

pub fn run(store: &TaskStore, args: DeleteArgs) -> Result<()> {
    let id: TaskId = args.id.parse()?;
    let removed = store.delete(id)?;
    println!(
        "Deleted task {}: {}",
        removed.id,
        super::truncate(&removed.description, 60)
    );
    Ok(())
}
