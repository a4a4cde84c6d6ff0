//! `task-cli add` command implementation

use anyhow::Result;
use clap::Args;

use crate::task::TaskStore;

#[derive(Args)]
pub struct AddArgs {
    /// What the task is about
    description: String,
}

pub fn run(store: &TaskStore, args: AddArgs) -> Result<()> {
    let task = store.add(&args.description)?;
    println!("Task added successfully (ID: {})", task.id);
    Ok(())
}
