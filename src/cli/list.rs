//! `task-cli list` command implementation

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use clap::Args;

use crate::task::{ListFilter, Task, TaskStatus, TaskStore};

const TABLE_COL_ID: usize = 5;
const TABLE_COL_STATUS: usize = 12;
const TABLE_COL_DESCRIPTION: usize = 40;
const TABLE_COL_TIME: usize = 16;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Args)]
pub struct ListArgs {
    /// Which tasks to show: total, todo, in-progress or done
    #[arg(default_value = "total")]
    filter: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct StatusListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn format_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIME_FORMAT).to_string()
}

fn print_table_header() {
    println!(
        "{:<width_id$} {:<width_status$} {:<width_desc$} {:<width_time$} UPDATED",
        "ID",
        "STATUS",
        "DESCRIPTION",
        "CREATED",
        width_id = TABLE_COL_ID,
        width_status = TABLE_COL_STATUS,
        width_desc = TABLE_COL_DESCRIPTION,
        width_time = TABLE_COL_TIME
    );
    println!(
        "{}",
        "-".repeat(
            TABLE_COL_ID + TABLE_COL_STATUS + TABLE_COL_DESCRIPTION + TABLE_COL_TIME * 2 + 4
        )
    );
}

fn print_table_row(task: &Task) {
    let description = super::truncate(&task.description, TABLE_COL_DESCRIPTION);
    println!(
        "{:<width_id$} {:<width_status$} {:<width_desc$} {:<width_time$} {}",
        task.id,
        task.status.label(),
        description,
        format_time(&task.created_at),
        format_time(&task.updated_at),
        width_id = TABLE_COL_ID,
        width_status = TABLE_COL_STATUS,
        width_desc = TABLE_COL_DESCRIPTION,
        width_time = TABLE_COL_TIME
    );
}

fn empty_message(filter: ListFilter) -> String {
    match filter {
        ListFilter::Total => "No tasks found.".to_string(),
        ListFilter::Status(status) => format!("No {} tasks found.", status),
    }
}

fn render(tasks: &[Task], filter: ListFilter, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("{}", empty_message(filter));
        return Ok(());
    }

    print_table_header();
    for task in tasks {
        print_table_row(task);
    }
    println!("\nTotal: {} tasks", tasks.len());

    Ok(())
}

pub fn run(store: &TaskStore, args: ListArgs) -> Result<()> {
    let filter: ListFilter = args.filter.parse()?;
    let tasks = store.list_filtered(filter)?;
    render(&tasks, filter, args.json)
}

/// Shorthand listing for a single status (`task-cli done`, ...)
pub fn run_status(store: &TaskStore, status: TaskStatus, args: StatusListArgs) -> Result<()> {
    let filter = ListFilter::Status(status);
    let tasks = store.list_filtered(filter)?;
    render(&tasks, filter, args.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message() {
        assert_eq!(empty_message(ListFilter::Total), "No tasks found.");
        assert_eq!(
            empty_message(ListFilter::Status(TaskStatus::InProgress)),
            "No in-progress tasks found."
        );
    }

    #[test]
    fn test_format_time_shape() {
        let formatted = format_time(&Utc::now());
        assert_eq!(formatted.len(), TABLE_COL_TIME);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[13..14], ":");
    }
}
