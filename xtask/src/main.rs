//! Developer tasks: keep `docs/` in step with the CLI and the task file format.

use anyhow::{bail, Context, Result};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use task_tracker::task::{Task, TaskId, TaskStatus, TaskStore};

const DOCS_DIR: &str = "docs";
const CLI_REFERENCE: &str = "cli/reference.md";
const SAMPLE_TASKS: &str = "tasks.example.json";

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    command: DevTask,
}

#[derive(Subcommand)]
enum DevTask {
    /// Regenerate the CLI reference and the sample task file
    GenDocs,
    /// Fail if the generated docs are out of date
    CheckDocs,
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        DevTask::GenDocs => gen_docs(Path::new(DOCS_DIR)),
        DevTask::CheckDocs => check_docs(Path::new(DOCS_DIR)),
    }
}

/// Fixed timestamps so the sample stays byte-stable between runs.
fn sample_tasks() -> Vec<Task> {
    let at = |day| {
        Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0)
            .single()
            .expect("sample dates are valid")
    };
    let task = |id, description: &str, status, created, updated| Task {
        id: TaskId::new(id),
        description: description.to_string(),
        status,
        created_at: at(created),
        updated_at: at(updated),
    };
    vec![
        task(1, "buy milk", TaskStatus::Done, 1, 2),
        task(2, "write weekly report", TaskStatus::InProgress, 1, 3),
        task(3, "book dentist appointment", TaskStatus::Todo, 2, 2),
    ]
}

/// Render every generated doc into `dir`, returning the relative paths written.
fn render_into(dir: &Path) -> Result<Vec<PathBuf>> {
    let reference = dir.join(CLI_REFERENCE);
    if let Some(parent) = reference.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(
        &reference,
        clap_markdown::help_markdown::<task_tracker::cli::Cli>(),
    )
    .with_context(|| format!("writing {}", reference.display()))?;

    // Written by the store itself so the sample matches the real file format
    let store = TaskStore::new(dir.join(SAMPLE_TASKS));
    store.persist_all(&sample_tasks())?;

    Ok(vec![PathBuf::from(CLI_REFERENCE), PathBuf::from(SAMPLE_TASKS)])
}

fn gen_docs(docs: &Path) -> Result<()> {
    for path in render_into(docs)? {
        println!("wrote {}", docs.join(path).display());
    }
    Ok(())
}

fn check_docs(docs: &Path) -> Result<()> {
    let scratch = tempfile::tempdir()?;
    let mut stale = Vec::new();

    for path in render_into(scratch.path())? {
        let expected = fs::read_to_string(scratch.path().join(&path))?;
        let current = fs::read_to_string(docs.join(&path)).unwrap_or_default();
        if current != expected {
            stale.push(docs.join(path).display().to_string());
        }
    }

    if !stale.is_empty() {
        bail!(
            "out of date: {} (run `cargo xtask gen-docs`)",
            stale.join(", ")
        );
    }
    println!("docs are up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_round_trips_through_store() {
        let dir = tempfile::tempdir().unwrap();
        render_into(dir.path()).unwrap();

        let store = TaskStore::new(dir.path().join(SAMPLE_TASKS));
        assert_eq!(store.load_all().unwrap(), sample_tasks());
        assert_eq!(store.list("in-progress").unwrap().len(), 1);
    }

    #[test]
    fn test_check_docs_detects_stale_and_fresh() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_docs(dir.path()).is_err());

        gen_docs(dir.path()).unwrap();
        check_docs(dir.path()).unwrap();

        fs::write(dir.path().join(SAMPLE_TASKS), "[]").unwrap();
        let err = check_docs(dir.path()).unwrap_err();
        assert!(err.to_string().contains(SAMPLE_TASKS));
    }
}
