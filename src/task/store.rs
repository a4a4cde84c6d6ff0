//! Task storage - JSON file persistence
//!
//! The whole collection is read, changed and rewritten on every mutation.
//! Writes go through a temporary file in the same directory that is renamed
//! over the backing file, so readers never observe a half-written collection.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::error::{Result, TaskError};
use super::model::{ListFilter, Task, TaskId, TaskStatus};

/// Default backing file name, resolved against the working directory
pub const DEFAULT_FILE_NAME: &str = "tasks.json";

const EMPTY_COLLECTION: &str = "[]";

/// Optional behaviours layered on top of plain read-modify-write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Hold an advisory lock on `<file>.lock` for each cycle
    pub lock: bool,
    /// Copy the previous contents to `<file>.bak` before overwriting
    pub backup: bool,
}

#[derive(Debug, Clone, Copy)]
enum LockMode {
    Shared,
    Exclusive,
}

/// Advisory lock guard; released when the handle is closed.
struct StoreLock {
    _file: File,
}

pub struct TaskStore {
    path: PathBuf,
    options: StoreOptions,
}

impl TaskStore {
    /// Create a store for `path`. Does not touch the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, StoreOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Make sure the backing file exists, creating it as an empty collection.
    pub fn initialize(&self) -> Result<()> {
        match fs::metadata(&self.path) {
            Ok(_) => {
                debug!(path = %self.path.display(), "task file present");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.create_empty(),
            Err(e) => Err(TaskError::io(&self.path, e)),
        }
    }

    pub fn load_all(&self) -> Result<Vec<Task>> {
        let _lock = self.lock(LockMode::Shared)?;
        self.read_collection()
    }

    pub fn persist_all(&self, tasks: &[Task]) -> Result<()> {
        let _lock = self.lock(LockMode::Exclusive)?;
        self.write_collection(tasks)
    }

    /// Append a new `todo` task and return it.
    pub fn add(&self, description: &str) -> Result<Task> {
        validate_description(description)?;
        self.mutate(|tasks| {
            let task = Task::new(next_id(tasks)?, description);
            tasks.push(task.clone());
            info!(id = %task.id, "added task");
            Ok(task)
        })
    }

    /// Remove a task, returning what was removed.
    pub fn delete(&self, id: TaskId) -> Result<Task> {
        self.mutate(|tasks| {
            let index = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or(TaskError::NotFound(id))?;
            let removed = tasks.remove(index);
            info!(id = %id, "deleted task");
            Ok(removed)
        })
    }

    /// Replace a task's description. A blank description is rejected before
    /// the file is read, so it wins over an unknown ID.
    pub fn update(&self, id: TaskId, description: &str) -> Result<Task> {
        validate_description(description)?;
        self.mutate(|tasks| {
            let task = find_mut(tasks, id)?;
            task.description = description.to_string();
            task.touch();
            info!(id = %id, "updated task description");
            Ok(task.clone())
        })
    }

    /// Move a task to `in-progress` or `done`. Tasks only start out as `todo`;
    /// there is no way back to it.
    pub fn set_status(&self, id: TaskId, status: TaskStatus) -> Result<Task> {
        if status == TaskStatus::Todo {
            return Err(TaskError::Validation(
                "status can only be set to in-progress or done".to_string(),
            ));
        }
        self.mutate(|tasks| {
            let task = find_mut(tasks, id)?;
            task.status = status;
            task.touch();
            info!(id = %id, status = %status, "changed task status");
            Ok(task.clone())
        })
    }

    /// List tasks matching a textual filter (`total`, `todo`, `in-progress`, `done`).
    pub fn list(&self, filter: &str) -> Result<Vec<Task>> {
        self.list_filtered(filter.parse()?)
    }

    pub fn list_filtered(&self, filter: ListFilter) -> Result<Vec<Task>> {
        let mut tasks = self.load_all()?;
        tasks.retain(|t| filter.matches(t));
        debug!(filter = %filter, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    fn mutate<T>(&self, op: impl FnOnce(&mut Vec<Task>) -> Result<T>) -> Result<T> {
        let _lock = self.lock(LockMode::Exclusive)?;
        let mut tasks = self.read_collection()?;
        let out = op(&mut tasks)?;
        self.write_collection(&tasks)?;
        Ok(out)
    }

    fn read_collection(&self) -> Result<Vec<Task>> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| TaskError::io(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> =
            serde_json::from_str(&content).map_err(|e| TaskError::format(&self.path, e))?;
        check_collection(&tasks).map_err(|reason| TaskError::corrupt(&self.path, reason))?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    fn write_collection(&self, tasks: &[Task]) -> Result<()> {
        let content = serde_json::to_string_pretty(tasks)
            .map_err(|e| TaskError::io(&self.path, e.into()))?;

        if self.options.backup {
            self.backup();
        }

        // Write through a symlinked task file instead of replacing the link
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| TaskError::io(dir, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| TaskError::io(tmp.path(), e))?;

        // Keep the permissions of the file being replaced
        if let Ok(meta) = fs::metadata(&target) {
            if let Err(e) = tmp.as_file().set_permissions(meta.permissions()) {
                warn!("Failed to carry over task file permissions: {}", e);
            }
        }

        tmp.persist(&target)
            .map_err(|e| TaskError::io(&target, e.error))?;
        debug!(path = %self.path.display(), count = tasks.len(), "wrote tasks");
        Ok(())
    }

    fn create_empty(&self) -> Result<()> {
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent).map_err(|e| TaskError::io(parent, e))?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                file.write_all(EMPTY_COLLECTION.as_bytes())
                    .map_err(|e| TaskError::io(&self.path, e))?;
                info!(path = %self.path.display(), "created empty task file");
                Ok(())
            }
            // Another invocation got there first
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(TaskError::io(&self.path, e)),
        }
    }

    fn backup(&self) {
        if !self.path.exists() {
            return;
        }
        let backup_path = self.sidecar_path(".bak");
        if let Err(e) = fs::copy(&self.path, &backup_path) {
            warn!("Failed to create backup: {}", e);
        }
    }

    fn lock(&self, mode: LockMode) -> Result<Option<StoreLock>> {
        if !self.options.lock {
            return Ok(None);
        }

        let lock_path = self.sidecar_path(".lock");
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| TaskError::io(&lock_path, e))?;

        let locked = match mode {
            LockMode::Shared => FileExt::lock_shared(&file),
            LockMode::Exclusive => FileExt::lock_exclusive(&file),
        };
        locked.map_err(|e| TaskError::io(&lock_path, e))?;

        debug!(path = %lock_path.display(), ?mode, "acquired task file lock");
        Ok(Some(StoreLock { _file: file }))
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    fn sidecar_path(&self, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(suffix);
        PathBuf::from(name)
    }
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(TaskError::Validation(
            "task description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// One past the ID of the last task in storage order. Deleting the last task
/// frees its ID for reuse.
fn next_id(tasks: &[Task]) -> Result<TaskId> {
    match tasks.last() {
        None => Ok(TaskId::FIRST),
        Some(last) => last.id.next().ok_or_else(|| {
            TaskError::Validation(format!("no task ID left after {}", last.id))
        }),
    }
}

/// Stored tasks must have positive, unique IDs and non-blank descriptions.
fn check_collection(tasks: &[Task]) -> std::result::Result<(), String> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if task.id.get() == 0 {
            return Err("task ID 0 is not allowed".to_string());
        }
        if !seen.insert(task.id) {
            return Err(format!("duplicate task ID {}", task.id));
        }
        if task.description.trim().is_empty() {
            return Err(format!("task {} has an empty description", task.id));
        }
    }
    Ok(())
}

fn find_mut(tasks: &mut [Task], id: TaskId) -> Result<&mut Task> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(TaskError::NotFound(id))
}
