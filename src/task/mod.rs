//! Task management module
//!
//! This module provides the task tracker core:
//! - Task model (id, description, status, timestamps)
//! - JSON file store with whole-collection read-modify-write
//! - Error kinds surfaced to the CLI

pub mod error;
pub mod model;
pub mod store;

pub use error::{ErrorKind, TaskError};
pub use model::{ListFilter, Task, TaskId, TaskStatus};
pub use store::{StoreOptions, TaskStore, DEFAULT_FILE_NAME};
