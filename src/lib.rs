//! Task tracker library - JSON file task store and the `task-cli` command surface

pub mod cli;
pub mod config;
pub mod task;
