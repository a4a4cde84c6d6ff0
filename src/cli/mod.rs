//! CLI command implementations

pub mod add;
pub mod definition;
pub mod delete;
pub mod list;
pub mod mark;
pub mod update;

pub use definition::{Cli, Commands};

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::task::TaskStore;

/// Build the store for this invocation and make sure its file exists.
pub fn open_store(config: &Config, file: Option<PathBuf>) -> Result<TaskStore> {
    let path = config.resolve_store_path(file);
    debug!(path = %path.display(), "using task file");

    let store = TaskStore::with_options(path, config.store.options());
    store.initialize()?;
    Ok(store)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use tempfile::TempDir;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_equal_to_max() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_with_small_max() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("comprar leche y café", 10), "comprar...");
        assert_eq!(truncate("ñandú", 5), "ñandú");
        assert_eq!(truncate("ñandú rápido", 4), "ñ...");
    }

    #[test]
    fn test_open_store_initializes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");

        let store = open_store(&Config::default(), Some(path.clone())).unwrap();

        assert_eq!(store.path(), path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_open_store_uses_config_options() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            store: StoreConfig {
                path: Some(temp.path().join("cfg.json").display().to_string()),
                lock: true,
                backup: true,
            },
        };

        let store = open_store(&config, None).unwrap();

        assert_eq!(store.path(), temp.path().join("cfg.json"));
        assert!(store.options().lock);
        assert!(store.options().backup);
    }
}
