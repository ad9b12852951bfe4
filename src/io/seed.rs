use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::task::Task;
use crate::ops::task_ops::{StoreError, TaskStore};

/// Error type for loading the initial task set
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid seed {path}: {source}")]
    Invalid { path: PathBuf, source: StoreError },
}

/// Parse a JSON array of tasks.
pub fn parse_seed(text: &str) -> Result<Vec<Task>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Build the session's initial store. Without a seed file the store starts
/// empty. The file is only ever read.
pub fn load_store(seed: Option<&Path>) -> Result<TaskStore, SeedError> {
    let Some(path) = seed else {
        return Ok(TaskStore::new());
    };
    let text = fs::read_to_string(path).map_err(|e| SeedError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let tasks = parse_seed(&text).map_err(|e| SeedError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let count = tasks.len();
    let store = TaskStore::from_tasks(tasks).map_err(|e| SeedError::Invalid {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(path = %path.display(), count, "loaded seed tasks");
    Ok(store)
}
