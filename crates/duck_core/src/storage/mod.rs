//! Task persistence: record codec and flat-file store.
//!
//! # Responsibility
//! - Own the on-disk record layout and keep it stable across versions.
//! - Surface storage faults to callers with enough context to decide policy.
//!
//! # Invariants
//! - A missing document is not an error; a corrupt one always is.

use crate::model::task_list::TaskList;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod codec;
mod file_store;

pub use codec::CodecError;
pub use file_store::{TaskStore, DEFAULT_DATA_FILE};

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence contract used by the session layer.
pub trait TaskStorage {
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> StorageResult<Option<TaskList>>;
    fn save(&self, tasks: &TaskList) -> StorageResult<()>;
}

#[derive(Debug)]
pub enum StorageError {
    /// File-system failure while reading or writing `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document at `path` exists but holds an undecodable record.
    Corrupt { path: PathBuf, source: CodecError },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "task file `{}` i/o failure: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "task file `{}` is corrupt: {source}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
        }
    }
}
