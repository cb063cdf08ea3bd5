//! Flat-file task store.
//!
//! # Responsibility
//! - Read and write the persisted task document at one configured path.
//! - Keep "no file yet" distinct from "file present but unreadable".
//!
//! # Invariants
//! - `save` replaces the document via a sibling temp file and rename.
//! - `load` never returns a partially decoded list.

use super::codec::{decode_document, encode_tasks};
use super::{StorageError, StorageResult, TaskStorage};
use crate::model::task_list::TaskList;
use log::{error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Default document location, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/duck.txt";

const TEMP_FILE_SUFFIX: &str = "tmp";

/// File-backed store for one task document.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted task list.
    ///
    /// Returns `Ok(None)` when no document exists yet.
    ///
    /// # Errors
    /// - `Io` when the file exists but cannot be read.
    /// - `Corrupt` when any record fails to decode or is not valid UTF-8.
    pub fn load(&self) -> StorageResult<Option<TaskList>> {
        let started_at = Instant::now();
        info!("event=store_load module=storage status=start");

        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=storage status=ok found=false duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(None);
            }
            Err(err) => {
                error!(
                    "event=store_load module=storage status=error duration_ms={} error_code=read_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        match decode_document(&content) {
            Ok(tasks) => {
                info!(
                    "event=store_load module=storage status=ok found=true task_count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(tasks))
            }
            Err(err) => {
                error!(
                    "event=store_load module=storage status=error duration_ms={} error_code=corrupt_record error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(StorageError::Corrupt {
                    path: self.path.clone(),
                    source: err,
                })
            }
        }
    }

    /// Writes `tasks` to the document, replacing previous content.
    ///
    /// # Side effects
    /// - Creates missing parent directories.
    /// - Leaves the previous document intact if writing the temp file fails.
    pub fn save(&self, tasks: &TaskList) -> StorageResult<()> {
        let started_at = Instant::now();
        info!("event=store_save module=storage status=start");

        match self.write_document(&encode_tasks(tasks)) {
            Ok(()) => {
                info!(
                    "event=store_save module=storage status=ok task_count={} duration_ms={}",
                    tasks.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=storage status=error duration_ms={} error_code=write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn write_document(&self, document: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, document).map_err(|err| io_error(&temp_path, err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| io_error(&self.path, err))?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".");
        file_name.push(TEMP_FILE_SUFFIX);
        self.path.with_file_name(file_name)
    }
}

impl TaskStorage for TaskStore {
    fn load(&self) -> StorageResult<Option<TaskList>> {
        TaskStore::load(self)
    }

    fn save(&self, tasks: &TaskList) -> StorageResult<()> {
        TaskStore::save(self, tasks)
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        source,
    }
}
