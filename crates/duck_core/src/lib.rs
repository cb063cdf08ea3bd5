//! Core domain logic for the Duck task tracker.
//! This crate is the single source of truth for task, command and storage
//! invariants; front ends only read lines and print replies.

pub mod command;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use command::parser::{parse_command, Command, ParseError, ParseResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskKind, TaskValidationError};
pub use model::task_list::{task_count_phrase, TaskList, TaskListError, TaskListResult};
pub use service::session::{render_listing, Outcome, Reply, Session};
pub use storage::{
    CodecError, StorageError, StorageResult, TaskStorage, TaskStore, DEFAULT_DATA_FILE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
