//! Session use-case service.
//!
//! # Responsibility
//! - Own the single task list and its storage handle for one session.
//! - Apply parsed commands and render the user-facing reply text.
//!
//! # Invariants
//! - Every recoverable failure becomes a reply; only storage faults are
//!   returned as errors.
//! - The parser never touches the list; all mutation happens here.
//! - Nothing is persisted until [`Session::flush`] is called.

use crate::command::parser::{parse_command, Command, ParseError};
use crate::model::task::Task;
use crate::model::task_list::{task_count_phrase, TaskList, TaskListError};
use crate::storage::{StorageResult, TaskStorage};
use log::{info, warn};

pub const FAREWELL_MESSAGE: &str = "Bye! See you next time!";
pub const EMPTY_LIST_MESSAGE: &str = "You have no tasks...";
pub const NO_TASKS_YET_MESSAGE: &str = "You can't do that! There are no tasks added yet...";
pub const BAD_INDEX_MESSAGE: &str = "There are no tasks with that index...";
pub const UNRECOGNIZED_MESSAGE: &str = "I don't get what you are saying...";

/// What the read loop should do after showing a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Reply text plus the loop transition for one handled line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub outcome: Outcome,
}

impl Reply {
    fn continue_with(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Continue,
        }
    }

    fn exit(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            outcome: Outcome::Exit,
        }
    }

    pub fn is_exit(&self) -> bool {
        self.outcome == Outcome::Exit
    }
}

/// Session context owning the task list and its storage.
pub struct Session<S: TaskStorage> {
    tasks: TaskList,
    storage: S,
}

impl<S: TaskStorage> Session<S> {
    /// Hydrates a session from `storage`.
    ///
    /// A missing document starts an empty list.
    ///
    /// # Errors
    /// Returns storage I/O and corrupt-document errors unchanged so the
    /// caller can decide between aborting and starting fresh.
    pub fn open(storage: S) -> StorageResult<Self> {
        let tasks = storage.load()?.unwrap_or_default();
        info!(
            "event=session_open module=service status=ok task_count={}",
            tasks.len()
        );
        Ok(Self { tasks, storage })
    }

    /// Starts a session with an explicit list, bypassing `load`.
    pub fn with_tasks(storage: S, tasks: TaskList) -> Self {
        Self { tasks, storage }
    }

    /// Read view of the current tasks.
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Parses and applies one input line.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match parse_command(line) {
            Ok(command) => self.execute(command),
            Err(err) => {
                warn!(
                    "event=command_rejected module=service status=error error_code={}",
                    parse_error_code(&err)
                );
                Reply::continue_with(parse_error_message(&err))
            }
        }
    }

    /// Applies an already parsed command.
    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Bye => Reply::exit(FAREWELL_MESSAGE),
            Command::List => Reply::continue_with(render_listing(&self.tasks)),
            Command::Mark(index) => match self.tasks.mark_done(list_index(index)) {
                Ok((task, was_done)) => {
                    info!(
                        "event=task_mark module=service status=ok done=true was_done={was_done}"
                    );
                    Reply::continue_with(format!(
                        "Nice! I've marked this task as done:\n  {task}"
                    ))
                }
                Err(err) => Reply::continue_with(list_error_message(&err)),
            },
            Command::Unmark(index) => match self.tasks.mark_undone(list_index(index)) {
                Ok((task, was_done)) => {
                    info!(
                        "event=task_mark module=service status=ok done=false was_done={was_done}"
                    );
                    Reply::continue_with(format!(
                        "OK, I've marked this task as not done yet:\n  {task}"
                    ))
                }
                Err(err) => Reply::continue_with(list_error_message(&err)),
            },
            Command::Add(task) => Reply::continue_with(self.add(task)),
        }
    }

    /// Persists the current list through the storage handle.
    pub fn flush(&self) -> StorageResult<()> {
        self.storage.save(&self.tasks)
    }

    fn add(&mut self, task: Task) -> String {
        let kind = task.kind();
        let rendered = task.to_string();
        self.tasks.add(task);
        info!(
            "event=task_add module=service status=ok kind={} task_count={}",
            kind,
            self.tasks.len()
        );
        format!(
            "Got it. I've added this task:\n  {rendered}\nNow you have {} in the list.",
            task_count_phrase(self.tasks.len())
        )
    }
}

/// Renders `1.<task>` lines, or the empty notice.
pub fn render_listing(tasks: &TaskList) -> String {
    if tasks.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }
    tasks
        .all()
        .iter()
        .enumerate()
        .map(|(offset, task)| format!("{}.{task}", offset + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Negative indices resolve like 0, which the list rejects as out of range.
fn list_index(index: i64) -> usize {
    usize::try_from(index).unwrap_or(0)
}

fn list_error_message(err: &TaskListError) -> &'static str {
    match err {
        TaskListError::EmptyList => NO_TASKS_YET_MESSAGE,
        TaskListError::IndexOutOfRange { .. } => BAD_INDEX_MESSAGE,
    }
}

fn parse_error_message(err: &ParseError) -> String {
    match err {
        ParseError::UnrecognizedCommand(_) => UNRECOGNIZED_MESSAGE.to_string(),
        ParseError::MalformedArgument { keyword, reason } => {
            format!("Hmm, that doesn't look right: `{keyword}` {reason}.")
        }
    }
}

fn parse_error_code(err: &ParseError) -> &'static str {
    match err {
        ParseError::UnrecognizedCommand(_) => "unrecognized_command",
        ParseError::MalformedArgument { .. } => "malformed_argument",
    }
}
