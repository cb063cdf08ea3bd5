//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical record for todo/deadline/event tasks.
//! - Own completion-state transitions and the human-readable rendering.
//!
//! # Invariants
//! - `kind` is fixed at construction and never changes.
//! - `description` is never blank.
//! - `Todo` carries no date field; `Deadline` and `Event` carry exactly one.
//! - Rendering depends only on `(kind, done, description, date field)`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Task variant, selected by the command keyword that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Plain to-do without any date.
    Todo,
    /// Task that must be done by a free-text due marker.
    Deadline,
    /// Task bound to a free-text time window.
    Event,
}

impl TaskKind {
    /// Single-letter marker used in rendering and persisted records.
    pub fn marker(self) -> char {
        match self {
            Self::Todo => 'T',
            Self::Deadline => 'D',
            Self::Event => 'E',
        }
    }

    /// Inverse of [`TaskKind::marker`].
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'T' => Some(Self::Todo),
            'D' => Some(Self::Deadline),
            'E' => Some(Self::Event),
            _ => None,
        }
    }

    /// Short label for the date field in rendered output.
    fn date_label(self) -> Option<&'static str> {
        match self {
            Self::Todo => None,
            Self::Deadline => Some("by"),
            Self::Event => Some("at"),
        }
    }

    fn requires_date(self) -> bool {
        self.date_label().is_some()
    }
}

impl Display for TaskKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::Deadline => write!(f, "deadline"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// Validation failures for task construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Description is empty or whitespace only.
    EmptyDescription,
    /// Deadline/event was constructed without its date field.
    MissingDateField(TaskKind),
    /// Date field was supplied but is blank.
    EmptyDateField(TaskKind),
    /// Date field was supplied for a todo.
    UnexpectedDateField,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "task description must not be empty"),
            Self::MissingDateField(TaskKind::Deadline) => {
                write!(f, "deadline requires a due marker")
            }
            Self::MissingDateField(TaskKind::Event) => write!(f, "event requires a time window"),
            Self::MissingDateField(kind) => write!(f, "{kind} requires a date field"),
            Self::EmptyDateField(kind) => write!(f, "{kind} date field must not be empty"),
            Self::UnexpectedDateField => write!(f, "todo must not carry a date field"),
        }
    }
}

impl Error for TaskValidationError {}

/// One tracked task.
///
/// Fields are private so every instance has passed [`Task::new`] validation,
/// including instances produced by serde.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskFields", into = "TaskFields")]
pub struct Task {
    kind: TaskKind,
    description: String,
    date: Option<String>,
    done: bool,
}

impl Task {
    /// Creates a not-done task after validating kind/date pairing.
    ///
    /// # Errors
    /// - `EmptyDescription` when `description` is blank.
    /// - `MissingDateField` when a deadline/event has no date field.
    /// - `EmptyDateField` when the supplied date field is blank.
    /// - `UnexpectedDateField` when a todo is given a date field.
    pub fn new(
        kind: TaskKind,
        description: impl Into<String>,
        date: Option<String>,
    ) -> Result<Self, TaskValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }

        match (kind.requires_date(), &date) {
            (false, Some(_)) => return Err(TaskValidationError::UnexpectedDateField),
            (true, None) => return Err(TaskValidationError::MissingDateField(kind)),
            (true, Some(value)) if value.trim().is_empty() => {
                return Err(TaskValidationError::EmptyDateField(kind));
            }
            _ => {}
        }

        Ok(Self {
            kind,
            description,
            date,
            done: false,
        })
    }

    pub fn todo(description: impl Into<String>) -> Result<Self, TaskValidationError> {
        Self::new(TaskKind::Todo, description, None)
    }

    pub fn deadline(
        description: impl Into<String>,
        when: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        Self::new(TaskKind::Deadline, description, Some(when.into()))
    }

    pub fn event(
        description: impl Into<String>,
        window: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        Self::new(TaskKind::Event, description, Some(window.into()))
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Due marker for deadlines, time window for events, `None` for todos.
    pub fn date_field(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Marks the task done and returns the previous `done` flag.
    pub fn mark_done(&mut self) -> bool {
        std::mem::replace(&mut self.done, true)
    }

    /// Marks the task not done and returns the previous `done` flag.
    pub fn mark_undone(&mut self) -> bool {
        std::mem::replace(&mut self.done, false)
    }

    /// Restores completion state, used when hydrating persisted records.
    pub(crate) fn set_done(&mut self, done: bool) {
        self.done = done;
    }
}

/// Renders as `[T][X] description`, with ` (by: ..)` / ` (at: ..)` suffixes.
impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let checkbox = if self.done { 'X' } else { ' ' };
        write!(
            f,
            "[{}][{}] {}",
            self.kind.marker(),
            checkbox,
            self.description
        )?;
        if let (Some(label), Some(date)) = (self.kind.date_label(), self.date.as_deref()) {
            write!(f, " ({label}: {date})")?;
        }
        Ok(())
    }
}

/// Serde wire shape; validated back into [`Task`] on deserialize.
#[derive(Serialize, Deserialize)]
struct TaskFields {
    kind: TaskKind,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(default)]
    done: bool,
}

impl TryFrom<TaskFields> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskFields) -> Result<Self, Self::Error> {
        let mut task = Task::new(value.kind, value.description, value.date)?;
        task.set_done(value.done);
        Ok(task)
    }
}

impl From<Task> for TaskFields {
    fn from(value: Task) -> Self {
        Self {
            kind: value.kind,
            description: value.description,
            date: value.date,
            done: value.done,
        }
    }
}
