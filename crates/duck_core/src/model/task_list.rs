//! Ordered, index-addressable task collection.
//!
//! # Responsibility
//! - Own every task of one session in insertion order.
//! - Translate user-facing 1-based indices to storage positions.
//!
//! # Invariants
//! - Insertion order is display order and persisted order.
//! - Valid indices are exactly `1..=len`, with no gaps after removal.
//! - An empty list reports `EmptyList` regardless of the requested index.

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskListResult<T> = Result<T, TaskListError>;

/// Index resolution failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListError {
    /// The list has no tasks at all.
    EmptyList,
    /// `index` is outside `1..=len`.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for TaskListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyList => write!(f, "task list is empty"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} is out of range 1..={len}")
            }
        }
    }
}

impl Error for TaskListError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `task` at the end of the list.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Resolves a 1-based index.
    pub fn get(&self, index: usize) -> TaskListResult<&Task> {
        let position = self.position(index)?;
        Ok(&self.tasks[position])
    }

    /// Marks the task at `index` done and returns it with its previous state.
    pub fn mark_done(&mut self, index: usize) -> TaskListResult<(&Task, bool)> {
        let task = self.get_mut(index)?;
        let was_done = task.mark_done();
        Ok((&*task, was_done))
    }

    /// Marks the task at `index` not done and returns it with its previous state.
    pub fn mark_undone(&mut self, index: usize) -> TaskListResult<(&Task, bool)> {
        let task = self.get_mut(index)?;
        let was_done = task.mark_undone();
        Ok((&*task, was_done))
    }

    /// Removes and returns the task at `index`; later tasks shift down by one.
    pub fn remove(&mut self, index: usize) -> TaskListResult<Task> {
        let position = self.position(index)?;
        Ok(self.tasks.remove(position))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Alias of [`TaskList::len`] matching the "size" wording used by callers.
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Read view over all tasks in display order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    fn get_mut(&mut self, index: usize) -> TaskListResult<&mut Task> {
        let position = self.position(index)?;
        Ok(&mut self.tasks[position])
    }

    fn position(&self, index: usize) -> TaskListResult<usize> {
        let len = self.tasks.len();
        if len == 0 {
            return Err(TaskListError::EmptyList);
        }
        if index == 0 || index > len {
            return Err(TaskListError::IndexOutOfRange { index, len });
        }
        Ok(index - 1)
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

/// Formats a task count with the matching noun form: `1 task`, `0 tasks`.
pub fn task_count_phrase(count: usize) -> String {
    if count == 1 {
        format!("{count} task")
    } else {
        format!("{count} tasks")
    }
}
