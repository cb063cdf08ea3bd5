//! Task domain model.
//!
//! # Responsibility
//! - Define the task entity and the ordered collection that owns it.
//!
//! # Invariants
//! - Tasks are owned exclusively by one `TaskList`; callers get read views.
//! - User-facing positions are 1-based everywhere in the public API.

pub mod task;
pub mod task_list;
