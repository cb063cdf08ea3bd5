//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate parser, task list and storage into session-level APIs.
//! - Keep the CLI read loop free of business rules.

pub mod session;
