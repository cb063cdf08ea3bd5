//! Command grammar.
//!
//! # Responsibility
//! - Turn raw input lines into validated commands for the session layer.
//! - Keep parsing independent from task storage and presentation.

pub mod parser;
