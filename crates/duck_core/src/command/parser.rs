//! Line-to-command parser.
//!
//! # Responsibility
//! - Split one input line into a keyword and argument tokens.
//! - Extract and validate per-keyword payloads into a [`Command`].
//!
//! # Invariants
//! - Parsing is pure: no list access, no I/O, no state across calls.
//! - Keywords match case-sensitively.
//! - Only the first delimiter token splits description from date field;
//!   later delimiter tokens stay verbatim in the date field.

use crate::model::task::{Task, TaskKind, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const KEYWORD_BYE: &str = "bye";
pub const KEYWORD_LIST: &str = "list";
pub const KEYWORD_MARK: &str = "mark";
pub const KEYWORD_UNMARK: &str = "unmark";
pub const KEYWORD_TODO: &str = "todo";
pub const KEYWORD_DEADLINE: &str = "deadline";
pub const KEYWORD_EVENT: &str = "event";

const DEADLINE_DELIMITER: &str = "/by";
const EVENT_DELIMITER: &str = "/at";

pub type ParseResult<T> = Result<T, ParseError>;

/// One validated user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ends the session.
    Bye,
    /// Shows every task, 1-indexed.
    List,
    /// Marks the task at the 1-based index done; values below 1 are kept
    /// so the task list can reject them as out of range.
    Mark(i64),
    /// Marks the task at the 1-based index not done.
    Unmark(i64),
    /// Appends a new todo/deadline/event.
    Add(Task),
}

/// Rejections produced while parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// First token is not a known keyword (empty for a blank line).
    UnrecognizedCommand(String),
    /// Keyword is known but its arguments are missing or invalid.
    MalformedArgument {
        keyword: &'static str,
        reason: String,
    },
}

impl ParseError {
    fn malformed(keyword: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedArgument {
            keyword,
            reason: reason.into(),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedCommand(keyword) => write!(f, "unrecognized command `{keyword}`"),
            Self::MalformedArgument { keyword, reason } => {
                write!(f, "malformed `{keyword}` arguments: {reason}")
            }
        }
    }
}

impl Error for ParseError {}

/// Parses one input line into a [`Command`].
///
/// # Errors
/// - `UnrecognizedCommand` when the keyword is unknown or the line is blank.
/// - `MalformedArgument` when arguments are missing, extra, non-integer, or
///   the delimiter of `deadline`/`event` is absent or leaves a side empty.
pub fn parse_command(line: &str) -> ParseResult<Command> {
    let mut tokens = line.split_whitespace();
    let keyword = tokens.next().unwrap_or_default();
    let args: Vec<&str> = tokens.collect();

    match keyword {
        KEYWORD_BYE => expect_no_args(KEYWORD_BYE, &args).map(|()| Command::Bye),
        KEYWORD_LIST => expect_no_args(KEYWORD_LIST, &args).map(|()| Command::List),
        KEYWORD_MARK => parse_index(KEYWORD_MARK, &args).map(Command::Mark),
        KEYWORD_UNMARK => parse_index(KEYWORD_UNMARK, &args).map(Command::Unmark),
        KEYWORD_TODO => parse_todo(&args).map(Command::Add),
        KEYWORD_DEADLINE => parse_dated(
            KEYWORD_DEADLINE,
            TaskKind::Deadline,
            DEADLINE_DELIMITER,
            &args,
        )
        .map(Command::Add),
        KEYWORD_EVENT => {
            parse_dated(KEYWORD_EVENT, TaskKind::Event, EVENT_DELIMITER, &args).map(Command::Add)
        }
        other => Err(ParseError::UnrecognizedCommand(other.to_string())),
    }
}

fn expect_no_args(keyword: &'static str, args: &[&str]) -> ParseResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ParseError::malformed(keyword, "takes no arguments"))
    }
}

fn parse_index(keyword: &'static str, args: &[&str]) -> ParseResult<i64> {
    match args {
        [] => Err(ParseError::malformed(keyword, "missing task index")),
        [raw] => raw.parse::<i64>().map_err(|_| {
            ParseError::malformed(keyword, format!("`{raw}` is not a valid task index"))
        }),
        _ => Err(ParseError::malformed(keyword, "expected exactly one task index")),
    }
}

fn parse_todo(args: &[&str]) -> ParseResult<Task> {
    if args.is_empty() {
        return Err(ParseError::malformed(KEYWORD_TODO, "missing description"));
    }
    Task::todo(args.join(" ")).map_err(|err| validation_failure(KEYWORD_TODO, err))
}

fn parse_dated(
    keyword: &'static str,
    kind: TaskKind,
    delimiter: &'static str,
    args: &[&str],
) -> ParseResult<Task> {
    let split_at = args
        .iter()
        .position(|token| *token == delimiter)
        .ok_or_else(|| ParseError::malformed(keyword, format!("missing `{delimiter}`")))?;

    let (description, rest) = args.split_at(split_at);
    let date = &rest[1..];
    if description.is_empty() {
        return Err(ParseError::malformed(keyword, "missing description"));
    }
    if date.is_empty() {
        return Err(ParseError::malformed(
            keyword,
            format!("missing text after `{delimiter}`"),
        ));
    }

    Task::new(kind, description.join(" "), Some(date.join(" ")))
        .map_err(|err| validation_failure(keyword, err))
}

fn validation_failure(keyword: &'static str, err: TaskValidationError) -> ParseError {
    ParseError::malformed(keyword, err.to_string())
}
