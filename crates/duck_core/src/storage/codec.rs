//! Line-based record codec for persisted task lists.
//!
//! # Responsibility
//! - Encode each task as exactly one text record.
//! - Decode records back into validated tasks, rejecting malformed input.
//!
//! # Invariants
//! - Layout is `<K> | <0|1> | <description>[ | <date field>]`, one per line.
//! - `\`, `|`, CR and LF inside text fields are backslash-escaped, so no
//!   description or date field can break the record layout.
//! - `decode_tasks(&encode_tasks(list)) == list` for every valid list.
//! - Decoding never substitutes defaults for bad data.

use crate::model::task::{Task, TaskKind};
use crate::model::task_list::TaskList;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIELD_SEPARATOR: &str = " | ";

static RECORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]) \| ([^ ]*) \| ((?:[^\\|]|\\.)*)(?: \| ((?:[^\\|]|\\.)*))?$")
        .expect("valid record regex")
});

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Record at 1-based `line` cannot be decoded into a valid task.
    CorruptRecord { line: usize, reason: String },
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CorruptRecord { line, reason } => {
                write!(f, "corrupt task record at line {line}: {reason}")
            }
        }
    }
}

impl Error for CodecError {}

/// Encodes one task as a record without trailing newline.
pub fn encode_task(task: &Task) -> String {
    let mut record = String::new();
    record.push(task.kind().marker());
    record.push_str(FIELD_SEPARATOR);
    record.push(if task.is_done() { '1' } else { '0' });
    record.push_str(FIELD_SEPARATOR);
    record.push_str(&escape_field(task.description()));
    if let Some(date) = task.date_field() {
        record.push_str(FIELD_SEPARATOR);
        record.push_str(&escape_field(date));
    }
    record
}

/// Encodes a whole list, one newline-terminated record per task.
pub fn encode_tasks(tasks: &TaskList) -> String {
    let mut out = String::new();
    for task in tasks.all() {
        out.push_str(&encode_task(task));
        out.push('\n');
    }
    out
}

/// Decodes one record; `line` is only used for error reporting.
///
/// # Errors
/// Returns `CorruptRecord` when the layout, kind marker, done flag, escape
/// sequences, or task validation fails.
pub fn decode_record(record: &str, line: usize) -> CodecResult<Task> {
    let corrupt = |reason: String| CodecError::CorruptRecord { line, reason };

    let captures = RECORD_RE
        .captures(record)
        .ok_or_else(|| corrupt("record does not match `K | done | description`".to_string()))?;

    let marker_text = &captures[1];
    let kind = marker_text
        .chars()
        .next()
        .and_then(TaskKind::from_marker)
        .ok_or_else(|| corrupt(format!("unknown task kind `{marker_text}`")))?;

    let done = match &captures[2] {
        "0" => false,
        "1" => true,
        other => return Err(corrupt(format!("invalid done flag `{other}`"))),
    };

    let description = unescape_field(&captures[3]).map_err(&corrupt)?;
    let date = captures
        .get(4)
        .map(|value| unescape_field(value.as_str()))
        .transpose()
        .map_err(&corrupt)?;

    let mut task = Task::new(kind, description, date).map_err(|err| corrupt(err.to_string()))?;
    task.set_done(done);
    Ok(task)
}

/// Decodes a full persisted document.
///
/// A single trailing `\n` or `\r\n` is accepted; any other blank line is
/// corrupt.
pub fn decode_tasks(input: &str) -> CodecResult<TaskList> {
    let body = input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input);
    if body.is_empty() {
        return Ok(TaskList::new());
    }

    body.split('\n')
        .enumerate()
        .map(|(offset, record)| {
            let record = record.strip_suffix('\r').unwrap_or(record);
            decode_record(record, offset + 1)
        })
        .collect()
}

/// Decodes raw document bytes, reporting invalid UTF-8 as a corrupt record.
pub fn decode_document(bytes: &[u8]) -> CodecResult<TaskList> {
    match std::str::from_utf8(bytes) {
        Ok(input) => decode_tasks(input),
        Err(err) => {
            let valid = &bytes[..err.valid_up_to()];
            let line = valid.iter().filter(|byte| **byte == b'\n').count() + 1;
            Err(CodecError::CorruptRecord {
                line,
                reason: "record is not valid UTF-8".to_string(),
            })
        }
    }
}

fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape_field(value: &str) -> Result<String, String> {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => unescaped.push('\\'),
            Some('|') => unescaped.push('|'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some(other) => return Err(format!("unknown escape sequence `\\{other}`")),
            None => return Err("dangling escape at end of field".to_string()),
        }
    }
    Ok(unescaped)
}

#[cfg(test)]
mod tests {
    use super::{escape_field, unescape_field};

    #[test]
    fn escape_field_hides_separator_characters() {
        let escaped = escape_field("a | b \\ c\nd");
        assert_eq!(escaped, "a \\| b \\\\ c\\nd");
        assert!(!escaped.contains(" | "));
        assert_eq!(unescape_field(&escaped).unwrap(), "a | b \\ c\nd");
    }

    #[test]
    fn unescape_field_rejects_unknown_and_dangling_escapes() {
        assert!(unescape_field("bad \\q").unwrap_err().contains("unknown escape"));
        assert!(unescape_field("trailing \\").unwrap_err().contains("dangling"));
    }
}
