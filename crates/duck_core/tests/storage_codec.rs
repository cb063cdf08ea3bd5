use duck_core::storage::codec::{
    decode_document, decode_record, decode_tasks, encode_task, encode_tasks,
};
use duck_core::{CodecError, Task, TaskKind, TaskList};

fn sample_list() -> TaskList {
    let mut done_deadline = Task::deadline("return book", "June 6th").unwrap();
    done_deadline.mark_done();
    vec![
        Task::todo("join sports club").unwrap(),
        done_deadline,
        Task::event("project meeting", "Aug 6th 2-4pm").unwrap(),
    ]
    .into_iter()
    .collect()
}

#[test]
fn encode_task_uses_stable_record_layout() {
    let list = sample_list();
    let records: Vec<String> = list.all().iter().map(encode_task).collect();

    assert_eq!(
        records,
        [
            "T | 0 | join sports club",
            "D | 1 | return book | June 6th",
            "E | 0 | project meeting | Aug 6th 2-4pm",
        ]
    );
}

#[test]
fn list_roundtrip_preserves_order_and_fields() {
    let list = sample_list();
    let document = encode_tasks(&list);

    assert_eq!(document.lines().count(), 3);
    assert!(document.ends_with('\n'));
    assert_eq!(decode_tasks(&document).unwrap(), list);
}

#[test]
fn empty_list_roundtrip() {
    let document = encode_tasks(&TaskList::new());

    assert_eq!(document, "");
    assert!(decode_tasks(&document).unwrap().is_empty());
}

#[test]
fn separator_like_text_roundtrips() {
    let tricky = [
        Task::todo("pipes | inside | text").unwrap(),
        Task::deadline("back\\slash ", " /by x | y").unwrap(),
        Task::event(" leading space", "10am\nnext line").unwrap(),
    ];
    let list: TaskList = tricky.into_iter().collect();

    let decoded = decode_tasks(&encode_tasks(&list)).unwrap();
    assert_eq!(decoded, list);
    assert_eq!(decoded.get(2).unwrap().date_field(), Some(" /by x | y"));
}

#[test]
fn decode_accepts_crlf_line_endings() {
    let decoded = decode_tasks("T | 1 | a\r\nE | 0 | b | now\r\n").unwrap();

    assert_eq!(decoded.len(), 2);
    assert!(decoded.get(1).unwrap().is_done());
    assert_eq!(decoded.get(2).unwrap().kind(), TaskKind::Event);
}

#[test]
fn decode_accepts_lone_trailing_line_ending_as_empty() {
    assert!(decode_tasks("\n").unwrap().is_empty());
    assert!(decode_tasks("\r\n").unwrap().is_empty());
    assert!(matches!(
        decode_tasks("\r\n\r\n").unwrap_err(),
        CodecError::CorruptRecord { line: 1, .. }
    ));
}

#[test]
fn decode_document_reports_invalid_utf8_line() {
    let err = decode_document(b"T | 0 | fine\nT | 0 | \xff\n").unwrap_err();
    match err {
        CodecError::CorruptRecord { line, reason } => {
            assert_eq!(line, 2);
            assert!(reason.contains("UTF-8"), "unexpected reason: {reason}");
        }
    }

    let decoded = decode_document("T | 1 | café\n".as_bytes()).unwrap();
    assert_eq!(decoded.get(1).unwrap().description(), "café");
}

#[test]
fn decode_rejects_malformed_records() {
    let cases = [
        "",
        "T | 0",
        "X | 0 | unknown kind",
        "T | 2 | bad flag",
        "T | yes | bad flag",
        "T | 0 | ",
        "T | 0 | todo with date | Monday",
        "D | 0 | deadline without date",
        "E | 1 | blank window |  ",
        "T | 0 | bad \\q escape",
        "T|0|no spaces",
    ];

    for record in cases {
        let err = decode_record(record, 7).unwrap_err();
        assert!(
            matches!(err, CodecError::CorruptRecord { line: 7, .. }),
            "record `{record}` gave {err:?}"
        );
    }
}

#[test]
fn decode_tasks_reports_first_corrupt_line() {
    let document = "T | 0 | ok\nD | 0 | missing date\nT | 0 | never reached\n";

    let err = decode_tasks(document).unwrap_err();
    match err {
        CodecError::CorruptRecord { line, reason } => {
            assert_eq!(line, 2);
            assert!(reason.contains("due marker"), "unexpected reason: {reason}");
        }
    }
}

#[test]
fn decode_tasks_rejects_interior_blank_lines() {
    let err = decode_tasks("T | 0 | a\n\nT | 0 | b\n").unwrap_err();
    assert!(matches!(err, CodecError::CorruptRecord { line: 2, .. }));
}
