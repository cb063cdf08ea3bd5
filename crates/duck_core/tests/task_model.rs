use duck_core::{Task, TaskKind, TaskValidationError};

#[test]
fn new_task_starts_not_done() {
    let task = Task::todo("read book").unwrap();

    assert_eq!(task.kind(), TaskKind::Todo);
    assert_eq!(task.description(), "read book");
    assert_eq!(task.date_field(), None);
    assert!(!task.is_done());
}

#[test]
fn construction_enforces_kind_date_pairing() {
    assert_eq!(
        Task::new(TaskKind::Todo, "x", Some("Monday".to_string())).unwrap_err(),
        TaskValidationError::UnexpectedDateField
    );
    assert_eq!(
        Task::new(TaskKind::Deadline, "x", None).unwrap_err(),
        TaskValidationError::MissingDateField(TaskKind::Deadline)
    );
    assert_eq!(
        Task::new(TaskKind::Event, "x", None).unwrap_err(),
        TaskValidationError::MissingDateField(TaskKind::Event)
    );
    assert_eq!(
        Task::event("x", "  ").unwrap_err(),
        TaskValidationError::EmptyDateField(TaskKind::Event)
    );
    assert_eq!(
        Task::deadline(" ", "Friday").unwrap_err(),
        TaskValidationError::EmptyDescription
    );
}

#[test]
fn mark_done_is_idempotent_and_reports_previous_state() {
    let mut task = Task::deadline("submit report", "Friday").unwrap();

    assert!(!task.mark_done());
    assert!(task.mark_done());
    assert!(task.is_done());

    assert!(task.mark_undone());
    assert!(!task.mark_undone());
    assert!(!task.is_done());
}

#[test]
fn mark_then_unmark_restores_original_state() {
    let mut task = Task::event("team sync", "3pm").unwrap();
    let original = task.clone();

    task.mark_done();
    task.mark_undone();
    assert_eq!(task, original);
}

#[test]
fn display_renders_kind_checkbox_and_date_field() {
    let mut todo = Task::todo("borrow book").unwrap();
    assert_eq!(todo.to_string(), "[T][ ] borrow book");
    todo.mark_done();
    assert_eq!(todo.to_string(), "[T][X] borrow book");

    let deadline = Task::deadline("return book", "Sunday").unwrap();
    assert_eq!(deadline.to_string(), "[D][ ] return book (by: Sunday)");

    let event = Task::event("project meeting", "Mon 2-4pm").unwrap();
    assert_eq!(event.to_string(), "[E][ ] project meeting (at: Mon 2-4pm)");
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let mut task = Task::deadline("file taxes", "April 15").unwrap();
    task.mark_done();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["kind"], "deadline");
    assert_eq!(json["description"], "file taxes");
    assert_eq!(json["date"], "April 15");
    assert_eq!(json["done"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);

    let todo_json = serde_json::to_value(Task::todo("nap").unwrap()).unwrap();
    assert!(todo_json.get("date").is_none());
}

#[test]
fn deserialize_rejects_todo_with_date() {
    let value = serde_json::json!({
        "kind": "todo",
        "description": "sneaky",
        "date": "tomorrow",
        "done": false
    });

    let err = serde_json::from_value::<Task>(value).unwrap_err();
    assert!(
        err.to_string().contains("todo must not carry a date field"),
        "unexpected error: {err}"
    );
}
