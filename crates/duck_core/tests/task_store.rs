use duck_core::{StorageError, Task, TaskList, TaskStore};
use std::fs;

fn sample_list() -> TaskList {
    let mut list = TaskList::new();
    list.add(Task::todo("water plants").unwrap());
    list.add(Task::event("concert", "Sat 8pm").unwrap());
    list.mark_done(1).unwrap();
    list
}

#[test]
fn load_missing_file_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(dir.path().join("absent.txt"));

    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_then_load_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(dir.path().join("nested").join("duck.txt"));
    let list = sample_list();

    store.save(&list).unwrap();
    assert_eq!(store.load().unwrap(), Some(list));

    let on_disk = fs::read_to_string(store.path()).unwrap();
    assert_eq!(on_disk, "T | 1 | water plants\nE | 0 | concert | Sat 8pm\n");
}

#[test]
fn save_replaces_previous_document_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::new(dir.path().join("duck.txt"));

    store.save(&sample_list()).unwrap();
    store.save(&TaskList::new()).unwrap();

    assert_eq!(store.load().unwrap(), Some(TaskList::new()));
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn load_corrupt_file_is_distinguished_from_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("duck.txt");
    fs::write(&path, "T | 0 | fine\nZ | 0 | broken\n").unwrap();

    let err = TaskStore::new(&path).load().unwrap_err();
    match err {
        StorageError::Corrupt { path: reported, source } => {
            assert_eq!(reported, path);
            assert!(source.to_string().contains("line 2"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_non_utf8_file_is_corrupt_not_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("duck.txt");
    fs::write(&path, b"T | 0 | \xff\n").unwrap();

    let err = TaskStore::new(&path).load().unwrap_err();
    match err {
        StorageError::Corrupt { source, .. } => {
            assert!(source.to_string().contains("line 1"));
            assert!(source.to_string().contains("UTF-8"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_directory_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = TaskStore::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
}
