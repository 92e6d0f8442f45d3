use chrono::NaiveDate;
use std::fs;
use taskcal::app::{Editor, SaveOutcome};
use taskcal::model::{FormError, TaskForm};
use taskcal::storage::{FileStore, LocalTaskStorage, TASKS_KEY};
use taskcal::store::TaskStore;
use taskcal::view::MonthLayout;

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn open(dir: &std::path::Path) -> TaskStore<LocalTaskStorage<FileStore>> {
    TaskStore::open(LocalTaskStorage::new(FileStore::new(dir)))
}

#[test]
fn tasks_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    assert!(store.tasks().is_empty());

    let mut editor = Editor::default();
    editor.open_day(march(5));
    let form = TaskForm::new("Draft spec").with_project("Design");
    let Ok(Some(SaveOutcome::Created(id))) = editor.save(&mut store, form) else {
        panic!("task was not created");
    };

    let reopened = open(dir.path());
    assert_eq!(reopened.tasks().len(), 1);
    let task = reopened.get(&id).unwrap();
    assert_eq!(task.date, "2024-03-05");
    assert_eq!(task.title, "Draft spec");
    assert_eq!(task.project, "Design");
    assert_eq!(task.note, None);

    let raw = fs::read_to_string(dir.path().join(TASKS_KEY)).unwrap();
    assert!(raw.starts_with('['));
    assert!(!raw.contains("note"));
}

#[test]
fn update_then_delete_rewrites_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    let draft = TaskForm::new("Draft spec")
        .with_project("Design")
        .with_note("outline only")
        .into_draft(march(5))
        .unwrap();
    let id = store.create(draft);

    let mut editor = Editor::default();
    assert!(editor.open_task(&store, &id));
    let mut form = editor.form(&store);
    form.title = "Final spec".into();
    editor.save(&mut store, form).unwrap();

    let task = open(dir.path()).get(&id).cloned().unwrap();
    assert_eq!(task.title, "Final spec");
    assert_eq!(task.project, "Design");
    assert_eq!(task.note.as_deref(), Some("outline only"));
    assert_eq!(task.date, "2024-03-05");

    assert!(store.delete(&id));
    assert!(open(dir.path()).tasks().is_empty());
    let raw = fs::read_to_string(dir.path().join(TASKS_KEY)).unwrap();
    assert_eq!(raw, "[]");
}

#[test]
fn blank_title_never_touches_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    let mut editor = Editor::default();
    editor.open_day(march(5));
    assert_eq!(
        editor.save(&mut store, TaskForm::new("   ")),
        Err(FormError::EmptyTitle)
    );
    assert!(!dir.path().join(TASKS_KEY).exists());
}

#[test]
fn corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(TASKS_KEY), "definitely not json").unwrap();
    let mut store = open(dir.path());
    assert!(store.tasks().is_empty());
    store.create(TaskForm::new("fresh").into_draft(march(1)).unwrap());
    assert_eq!(open(dir.path()).tasks().len(), 1);
}

#[test]
fn month_layout_shows_stored_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open(dir.path());
    for title in ["one", "two", "three"] {
        store.create(TaskForm::new(title).into_draft(march(5)).unwrap());
    }
    let layout = MonthLayout::build(march(1), store.tasks(), march(20));
    let fifth = layout.days().find(|cell| cell.date == march(5)).unwrap();
    let titles: Vec<&str> = fifth.badges.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["one", "two"]);
    assert_eq!(fifth.overflow, 1);
    assert!(fifth.is_past);
}
