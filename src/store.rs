use crate::model::{self, Task, TaskDraft, TaskId};
use crate::storage::TaskPersistence;
use chrono::NaiveDate;
use log::debug;
use rand::{distributions::Alphanumeric, Rng};

const ID_LEN: usize = 12;

/// In-memory task list that writes itself back through `P` after every
/// successful mutation.
#[derive(Debug)]
pub struct TaskStore<P> {
    tasks: Vec<Task>,
    persistence: P,
    revision: u64,
}

impl<P: TaskPersistence> TaskStore<P> {
    /// An empty store. Call [`TaskStore::load`] once before mutating.
    pub fn new(persistence: P) -> Self {
        TaskStore {
            tasks: Vec::new(),
            persistence,
            revision: 0,
        }
    }

    /// A store populated from `persistence`.
    pub fn open(persistence: P) -> Self {
        let mut store = TaskStore::new(persistence);
        store.load();
        store
    }

    /// Replaces the in-memory list with whatever is persisted.
    pub fn load(&mut self) {
        self.tasks = self.persistence.load();
        self.revision += 1;
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<&Task> {
        model::tasks_for_date(&self.tasks, date)
    }

    /// Bumped on every load and every applied mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn create(&mut self, draft: TaskDraft) -> TaskId {
        let id = self.fresh_id();
        debug!("creating task {} on {}", id, draft.date);
        self.tasks.push(Task::new(id.clone(), draft));
        self.commit();
        id
    }

    /// Returns `false`, without writing, when no task has `id`.
    pub fn update(&mut self, id: &str, draft: TaskDraft) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!("update skipped, no task {}", id);
            return false;
        };
        task.apply(draft);
        debug!("updated task {}", id);
        self.commit();
        true
    }

    /// Returns `false`, without writing, when no task has `id`.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!("delete skipped, no task {}", id);
            return false;
        }
        debug!("deleted task {}", id);
        self.commit();
        true
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.persistence.save(&self.tasks);
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = generate_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn generate_id() -> TaskId {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskForm;
    use crate::storage::{LocalTaskStorage, MemoryStore};

    #[derive(Debug, Default)]
    struct RecordingPersistence {
        stored: Vec<Task>,
        saves: Vec<Vec<Task>>,
    }

    impl TaskPersistence for RecordingPersistence {
        fn load(&self) -> Vec<Task> {
            self.stored.clone()
        }

        fn save(&mut self, tasks: &[Task]) {
            self.stored = tasks.to_vec();
            self.saves.push(tasks.to_vec());
        }
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn draft(title: &str, project: &str) -> TaskDraft {
        TaskForm::new(title)
            .with_project(project)
            .into_draft(march(5))
            .unwrap()
    }

    #[test]
    fn test_create_update_delete_lifecycle() {
        let mut store = TaskStore::open(RecordingPersistence::default());
        let id = store.create(draft("Draft spec", "Design"));
        assert!(!id.is_empty());
        assert_eq!(store.persistence().saves.len(), 1);

        let mut reloaded = TaskStore::open(RecordingPersistence {
            stored: store.persistence().stored.clone(),
            saves: Vec::new(),
        });
        let task = reloaded.get(&id).unwrap().clone();
        assert_eq!(task.date, "2024-03-05");
        assert_eq!(task.title, "Draft spec");
        assert_eq!(task.project, "Design");

        assert!(reloaded.update(&id, draft("Final spec", "Design")));
        let updated = reloaded.get(&id).unwrap();
        assert_eq!(updated.title, "Final spec");
        assert_eq!(updated.date, task.date);
        assert_eq!(updated.project, task.project);
        assert_eq!(updated.note, task.note);
        assert_eq!(reloaded.persistence().saves.len(), 1);
        assert_eq!(reloaded.persistence().saves[0], reloaded.tasks());

        assert!(reloaded.delete(&id));
        assert!(reloaded.tasks().is_empty());
        assert_eq!(reloaded.persistence().saves.len(), 2);
        assert!(reloaded.persistence().saves[1].is_empty());
    }

    #[test]
    fn test_missing_id_is_a_noop() {
        let mut store = TaskStore::open(RecordingPersistence::default());
        store.create(draft("keep", "Review"));
        let revision = store.revision();
        assert!(!store.update("nope", draft("changed", "Other")));
        assert!(!store.delete("nope"));
        assert_eq!(store.revision(), revision);
        assert_eq!(store.persistence().saves.len(), 1);
        assert_eq!(store.tasks()[0].title, "keep");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = TaskStore::open(RecordingPersistence::default());
        let mut ids: Vec<TaskId> = (0..200).map(|_| store.create(draft("t", "Other"))).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_every_save_writes_full_list() {
        let mut store = TaskStore::open(RecordingPersistence::default());
        store.create(draft("one", "Design"));
        store.create(draft("two", "Development"));
        let saves = &store.persistence().saves;
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].len(), 1);
        assert_eq!(saves[1].len(), 2);
    }

    #[test]
    fn test_tasks_for_date() {
        let mut store = TaskStore::open(RecordingPersistence::default());
        let id = store.create(draft("on the fifth", "Design"));
        let other = TaskForm::new("on the sixth").into_draft(march(6)).unwrap();
        store.create(other);
        let found = store.tasks_for_date(march(5));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);
    }

    #[test]
    fn test_unavailable_storage_keeps_memory_state() {
        let mut store = TaskStore::open(LocalTaskStorage::new(MemoryStore::unavailable()));
        let id = store.create(draft("still here", "Other"));
        assert_eq!(store.get(&id).map(|t| t.title.as_str()), Some("still here"));
        assert_eq!(store.persistence().store().writes(), 0);
    }
}
