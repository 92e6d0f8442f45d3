use crate::model::Task;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Key under which the full task list is stored.
pub const TASKS_KEY: &str = "project-calendar-tasks";

/// Opaque string-keyed store the task list is persisted into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Loads and saves the whole task list. Neither operation reports failure.
pub trait TaskPersistence {
    fn load(&self) -> Vec<Task>;
    fn save(&mut self, tasks: &[Task]);
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("storage is unavailable")]
    Unavailable,
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()).into());
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
        Ok(Some(data))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).with_context(|| format!("creating {:?}", self.dir))?;
        fs::write(&path, value).with_context(|| format!("writing {:?}", path))?;
        Ok(())
    }
}

/// In-process store. With `unavailable` set every write fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn unavailable() -> Self {
        MemoryStore {
            unavailable: true,
            ..MemoryStore::default()
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Successful `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable.into());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Persists the task list as a JSON array under [`TASKS_KEY`].
#[derive(Debug, Clone)]
pub struct LocalTaskStorage<S> {
    store: S,
}

impl<S: KeyValueStore> LocalTaskStorage<S> {
    pub fn new(store: S) -> Self {
        LocalTaskStorage { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn try_load(&self) -> Result<Vec<Task>> {
        match self.store.get(TASKS_KEY)? {
            Some(data) => serde_json::from_str(&data).context("parsing stored tasks"),
            None => Ok(Vec::new()),
        }
    }

    fn try_save(&mut self, tasks: &[Task]) -> Result<()> {
        let serialized = serde_json::to_string(tasks).context("serializing tasks")?;
        self.store.set(TASKS_KEY, &serialized)
    }
}

impl<S: KeyValueStore> TaskPersistence for LocalTaskStorage<S> {
    fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => {
                debug!("loaded {} tasks", tasks.len());
                tasks
            }
            Err(err) => {
                warn!("discarding stored tasks: {err:#}");
                Vec::new()
            }
        }
    }

    fn save(&mut self, tasks: &[Task]) {
        if let Err(err) = self.try_save(tasks) {
            warn!("failed to save {} tasks: {err:#}", tasks.len());
        }
    }
}

/// Platform data directory used when the configuration does not override it.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "taskcal").context("locating data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
