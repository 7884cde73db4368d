use crate::error::AppError;
use crate::model::{ActivityEntry, Task, ThemeMode};
use crate::storage::{ACTIVITY_KEY, DARK_MODE_KEY, KeyValueStore, TASKS_KEY};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Typed snapshots on top of a raw key-value store.
#[derive(Debug)]
pub struct JsonStore<S> {
    backend: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn load_tasks(&self) -> Result<Vec<Task>, AppError> {
        self.load_list(TASKS_KEY)
    }

    pub fn save_tasks(&mut self, tasks: &[Task]) -> Result<(), AppError> {
        self.save_list(TASKS_KEY, tasks)
    }

    pub fn load_activity(&self) -> Result<Vec<ActivityEntry>, AppError> {
        self.load_list(ACTIVITY_KEY)
    }

    pub fn save_activity(&mut self, entries: &[ActivityEntry]) -> Result<(), AppError> {
        self.save_list(ACTIVITY_KEY, entries)
    }

    /// Writes tasks then activity as one unit. If the activity write fails
    /// the previous tasks snapshot is put back.
    pub fn save_snapshot(
        &mut self,
        tasks: &[Task],
        activity: &[ActivityEntry],
    ) -> Result<(), AppError> {
        let previous_tasks = self.backend.get(TASKS_KEY)?;
        self.save_list(TASKS_KEY, tasks)?;

        if let Err(err) = self.save_list(ACTIVITY_KEY, activity) {
            let restored = match previous_tasks.as_deref() {
                Some(raw) => self.backend.set(TASKS_KEY, raw),
                None => self.backend.remove(TASKS_KEY),
            };
            if let Err(restore_err) = restored {
                warn!(error = %restore_err, "could not restore tasks snapshot");
            }
            return Err(err);
        }

        Ok(())
    }

    pub fn load_theme(&self) -> Result<ThemeMode, AppError> {
        Ok(self
            .backend
            .get(DARK_MODE_KEY)?
            .map(|raw| ThemeMode::from_flag(&raw))
            .unwrap_or_default())
    }

    pub fn save_theme(&mut self, mode: ThemeMode) -> Result<(), AppError> {
        self.backend.set(DARK_MODE_KEY, mode.as_flag())
    }

    pub fn clear_theme(&mut self) -> Result<(), AppError> {
        self.backend.remove(DARK_MODE_KEY)
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, AppError> {
        let Some(content) = self.backend.get(key)? else {
            return Ok(Vec::new());
        };
        if content.trim().is_empty() || content.trim() == "null" {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .map_err(|err| AppError::invalid_data(format!("{key}: {err}")))
    }

    fn save_list<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), AppError> {
        let content =
            serde_json::to_string(items).map_err(|err| AppError::invalid_data(err.to_string()))?;
        self.backend.set(key, &content)?;
        debug!(key, entries = items.len(), "snapshot written");
        Ok(())
    }
}
