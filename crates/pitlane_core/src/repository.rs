use crate::activity::ActivityLog;
use crate::error::AppError;
use crate::model::{Task, TaskFields};
use crate::storage::{JsonStore, KeyValueStore};
use crate::view::{Summary, summarize};
use tracing::info;
use uuid::Uuid;

/// In-memory task collection loaded once from the store and written back as
/// a whole snapshot after every mutation.
#[derive(Debug)]
pub struct TaskRepository<S> {
    store: JsonStore<S>,
    tasks: Vec<Task>,
    activity: ActivityLog,
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn load(backend: S) -> Result<Self, AppError> {
        let mut store = JsonStore::new(backend);
        let mut tasks = store.load_tasks()?;
        let activity = ActivityLog::from_entries(store.load_activity()?);

        let mut backfilled = 0;
        for task in tasks.iter_mut().filter(|task| task.id.trim().is_empty()) {
            task.id = new_task_id();
            backfilled += 1;
        }
        if backfilled > 0 {
            info!(backfilled, "assigned ids to stored tasks without one");
            store.save_tasks(&tasks)?;
        }

        Ok(Self {
            store,
            tasks,
            activity,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.tasks)
    }

    pub fn store(&self) -> &JsonStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut JsonStore<S> {
        &mut self.store
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        let trimmed_id = id.trim();
        self.tasks.iter().find(|task| task.id == trimmed_id)
    }

    pub fn create(&mut self, fields: TaskFields) -> Result<Task, AppError> {
        let fields = fields.validated()?;
        let task = Task {
            id: new_task_id(),
            name: fields.name,
            description: fields.description,
            date: fields.date,
            priority: fields.priority,
            completed: false,
        };

        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next, format!("Added: \"{}\" ({})", task.name, task.priority))?;
        info!(id = %task.id, "task created");

        Ok(task)
    }

    pub fn update(&mut self, id: &str, fields: TaskFields) -> Result<Task, AppError> {
        let index = self.position(id)?;
        let fields = fields.validated()?;

        let mut next = self.tasks.clone();
        let task = &mut next[index];
        task.name = fields.name;
        task.description = fields.description;
        task.date = fields.date;
        task.priority = fields.priority;
        let updated = task.clone();

        self.commit(next, format!("Edited: \"{}\" ({})", updated.name, updated.priority))?;
        info!(id = %updated.id, "task updated");

        Ok(updated)
    }

    pub fn toggle_complete(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self.position(id)?;

        let mut next = self.tasks.clone();
        let task = &mut next[index];
        task.completed = !task.completed;
        let updated = task.clone();

        let verb = if updated.completed { "Completed" } else { "Reopened" };
        self.commit(next, format!("{verb}: \"{}\"", updated.name))?;
        info!(id = %updated.id, completed = updated.completed, "task toggled");

        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task, AppError> {
        let index = self.position(id)?;

        let mut next = self.tasks.clone();
        let removed = next.remove(index);
        self.commit(next, format!("Deleted: \"{}\"", removed.name))?;
        info!(id = %removed.id, "task deleted");

        Ok(removed)
    }

    fn position(&self, id: &str) -> Result<usize, AppError> {
        let trimmed_id = id.trim();
        if trimmed_id.is_empty() {
            return Err(AppError::validation("id is required"));
        }

        self.tasks
            .iter()
            .position(|task| task.id == trimmed_id)
            .ok_or_else(|| AppError::not_found(format!("task {trimmed_id} not found")))
    }

    // Memory only changes once both snapshots are written.
    fn commit(&mut self, tasks: Vec<Task>, message: String) -> Result<(), AppError> {
        let mut activity = self.activity.clone();
        activity.record(&message)?;
        self.store.save_snapshot(&tasks, activity.entries())?;

        self.tasks = tasks;
        self.activity = activity;
        Ok(())
    }
}

fn new_task_id() -> String {
    Uuid::new_v4().to_string()
}
