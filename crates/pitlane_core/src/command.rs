use crate::error::AppError;
use crate::model::{Task, TaskFields};
use crate::repository::TaskRepository;
use crate::storage::KeyValueStore;
use tracing::warn;

/// Row actions, addressed by task id rather than display position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    ToggleComplete { id: String },
    Delete { id: String },
    Edit { id: String, fields: TaskFields },
}

impl TaskCommand {
    pub fn id(&self) -> &str {
        match self {
            Self::ToggleComplete { id } | Self::Delete { id } | Self::Edit { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Updated(Task),
    Deleted(Task),
}

impl CommandOutcome {
    pub fn task(&self) -> &Task {
        match self {
            Self::Updated(task) | Self::Deleted(task) => task,
        }
    }

    pub fn into_task(self) -> Task {
        match self {
            Self::Updated(task) | Self::Deleted(task) => task,
        }
    }
}

impl<S: KeyValueStore> TaskRepository<S> {
    pub fn dispatch(&mut self, command: TaskCommand) -> Result<CommandOutcome, AppError> {
        let id = command.id().to_string();
        let result = match command {
            TaskCommand::ToggleComplete { id } => {
                self.toggle_complete(&id).map(CommandOutcome::Updated)
            }
            TaskCommand::Delete { id } => self.delete(&id).map(CommandOutcome::Deleted),
            TaskCommand::Edit { id, fields } => {
                self.update(&id, fields).map(CommandOutcome::Updated)
            }
        };

        if let Err(err) = &result
            && err.is_not_found()
        {
            warn!(%id, "ignoring command for unknown task");
        }

        result
    }
}
