use crate::command::TaskCommand;
use crate::error::AppError;
use crate::model::{Priority, Task, TaskFields};
use crate::repository::TaskRepository;
use crate::storage::KeyValueStore;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// Same pattern browsers apply to `<input type="email">`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern compiles")
});

fn priority_or_default(raw: Option<&str>) -> Result<Priority, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Priority::Medium),
        Some(value) => value.parse(),
    }
}

/// The add-plan form. Contents survive a failed submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub name: String,
    pub description: String,
    pub date: String,
    pub priority: Option<String>,
}

impl TaskForm {
    pub fn validate(&self) -> Result<TaskFields, AppError> {
        let priority = priority_or_default(self.priority.as_deref())?;
        TaskFields::new(&self.name, &self.description, &self.date, priority).validated()
    }

    pub fn submit<S: KeyValueStore>(
        &mut self,
        repo: &mut TaskRepository<S>,
    ) -> Result<Task, AppError> {
        let fields = self.validate()?;
        let task = repo.create(fields)?;
        self.clear();
        Ok(task)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The edit dialog, pre-filled from an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    task_id: String,
    pub name: String,
    pub description: String,
    pub date: String,
    pub priority: Option<String>,
    open: bool,
}

impl EditForm {
    pub fn open(task: &Task) -> Self {
        Self {
            task_id: task.id.clone(),
            name: task.name.clone(),
            description: task.description.clone(),
            date: task.date.clone(),
            priority: Some(task.priority.to_string()),
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn validate(&self) -> Result<TaskFields, AppError> {
        let priority = priority_or_default(self.priority.as_deref())?;
        TaskFields::new(&self.name, &self.description, &self.date, priority).validated()
    }

    /// Applies the edit; the dialog only closes when the update succeeds.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        repo: &mut TaskRepository<S>,
    ) -> Result<Task, AppError> {
        let fields = self.validate()?;
        let outcome = repo.dispatch(TaskCommand::Edit {
            id: self.task_id.clone(),
            fields,
        })?;
        self.open = false;
        Ok(outcome.into_task())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    touched: bool,
}

/// Values captured from a valid contact submission, shown back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactConfirmation {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            touched: false,
        }
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError {
                field: ContactField::Name,
                message: "name is required".to_string(),
            });
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError {
                field: ContactField::Email,
                message: "email is required".to_string(),
            });
        } else if !EMAIL_PATTERN.is_match(email) {
            errors.push(FieldError {
                field: ContactField::Email,
                message: "email must be a valid address".to_string(),
            });
        }

        if self.message.trim().is_empty() {
            errors.push(FieldError {
                field: ContactField::Message,
                message: "message is required".to_string(),
            });
        }

        errors
    }

    /// Submission stays disabled while this is false.
    pub fn is_valid(&self) -> bool {
        self.field_errors().is_empty()
    }

    /// Marks the form for validation highlighting.
    pub fn touch(&mut self) {
        self.touched = true;
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn submit(&mut self) -> Result<ContactConfirmation, AppError> {
        self.touch();
        let errors = self.field_errors();
        if let Some(first) = errors.first() {
            let joined = errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::debug!(field = first.field.label(), "contact form rejected");
            return Err(AppError::validation(joined));
        }

        let confirmation = ContactConfirmation {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        };
        *self = Self::default();
        Ok(confirmation)
    }
}
