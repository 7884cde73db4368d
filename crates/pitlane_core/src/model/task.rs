use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Snapshots written before ids existed load with an empty id and are
    /// backfilled by the repository.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Upcoming" }
    }

    pub fn calendar_date(&self) -> Option<Date> {
        parse_calendar_date(&self.date).ok()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(AppError::validation(format!(
                "priority must be High, Medium or Low (got '{other}')"
            ))),
        }
    }
}

/// Editable fields of a task, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    pub date: String,
    pub priority: Priority,
}

impl TaskFields {
    pub fn new(name: &str, description: &str, date: &str, priority: Priority) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            date: date.to_string(),
            priority,
        }
    }

    /// Trims every text field and rejects blanks or a malformed date.
    pub fn validated(&self) -> Result<Self, AppError> {
        let name = self.name.trim();
        let description = self.description.trim();
        let date = self.date.trim();

        if name.is_empty() || description.is_empty() || date.is_empty() {
            return Err(AppError::validation("Please fill all fields."));
        }
        parse_calendar_date(date)?;

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            date: date.to_string(),
            priority: self.priority,
        })
    }
}

pub(crate) fn parse_calendar_date(raw: &str) -> Result<Date, AppError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::validation("date must be YYYY-MM-DD"))
}
