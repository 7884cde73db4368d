//! Bounded, newest-first log of task mutations.

use crate::error::AppError;
use crate::model::ActivityEntry;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const MAX_ENTRIES: usize = 10;

pub const EMPTY_PLACEHOLDER: &str = "No recent activity.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    /// Rebuilds a log from a stored snapshot, enforcing the cap.
    pub fn from_entries(mut entries: Vec<ActivityEntry>) -> Self {
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    pub fn record(&mut self, message: &str) -> Result<&ActivityEntry, AppError> {
        self.record_at(message, OffsetDateTime::now_utc())
    }

    pub fn record_at(
        &mut self,
        message: &str,
        at: OffsetDateTime,
    ) -> Result<&ActivityEntry, AppError> {
        let timestamp = at
            .format(&Rfc3339)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        self.entries.insert(
            0,
            ActivityEntry {
                message: message.to_string(),
                timestamp,
            },
        );
        self.entries.truncate(MAX_ENTRIES);

        Ok(&self.entries[0])
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
