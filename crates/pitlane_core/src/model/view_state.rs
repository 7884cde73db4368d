use crate::error::AppError;
use crate::model::Priority;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "completed" | "done" => Ok(Self::Completed),
            "pending" | "upcoming" => Ok(Self::Pending),
            other => Err(AppError::validation(format!("unknown status filter '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl FromStr for PriorityFilter {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse::<Priority>().map(Self::Only)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    None,
    Name,
    Date,
}

impl FromStr for SortMode {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "name" => Ok(Self::Name),
            "date" => Ok(Self::Date),
            other => Err(AppError::validation(format!("unknown sort mode '{other}'"))),
        }
    }
}

/// Display-only selection applied to the task list. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub sort: SortMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Enabled,
    #[default]
    Disabled,
}

impl ThemeMode {
    pub fn as_flag(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    /// Anything other than the literal `enabled` reads as disabled.
    pub fn from_flag(raw: &str) -> Self {
        if raw.trim() == "enabled" {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Enabled => Self::Disabled,
            Self::Disabled => Self::Enabled,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Enabled
    }
}

#[cfg(test)]
mod tests {
    use super::{PriorityFilter, SortMode, StatusFilter, ThemeMode};
    use crate::model::Priority;

    #[test]
    fn filters_parse_page_labels() {
        assert_eq!("Upcoming".parse::<StatusFilter>().unwrap(), StatusFilter::Pending);
        assert_eq!("all".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
        assert_eq!(
            "High".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(Priority::High)
        );
        assert_eq!("DATE".parse::<SortMode>().unwrap(), SortMode::Date);
    }

    #[test]
    fn unknown_filter_values_are_rejected() {
        assert!("archived".parse::<StatusFilter>().is_err());
        assert!("random".parse::<SortMode>().is_err());
    }

    #[test]
    fn theme_flag_round_trips_and_toggles() {
        assert_eq!(ThemeMode::from_flag("enabled"), ThemeMode::Enabled);
        assert_eq!(ThemeMode::from_flag("yes"), ThemeMode::Disabled);
        assert_eq!(ThemeMode::Enabled.toggled().as_flag(), "disabled");
        assert!(ThemeMode::Disabled.toggled().is_dark());
    }
}
