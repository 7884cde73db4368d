use crate::model::{PriorityFilter, SortMode, StatusFilter, Task, ViewState};
use serde::Serialize;
use std::cmp::Ordering;

pub const NO_MATCHES: &str = "No plans match the current filters.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

pub fn summarize(tasks: &[Task]) -> Summary {
    let completed = tasks.iter().filter(|task| task.completed).count();
    Summary {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
    }
}

/// Filters then sorts a copy of `tasks` for display.
pub fn project(tasks: &[Task], view: &ViewState) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_status(task, view.status))
        .filter(|task| matches_priority(task, view.priority))
        .cloned()
        .collect();

    match view.sort {
        SortMode::None => {}
        SortMode::Name => visible.sort_by(|a, b| locale_compare(&a.name, &b.name)),
        SortMode::Date => visible.sort_by(compare_dates),
    }

    visible
}

fn matches_status(task: &Task, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Completed => task.completed,
        StatusFilter::Pending => !task.completed,
    }
}

fn matches_priority(task: &Task, filter: PriorityFilter) -> bool {
    match filter {
        PriorityFilter::All => true,
        PriorityFilter::Only(priority) => task.priority == priority,
    }
}

/// Case-folded comparison first so "alpha" sorts beside "Alpha", then the
/// exact text to keep the order total.
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// Unparseable dates sort after every valid one; `sort_by` keeps ties stable.
fn compare_dates(a: &Task, b: &Task) -> Ordering {
    match (a.calendar_date(), b.calendar_date()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
