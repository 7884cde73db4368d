mod activity;
mod task;
mod view_state;

pub use activity::ActivityEntry;
pub(crate) use task::parse_calendar_date;
pub use task::{Priority, Task, TaskFields};
pub use view_state::{PriorityFilter, SortMode, StatusFilter, ThemeMode, ViewState};
