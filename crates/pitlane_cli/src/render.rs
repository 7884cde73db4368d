use pitlane_core::activity::{ActivityLog, EMPTY_PLACEHOLDER};
use pitlane_core::config::Palette;
use pitlane_core::forms::ContactConfirmation;
use pitlane_core::model::Task;
use pitlane_core::race::{NextRace, SEASON_FINISHED};
use pitlane_core::view::{NO_MATCHES, Summary};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Plan")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            description: task.description.clone(),
            date: task.date.clone(),
            priority: task.priority.to_string(),
            status: task.status_label().to_string(),
        }
    }
}

pub fn summary_line(summary: &Summary) -> String {
    format!(
        "Total Plans: {} | Completed: {} | Upcoming: {}",
        summary.total, summary.completed, summary.pending
    )
}

pub fn task_table(tasks: &[Task], summary: &Summary, palette: &Palette) -> String {
    let body = if tasks.is_empty() {
        NO_MATCHES.to_string()
    } else {
        let mut table = Table::new(tasks.iter().map(TaskRow::from));
        table.with(Style::rounded());
        table.to_string()
    };

    format!("{}\n{}", body, palette.accentize(&summary_line(summary)))
}

pub fn task_details(task: &Task) -> String {
    format!(
        "ID: {}\nPlan: {}\nDescription: {}\nDate: {}\nPriority: {}\nStatus: {}",
        task.id,
        task.name,
        task.description,
        task.date,
        task.priority,
        task.status_label()
    )
}

pub fn activity_lines(log: &ActivityLog, palette: &Palette) -> String {
    if log.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    log.entries()
        .iter()
        .map(|entry| format!("{}  {}", palette.mutedize(&entry.timestamp), entry.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn next_race(next: &NextRace, palette: &Palette) -> String {
    match next {
        NextRace::Upcoming(race) => format!(
            "{}\n{}\n{}",
            palette.accentize(&race.name),
            race.location_line(),
            race.date
        ),
        NextRace::SeasonFinished => SEASON_FINISHED.to_string(),
    }
}

pub fn next_race_json(next: &NextRace) -> serde_json::Value {
    match next {
        NextRace::Upcoming(race) => serde_json::json!({
            "status": "upcoming",
            "race": race,
        }),
        NextRace::SeasonFinished => serde_json::json!({ "status": "season_finished" }),
    }
}

pub fn contact_confirmation(confirmation: &ContactConfirmation) -> String {
    format!(
        "Thanks for getting in touch!\nName: {}\nEmail: {}\nMessage: {}",
        confirmation.name, confirmation.email, confirmation.message
    )
}
