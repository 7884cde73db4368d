use clap::{CommandFactory, Parser};
use pitlane_cli::cli::{Cli, Command, ThemeAction, collect_overrides};
use pitlane_cli::render;
use pitlane_core::command::{CommandOutcome, TaskCommand};
use pitlane_core::config::{
    Config, Palette, load_config_with_fallback, merge_overrides, palette_for_mode,
};
use pitlane_core::error::AppError;
use pitlane_core::forms::{ContactForm, EditForm, TaskForm};
use pitlane_core::model::{Priority, Task, TaskFields, ThemeMode, ViewState};
use pitlane_core::race::{HttpFeed, RaceClient, UNAVAILABLE};
use pitlane_core::repository::TaskRepository;
use pitlane_core::storage::FileStore;
use pitlane_core::view::project;
use std::io::{self, BufRead};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// State shared by every command in one process: the store is read once here
/// and rewritten by each mutation.
struct Session {
    repo: TaskRepository<FileStore>,
    config: Config,
}

impl Session {
    fn open() -> Result<Self, AppError> {
        let loaded = load_config_with_fallback();
        if let Some(err) = loaded.error {
            eprintln!("WARNING: using default configuration: {err}");
        }

        let repo = TaskRepository::load(FileStore::from_env()?)?;
        Ok(Self {
            repo,
            config: loaded.config,
        })
    }

    fn palette(&self, config: &Config) -> Result<Palette, AppError> {
        let mode = self.repo.store().load_theme()?;
        Ok(palette_for_mode(mode, config.palette.as_deref()))
    }
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let json =
        serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_json(value: &serde_json::Value) {
    println!("{value}");
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::validation("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn report_outcome(outcome: &CommandOutcome, json: bool) -> Result<(), AppError> {
    let task = outcome.task();
    if json {
        return print_task_json(task);
    }

    let verb = match outcome {
        CommandOutcome::Deleted(_) => "Deleted",
        CommandOutcome::Updated(task) if task.completed => "Completed",
        CommandOutcome::Updated(_) => "Reopened",
    };
    println!("{verb} plan: {} ({})", task.name, task.id);
    Ok(())
}

fn run_command(session: &mut Session, cli: Cli) -> Result<(), AppError> {
    let overrides = collect_overrides(&cli.config_override).map_err(AppError::validation)?;
    let config = merge_overrides(&session.config, &overrides);
    let palette = session.palette(&config)?;

    match cli.command {
        Command::Add {
            name,
            description,
            date,
            priority,
        } => {
            let mut form = TaskForm {
                name: name.unwrap_or_default(),
                description: description.unwrap_or_default(),
                date: date.unwrap_or_default(),
                priority,
            };
            let task = form.submit(&mut session.repo)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Added plan: {} ({})", task.name, task.id);
            }
        }
        Command::Edit {
            id,
            name,
            description,
            date,
            priority,
        } => {
            let Some(current) = session.repo.find_by_id(&id) else {
                // The id is checked before the fields, so this reports not_found.
                let fields = TaskFields::new("", "", "", Priority::default());
                session.repo.dispatch(TaskCommand::Edit { id, fields })?;
                return Ok(());
            };
            let mut form = EditForm::open(current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(date) = date {
                form.date = date;
            }
            if priority.is_some() {
                form.priority = priority;
            }

            let task = form.submit(&mut session.repo)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Updated plan: {} ({})", task.name, task.id);
            }
        }
        Command::Toggle { id } => {
            let outcome = session.repo.dispatch(TaskCommand::ToggleComplete { id })?;
            report_outcome(&outcome, cli.json)?;
        }
        Command::Delete { id } => {
            let outcome = session.repo.dispatch(TaskCommand::Delete { id })?;
            report_outcome(&outcome, cli.json)?;
        }
        Command::Show { id } => {
            let task = session
                .repo
                .find_by_id(&id)
                .ok_or_else(|| AppError::not_found(format!("task {} not found", id.trim())))?;
            if cli.json {
                print_task_json(task)?;
            } else {
                println!("{}", render::task_details(task));
            }
        }
        Command::List {
            status,
            priority,
            sort,
        } => {
            let view = ViewState {
                status: status.parse()?,
                priority: priority.parse()?,
                sort: sort.parse()?,
            };
            let visible = project(session.repo.tasks(), &view);
            let summary = session.repo.summary();
            if cli.json {
                print_json(&serde_json::json!({
                    "tasks": visible,
                    "summary": summary,
                }));
            } else {
                println!("{}", render::task_table(&visible, &summary, &palette));
            }
        }
        Command::Summary => {
            let summary = session.repo.summary();
            if cli.json {
                print_json(&serde_json::json!(summary));
            } else {
                println!("{}", palette.accentize(&render::summary_line(&summary)));
            }
        }
        Command::Activity => {
            let log = session.repo.activity();
            if cli.json {
                print_json(&serde_json::json!(log.entries()));
            } else {
                println!("{}", render::activity_lines(log, &palette));
            }
        }
        Command::Race { endpoints } => {
            let endpoints = if endpoints.is_empty() {
                config.effective_endpoints()
            } else {
                endpoints
            };
            let client = RaceClient::new(HttpFeed::new(config.request_timeout()));
            match client.fetch_next(&endpoints) {
                Ok(next) => {
                    if cli.json {
                        print_json(&render::next_race_json(&next));
                    } else {
                        println!("{}", render::next_race(&next, &palette));
                    }
                }
                Err(err @ AppError::AllEndpointsFailed(_)) => {
                    error!(error = %err, "race lookup failed");
                    if cli.json {
                        print_json(&serde_json::json!({ "status": "unavailable" }));
                    } else {
                        println!("{UNAVAILABLE}");
                    }
                }
                Err(err) => return Err(err),
            }
        }
        Command::Theme { action } => {
            let store = session.repo.store_mut();
            let current = store.load_theme()?;
            let mode = match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => current,
                ThemeAction::Toggle => {
                    let next = current.toggled();
                    store.save_theme(next)?;
                    next
                }
                ThemeAction::On => {
                    store.save_theme(ThemeMode::Enabled)?;
                    ThemeMode::Enabled
                }
                ThemeAction::Off => {
                    store.save_theme(ThemeMode::Disabled)?;
                    ThemeMode::Disabled
                }
                ThemeAction::Reset => {
                    store.clear_theme()?;
                    ThemeMode::default()
                }
            };
            if cli.json {
                print_json(&serde_json::json!({ "dark_mode": mode.as_flag() }));
            } else {
                println!("Dark mode: {}", mode.as_flag());
            }
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let mut form = ContactForm::new(&name, &email, &message);
            let confirmation = form.submit()?;
            if cli.json {
                print_json(&serde_json::json!(confirmation));
            } else {
                println!("{}", render::contact_confirmation(&confirmation));
            }
        }
    }

    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let mut session = Session::open()?;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("pitlane".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(&mut session, cli) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn init_tracing() {
    // Opt-in via RUST_LOG; stdout stays reserved for command output.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() {
    init_tracing();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let result = Session::open().and_then(|mut session| run_command(&mut session, cli));
    if let Err(err) = result {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
