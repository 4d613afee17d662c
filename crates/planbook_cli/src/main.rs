//! Planbook command-line entry point.
//!
//! # Responsibility
//! - Verify `planbook_core` linkage and logging setup (`ping`).
//! - Load a JSON snapshot of hosted API rows and print derived views.
//!
//! # Invariants
//! - Read-only: the snapshot file is never written back.
//! - Calendar days are evaluated in the offset of `--now` (local time when
//!   omitted).

mod render;

use chrono::{DateTime, FixedOffset, Local};
use clap::{Args, Parser, Subcommand};
use log::info;
use planbook_core::{
    Category, CoreConfig, DashboardService, DateScope, EffectiveStatus, InMemoryRepository,
    LogLevel, Meeting, MeetingFilter, MeetingService, MeetingStatus, Note, NoteFilter, NoteService,
    Priority, Task, TaskFilter, TaskService, WireSnapshot,
};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "planbook", version, about = "Query a Planbook record snapshot")]
struct Cli {
    /// Snapshot file: `{ "tasks": [...], "notes": [...], "meetings": [...] }`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Evaluate views at this RFC 3339 instant instead of the wall clock.
    #[arg(long, global = true, value_parser = parse_now)]
    now: Option<DateTime<FixedOffset>>,

    /// Write rolling log files here (overrides PLANBOOK_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log verbosity (overrides PLANBOOK_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Print core linkage info.
    Ping,
    /// List tasks by priority, then due date.
    Tasks(TaskArgs),
    /// List notes, most recently touched first.
    Notes(NoteArgs),
    /// List meetings, earliest first.
    Meetings(MeetingArgs),
    /// Print the overview dashboard.
    Dashboard,
}

#[derive(Debug, Clone, Args)]
struct TaskArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    priority: Option<Priority>,
    #[arg(long)]
    category: Option<Category>,
    /// completed | pending | overdue
    #[arg(long)]
    status: Option<EffectiveStatus>,
}

#[derive(Debug, Clone, Args)]
struct NoteArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    tag: Option<String>,
    /// Print the tag index instead of notes.
    #[arg(long)]
    tags: bool,
}

#[derive(Debug, Clone, Args)]
struct MeetingArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    status: Option<MeetingStatus>,
    /// today | upcoming | past | YYYY-MM-DD
    #[arg(long)]
    date: Option<DateScope>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    planbook_core::init_logging_from_config(&config)?;

    let now = cli.now.unwrap_or_else(|| Local::now().fixed_offset());
    let mut store = load_store(cli.data.as_deref())?;
    info!(
        "event=cli_run module=cli status=ok tasks={} notes={} meetings={}",
        store.tasks.len(),
        store.notes.len(),
        store.meetings.len()
    );

    match cli.command {
        Commands::Ping => {
            println!("planbook_core ping={}", planbook_core::ping());
            println!("planbook_core version={}", planbook_core::core_version());
        }
        Commands::Tasks(args) => {
            let filter = TaskFilter {
                search_text: args.search,
                priority: args.priority,
                category: args.category,
                status: args.status,
            };
            let tasks = TaskService::new(&mut store.tasks).list_tasks(&filter, &now)?;
            for task in &tasks {
                println!("{}", render::task_line(task, &now));
            }
        }
        Commands::Notes(args) => {
            let service = NoteService::new(&mut store.notes);
            if args.tags {
                for tag in service.list_tags()? {
                    println!("{tag}");
                }
            } else {
                let filter = NoteFilter {
                    search_text: args.search,
                    tag: args.tag,
                };
                for note in &service.list_notes(&filter)? {
                    println!("{}", render::note_line(note));
                }
            }
        }
        Commands::Meetings(args) => {
            let filter = MeetingFilter {
                search_text: args.search,
                status: args.status,
                date_scope: args.date,
            };
            let meetings =
                MeetingService::new(&mut store.meetings).list_meetings(&filter, &now)?;
            for meeting in &meetings {
                println!("{}", render::meeting_line(meeting, now.offset()));
            }
        }
        Commands::Dashboard => {
            let view = DashboardService::new(&store.tasks, &store.notes, &store.meetings)
                .overview(&now)?;
            print!("{}", render::dashboard(&view, &now));
        }
    }

    Ok(())
}

/// Seeded in-memory stores for one invocation.
struct Store {
    tasks: InMemoryRepository<Task>,
    notes: InMemoryRepository<Note>,
    meetings: InMemoryRepository<Meeting>,
}

fn load_store(path: Option<&Path>) -> Result<Store, Box<dyn Error>> {
    let snapshot = match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            serde_json::from_str::<WireSnapshot>(&contents)?
        }
        None => WireSnapshot::default(),
    };
    let decoded = snapshot.decode()?;
    Ok(Store {
        tasks: InMemoryRepository::from_records(decoded.tasks)?,
        notes: InMemoryRepository::from_records(decoded.notes)?,
        meetings: InMemoryRepository::from_records(decoded.meetings)?,
    })
}

/// Environment first, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<CoreConfig, Box<dyn Error>> {
    let mut config = CoreConfig::from_env()?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(absolute_log_dir(dir)?);
    }
    Ok(config)
}

/// Relative `--log-dir` values resolve against the working directory.
fn absolute_log_dir(dir: &Path) -> std::io::Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

fn parse_now(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value.trim())
}

#[cfg(test)]
mod tests {
    use super::{parse_now, Cli, Commands};
    use clap::Parser;

    #[test]
    fn now_flag_keeps_offset() {
        let now = parse_now("2026-06-15T10:00:00+09:00").unwrap();
        assert_eq!(now.offset().local_minus_utc(), 9 * 3600);
        assert!(parse_now("tomorrow").is_err());
    }

    #[test]
    fn parses_task_filters() {
        let cli = Cli::try_parse_from([
            "planbook",
            "tasks",
            "--priority",
            "high",
            "--status",
            "overdue",
            "--data",
            "snapshot.json",
        ])
        .unwrap();
        assert!(cli.data.is_some());
        match cli.command {
            Commands::Tasks(args) => {
                assert_eq!(args.priority, Some(planbook_core::Priority::High));
                assert_eq!(args.status, Some(planbook_core::EffectiveStatus::Overdue));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_date_scope() {
        assert!(Cli::try_parse_from(["planbook", "meetings", "--date", "someday"]).is_err());
    }
}
