//! Core domain logic for Planbook.
//! This crate is the single source of truth for record invariants and for
//! the list/dashboard views derived from record collections.

pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use config::{default_log_level, ConfigError, CoreConfig, LogLevel};
pub use logging::{init_logging, init_logging_from_config, logging_status, LoggingError};
pub use model::meeting::{Meeting, MeetingDraft, MeetingStatus, DEFAULT_MEETING_DURATION_MINUTES};
pub use model::note::{Note, NoteDraft};
pub use model::record::{Entity, ParseTokenError, RecordId, Timestamp, ValidationError};
pub use model::task::{priority_rank, Category, EffectiveStatus, Priority, Task, TaskDraft};
pub use query::dashboard::{summarize_dashboard, DashboardSummary, Greeting};
pub use query::meetings::{filter_meetings, DateScope, DateScopeParseError, MeetingFilter};
pub use query::notes::{all_tags, filter_notes, NoteFilter};
pub use query::tasks::{filter_tasks, TaskFilter};
pub use repo::memory_repo::InMemoryRepository;
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult};
pub use repo::wire::{DecodedSnapshot, WireError, WireSnapshot};
pub use service::dashboard_service::{DashboardService, DashboardView};
pub use service::error::{ServiceError, ServiceResult};
pub use service::meeting_service::MeetingService;
pub use service::note_service::NoteService;
pub use service::task_service::TaskService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
