//! Core domain logic for MUTO.
//! This crate is the single source of truth for task and reminder invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use config::{ReminderSettings, SettingsError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    parse_task_color, ImageRef, NewTask, Task, TaskColor, TaskColorParseError, TaskId,
    TaskValidationError,
};
pub use notify::center::{
    NotificationAction, NotificationCategory, NotificationCenter, NotificationContent,
    NotificationError, NotificationRequest, NotificationResult, NotificationTrigger,
};
pub use notify::coordinator::{DispatchOutcome, ReminderCoordinator};
pub use notify::outbox::{NotificationCommand, OutboxNotificationCenter};
pub use repo::task_repo::{InMemoryTaskRepository, TaskRepository};
pub use service::task_store::{
    parse_reminder_action, ReminderAction, ReminderActionParseError, TaskStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
