//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose task store operations to Dart via FRB.
//! - Hand queued notification commands to the host and accept its acks.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One task session exists per process; it is created by
//!   `init_task_session` and never replaced.
//! - Unknown task IDs are successful no-ops, mirroring core semantics.

use log::info;
use muto_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    parse_reminder_action, parse_task_color, ping as ping_inner, InMemoryTaskRepository, NewTask,
    NotificationCommand, NotificationRequest, NotificationTrigger, OutboxNotificationCenter,
    ReminderCoordinator, ReminderSettings, Task, TaskId, TaskStore,
};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

static SESSION: OnceLock<Mutex<TaskSession>> = OnceLock::new();

struct TaskSession {
    store: TaskStore<InMemoryTaskRepository>,
    center: Arc<OutboxNotificationCenter>,
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Creates the process task session.
///
/// Input semantics:
/// - `permission_granted`: answer of the platform permission prompt.
/// - `settings_json`: optional `ReminderSettings` JSON; missing fields use defaults.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
/// - A second call returns an error and keeps the existing session.
#[flutter_rust_bridge::frb(sync)]
pub fn init_task_session(permission_granted: bool, settings_json: Option<String>) -> String {
    let settings = match settings_json.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match ReminderSettings::from_json(raw) {
            Ok(settings) => settings,
            Err(err) => return err.to_string(),
        },
        _ => ReminderSettings::default(),
    };

    let mut created = false;
    SESSION.get_or_init(|| {
        created = true;
        let center = Arc::new(OutboxNotificationCenter::new(permission_granted));
        let coordinator = Arc::new(ReminderCoordinator::new(center.clone(), settings));
        coordinator.request_permission();
        Mutex::new(TaskSession {
            store: TaskStore::in_memory(coordinator),
            center,
        })
    });

    if created {
        info!(
            "event=task_session_init module=ffi status=ok permission_granted={}",
            permission_granted
        );
        String::new()
    } else {
        "task session already initialized".to_string()
    }
}

/// Task snapshot rendered by the host lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub title: String,
    pub description: String,
    /// `red|orange|green|blue`.
    pub color: String,
    pub image: Option<String>,
    pub is_completed: bool,
    pub reminder_at_ms: Option<i64>,
}

/// Generic action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the call was accepted. Unknown IDs still report `true`.
    pub ok: bool,
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: TaskId) -> Self {
        Self {
            ok: true,
            task_id: Some(task_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Notification instruction for the host platform service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCommandItem {
    /// `register_categories|schedule|cancel|send_immediate`.
    pub kind: String,
    pub notification_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub fire_at_ms: Option<i64>,
    pub delay_secs: Option<u32>,
    /// Category action ids, `register_categories` only.
    pub action_ids: Vec<String>,
}

/// Adds a task; `reminder_at_ms` schedules its reminder.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(
    title: String,
    description: String,
    color: String,
    image: Option<String>,
    reminder_at_ms: Option<i64>,
) -> TaskActionResponse {
    let color = match parse_task_color(color.as_str()) {
        Ok(color) => color,
        Err(err) => return TaskActionResponse::failure(format!("task_add failed: {err}")),
    };
    let request = NewTask {
        title,
        description,
        color,
        image,
        reminder_at: reminder_at_ms,
    };
    with_session(|session| match session.store.add_task(request) {
        Ok(task_id) => TaskActionResponse::success("Task created.", task_id),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    })
}

/// Toggles completion for one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> TaskActionResponse {
    with_task_id(task_id.as_str(), "task_toggle", |session, id| {
        match session.store.toggle_completion(id) {
            Some(true) => TaskActionResponse::success("Task completed.", id),
            Some(false) => TaskActionResponse::success("Task reactivated.", id),
            None => TaskActionResponse::success("No change.", id),
        }
    })
}

/// Replaces title and description of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(task_id: String, title: String, description: String) -> TaskActionResponse {
    with_task_id(task_id.as_str(), "task_update", |session, id| {
        if session.store.update_task(id, title, description) {
            TaskActionResponse::success("Task updated.", id)
        } else {
            TaskActionResponse::success("No change.", id)
        }
    })
}

/// Deletes one task and cancels its reminder.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task_id: String) -> TaskActionResponse {
    with_task_id(task_id.as_str(), "task_delete", |session, id| {
        match session.store.delete_task(id) {
            Some(_) => TaskActionResponse::success("Task deleted.", id),
            None => TaskActionResponse::success("No change.", id),
        }
    })
}

/// Applies the action chosen on a delivered reminder (`COMPLETE_TASK`).
#[flutter_rust_bridge::frb(sync)]
pub fn task_reminder_action(task_id: String, action_id: String) -> TaskActionResponse {
    let action = match parse_reminder_action(action_id.as_str()) {
        Ok(action) => action,
        Err(err) => {
            return TaskActionResponse::failure(format!("task_reminder_action failed: {err}"))
        }
    };
    with_task_id(task_id.as_str(), "task_reminder_action", |session, id| {
        if session.store.handle_reminder_action(id, action) {
            TaskActionResponse::success("Reminder action applied.", id)
        } else {
            TaskActionResponse::success("No change.", id)
        }
    })
}

/// Active tasks in insertion order. Empty before session init.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list_active() -> Vec<TaskItem> {
    read_session(|session| session.store.active_tasks().map(to_task_item).collect())
}

/// Completed tasks in insertion order. Empty before session init.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list_completed() -> Vec<TaskItem> {
    read_session(|session| session.store.completed_tasks().map(to_task_item).collect())
}

/// Removes queued notification commands in call order.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_drain() -> Vec<NotificationCommandItem> {
    read_session(|session| {
        session
            .center
            .drain()
            .into_iter()
            .map(to_command_item)
            .collect()
    })
}

/// Reports the platform result of one drained command.
///
/// `error = None` means the platform accepted it.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_ack(notification_id: String, error: Option<String>) {
    let result = match error {
        Some(message) => Err(message),
        None => Ok(()),
    };
    read_session(|session| {
        session
            .center
            .acknowledge(notification_id.as_str(), result)
    });
}

/// Reports that the platform presented a scheduled reminder.
///
/// Returns `false` when nothing was pending under `notification_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_fired(notification_id: String) -> bool {
    read_session(|session| session.center.mark_fired(notification_id.as_str()))
}

fn with_session(f: impl FnOnce(&mut TaskSession) -> TaskActionResponse) -> TaskActionResponse {
    match SESSION.get() {
        Some(session) => {
            let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        }
        None => TaskActionResponse::failure("task session not initialized"),
    }
}

fn with_task_id(
    raw_id: &str,
    operation: &str,
    f: impl FnOnce(&mut TaskSession, TaskId) -> TaskActionResponse,
) -> TaskActionResponse {
    let id = match TaskId::parse_str(raw_id.trim()) {
        Ok(id) => id,
        Err(_) => {
            return TaskActionResponse::failure(format!(
                "{operation} failed: invalid task id `{raw_id}`"
            ))
        }
    };
    with_session(|session| f(session, id))
}

fn read_session<T: Default>(f: impl FnOnce(&TaskSession) -> T) -> T {
    match SESSION.get() {
        Some(session) => {
            let guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            f(&guard)
        }
        None => T::default(),
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        task_id: task.id.to_string(),
        title: task.title.clone(),
        description: task.description.clone(),
        color: task.color.as_str().to_string(),
        image: task.image.clone(),
        is_completed: task.is_completed,
        reminder_at_ms: task.reminder_at,
    }
}

fn to_command_item(command: NotificationCommand) -> NotificationCommandItem {
    let empty = NotificationCommandItem {
        kind: String::new(),
        notification_id: None,
        title: None,
        body: None,
        category: None,
        fire_at_ms: None,
        delay_secs: None,
        action_ids: Vec::new(),
    };
    match command {
        NotificationCommand::RegisterCategories(categories) => NotificationCommandItem {
            kind: "register_categories".to_string(),
            category: categories.first().map(|category| category.id.clone()),
            action_ids: categories
                .iter()
                .flat_map(|category| category.actions.iter().map(|action| action.id.clone()))
                .collect(),
            ..empty
        },
        NotificationCommand::Cancel(id) => NotificationCommandItem {
            kind: "cancel".to_string(),
            notification_id: Some(id),
            ..empty
        },
        NotificationCommand::Schedule(request) => request_item("schedule", request, empty),
        NotificationCommand::SendImmediate(request) => {
            request_item("send_immediate", request, empty)
        }
    }
}

fn request_item(
    kind: &str,
    request: NotificationRequest,
    empty: NotificationCommandItem,
) -> NotificationCommandItem {
    let (fire_at_ms, delay_secs) = match request.trigger {
        NotificationTrigger::At { fire_at_ms } => (Some(fire_at_ms), None),
        NotificationTrigger::AfterDelay { seconds } => (None, Some(seconds)),
    };
    NotificationCommandItem {
        kind: kind.to_string(),
        notification_id: Some(request.id),
        title: Some(request.content.title),
        body: Some(request.content.body),
        category: request.content.category,
        fire_at_ms,
        delay_secs,
        ..empty
    }
}
