//! Reminder coordinator between task lifecycle and the notification center.
//!
//! # Responsibility
//! - Build reminder and completion alerts for tasks.
//! - Gate alert delivery on the permission answer obtained at startup.
//! - Log notification failures instead of returning them.
//!
//! # Invariants
//! - Reminder requests are keyed by the task ID; completion alerts by
//!   `<task_id>-completion`, so the two never collide.
//! - `cancel` is dispatched regardless of the permission gate.

use crate::config::ReminderSettings;
use crate::model::task::{TaskColor, TaskId};
use crate::notify::center::{
    NotificationAction, NotificationCategory, NotificationCenter, NotificationContent,
    NotificationRequest, NotificationTrigger,
};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const COMPLETION_ID_SUFFIX: &str = "-completion";
const REMINDER_TITLE: &str = "Task Reminder";
const COMPLETION_TITLE: &str = "Task Completed";
/// Action identifier for completing a task straight from its reminder.
pub const ACTION_COMPLETE_TASK: &str = "COMPLETE_TASK";

/// What happened to one dispatch attempt. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handed to the notification center.
    Dispatched,
    /// Not attempted because permission is not granted.
    Skipped,
    /// The notification center returned an error; it was logged.
    Failed,
}

/// Shared reminder collaborator of the task store.
pub struct ReminderCoordinator {
    center: Arc<dyn NotificationCenter>,
    settings: ReminderSettings,
    permission_granted: AtomicBool,
}

impl ReminderCoordinator {
    /// Creates a coordinator with a closed permission gate.
    pub fn new(center: Arc<dyn NotificationCenter>, settings: ReminderSettings) -> Self {
        Self {
            center,
            settings,
            permission_granted: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &ReminderSettings {
        &self.settings
    }

    pub fn permission_granted(&self) -> bool {
        self.permission_granted.load(Ordering::Acquire)
    }

    /// Asks the platform for alert permission and registers reminder actions.
    ///
    /// Returns the stored gate value. Errors leave the gate closed.
    pub fn request_permission(&self) -> bool {
        let granted = match self.center.request_permission() {
            Ok(granted) => granted,
            Err(err) => {
                error!(
                    "event=notification_permission module=reminder status=error error={}",
                    err
                );
                false
            }
        };
        self.permission_granted.store(granted, Ordering::Release);
        info!(
            "event=notification_permission module=reminder status=ok granted={}",
            granted
        );

        if granted {
            let categories = [reminder_category(&self.settings)];
            if let Err(err) = self.center.register_categories(&categories) {
                error!(
                    "event=notification_categories module=reminder status=error error={}",
                    err
                );
            }
        }
        granted
    }

    /// Schedules the one-shot reminder for a task, replacing any previous one.
    pub fn schedule(
        &self,
        task_id: TaskId,
        title: &str,
        color: TaskColor,
        fire_at_ms: i64,
    ) -> DispatchOutcome {
        if !self.permission_granted() {
            warn!(
                "event=reminder_schedule module=reminder status=skipped reason=permission task_id={}",
                task_id
            );
            return DispatchOutcome::Skipped;
        }

        let request = NotificationRequest {
            id: reminder_id(task_id),
            content: NotificationContent {
                title: REMINDER_TITLE.to_string(),
                body: format!("Have you completed your {color} task: {title}?"),
                category: Some(self.settings.category_id.clone()),
                sound: true,
            },
            trigger: NotificationTrigger::At { fire_at_ms },
        };
        match self.center.schedule(&request) {
            Ok(()) => {
                debug!(
                    "event=reminder_schedule module=reminder status=ok task_id={} fire_at_ms={}",
                    task_id, fire_at_ms
                );
                DispatchOutcome::Dispatched
            }
            Err(err) => {
                error!(
                    "event=reminder_schedule module=reminder status=error task_id={} error={}",
                    task_id, err
                );
                DispatchOutcome::Failed
            }
        }
    }

    /// Removes any pending reminder for the task. Safe when none exists.
    pub fn cancel(&self, task_id: TaskId) -> DispatchOutcome {
        match self.center.cancel(&reminder_id(task_id)) {
            Ok(()) => {
                debug!(
                    "event=reminder_cancel module=reminder status=ok task_id={}",
                    task_id
                );
                DispatchOutcome::Dispatched
            }
            Err(err) => {
                error!(
                    "event=reminder_cancel module=reminder status=error task_id={} error={}",
                    task_id, err
                );
                DispatchOutcome::Failed
            }
        }
    }

    /// Presents the short-delay "task completed" alert.
    pub fn notify_completed(&self, task_id: TaskId, title: &str) -> DispatchOutcome {
        if !self.permission_granted() {
            warn!(
                "event=completion_notify module=reminder status=skipped reason=permission task_id={}",
                task_id
            );
            return DispatchOutcome::Skipped;
        }

        let request = NotificationRequest {
            id: completion_id(task_id),
            content: NotificationContent {
                title: COMPLETION_TITLE.to_string(),
                body: format!("{title} has been moved to completed tasks"),
                category: None,
                sound: true,
            },
            trigger: NotificationTrigger::AfterDelay {
                seconds: self.settings.completion_delay_secs,
            },
        };
        match self.center.send_immediate(&request) {
            Ok(()) => {
                debug!(
                    "event=completion_notify module=reminder status=ok task_id={}",
                    task_id
                );
                DispatchOutcome::Dispatched
            }
            Err(err) => {
                error!(
                    "event=completion_notify module=reminder status=error task_id={} error={}",
                    task_id, err
                );
                DispatchOutcome::Failed
            }
        }
    }
}

/// Notification key of a task's scheduled reminder.
pub fn reminder_id(task_id: TaskId) -> String {
    task_id.to_string()
}

/// Notification key of a task's completion alert.
pub fn completion_id(task_id: TaskId) -> String {
    format!("{task_id}{COMPLETION_ID_SUFFIX}")
}

fn reminder_category(settings: &ReminderSettings) -> NotificationCategory {
    NotificationCategory {
        id: settings.category_id.clone(),
        actions: vec![NotificationAction {
            id: ACTION_COMPLETE_TASK.to_string(),
            title: "Mark as Complete".to_string(),
            opens_app: true,
        }],
    }
}
