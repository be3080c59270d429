//! Task store use-case service.
//!
//! # Responsibility
//! - Own the ordered task collection and its completion state.
//! - Drive reminder scheduling, cancellation and completion alerts.
//! - Derive the active/completed projections on every read.
//!
//! # Invariants
//! - Unknown task IDs are silent no-ops, never errors.
//! - Completing a task cancels its reminder before the completion alert is sent.
//! - Deleting a task cancels its reminder before the task is removed.
//! - Re-activating a completed task has no notification side effects.
//! - Notification outcomes never change the result of a mutation.

use crate::model::task::{NewTask, Task, TaskId, TaskValidationError};
use crate::notify::coordinator::{ReminderCoordinator, ACTION_COMPLETE_TASK};
use crate::repo::task_repo::{InMemoryTaskRepository, TaskRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Response chosen by the user on a delivered reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    /// "Mark as Complete".
    Complete,
}

/// Parses a platform action identifier.
pub fn parse_reminder_action(value: &str) -> Result<ReminderAction, ReminderActionParseError> {
    match value.trim() {
        ACTION_COMPLETE_TASK => Ok(ReminderAction::Complete),
        other => Err(ReminderActionParseError(other.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderActionParseError(pub String);

impl Display for ReminderActionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported reminder action: {}", self.0)
    }
}

impl Error for ReminderActionParseError {}

/// Single-owner task collection with reminder coordination.
///
/// Mutators take `&mut self`; callers serialize access on one context.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    reminders: Arc<ReminderCoordinator>,
}

impl TaskStore<InMemoryTaskRepository> {
    /// Creates an empty volatile store.
    pub fn in_memory(reminders: Arc<ReminderCoordinator>) -> Self {
        Self::new(InMemoryTaskRepository::new(), reminders)
    }
}

impl<R: TaskRepository> TaskStore<R> {
    pub fn new(repo: R, reminders: Arc<ReminderCoordinator>) -> Self {
        Self { repo, reminders }
    }

    /// Shared reminder coordinator handle.
    pub fn reminders(&self) -> &Arc<ReminderCoordinator> {
        &self.reminders
    }

    /// Appends a new active task and schedules its reminder when requested.
    ///
    /// # Errors
    /// - `TaskValidationError::EmptyTitle` when the title is blank; nothing is
    ///   stored and no reminder is scheduled.
    pub fn add_task(&mut self, request: NewTask) -> Result<TaskId, TaskValidationError> {
        if let Err(err) = request.validate() {
            warn!(
                "event=task_add module=task_store status=rejected reason={}",
                err
            );
            return Err(err);
        }

        let task = Task::new(request);
        let id = task.id;
        if let Some(when) = task.reminder_at {
            self.reminders.schedule(id, &task.title, task.color, when);
        }
        info!(
            "event=task_add module=task_store status=ok task_id={} has_reminder={}",
            id,
            task.reminder_at.is_some()
        );
        self.repo.insert(task);
        Ok(id)
    }

    /// Flips completion state and returns the new value.
    ///
    /// Returns `None` for an unknown ID.
    pub fn toggle_completion(&mut self, id: TaskId) -> Option<bool> {
        let task = self.repo.get_mut(id)?;
        if task.is_completed {
            task.is_completed = false;
        } else {
            complete(&self.reminders, task);
        }
        info!(
            "event=task_toggle module=task_store status=ok task_id={} completed={}",
            id, task.is_completed
        );
        Some(task.is_completed)
    }

    /// Replaces title and description only.
    ///
    /// Returns `false` for an unknown ID.
    pub fn update_task(
        &mut self,
        id: TaskId,
        new_title: impl Into<String>,
        new_description: impl Into<String>,
    ) -> bool {
        let Some(task) = self.repo.get_mut(id) else {
            return false;
        };
        task.title = new_title.into();
        task.description = new_description.into();
        info!(
            "event=task_update module=task_store status=ok task_id={}",
            id
        );
        true
    }

    /// Cancels the task's reminder, then removes it.
    ///
    /// Returns the removed task, or `None` for an unknown ID.
    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        self.repo.get(id)?;
        self.reminders.cancel(id);
        let removed = self.repo.remove(id);
        info!(
            "event=task_delete module=task_store status=ok task_id={}",
            id
        );
        removed
    }

    /// Applies a reminder action chosen by the user.
    ///
    /// Returns `true` when the task changed. Completed or unknown tasks are
    /// left untouched; the reminder is never moved to a new time.
    pub fn handle_reminder_action(&mut self, id: TaskId, action: ReminderAction) -> bool {
        let Some(task) = self.repo.get_mut(id) else {
            return false;
        };
        if task.is_completed {
            return false;
        }

        match action {
            ReminderAction::Complete => complete(&self.reminders, task),
        }
        info!(
            "event=reminder_action module=task_store status=ok task_id={} action={:?}",
            id, action
        );
        true
    }

    /// Tasks not yet completed, in insertion order.
    pub fn active_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.repo.list().iter().filter(|task| !task.is_completed)
    }

    /// Completed tasks, in insertion order.
    pub fn completed_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.repo.list().iter().filter(|task| task.is_completed)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        self.repo.list()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.repo.get(id)
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }
}

fn complete(reminders: &ReminderCoordinator, task: &mut Task) {
    task.is_completed = true;
    reminders.cancel(task.id);
    reminders.notify_completed(task.id, &task.title);
}
