//! Notification center that queues commands for the host platform.
//!
//! # Responsibility
//! - Record accepted requests as ordered commands the host drains and applies.
//! - Mirror the net pending/delivered state for diagnostics and tests.
//! - Log host acknowledgements, which may arrive in any order.
//!
//! # Invariants
//! - Commands are drained in call order, so a cancel issued before a
//!   replacement schedule reaches the host first.
//! - `pending` holds at most one request per id and loses it once the host
//!   reports the reminder fired, failed or was cancelled.
//! - `delivered` only covers immediate alerts queued since the last drain.

use crate::notify::center::{
    NotificationCategory, NotificationCenter, NotificationError, NotificationRequest,
    NotificationResult,
};
use log::{debug, error};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One instruction for the host notification service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommand {
    RegisterCategories(Vec<NotificationCategory>),
    Schedule(NotificationRequest),
    Cancel(String),
    SendImmediate(NotificationRequest),
}

impl NotificationCommand {
    /// Notification id the command targets, when it has one.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::RegisterCategories(_) => None,
            Self::Schedule(request) | Self::SendImmediate(request) => Some(request.id.as_str()),
            Self::Cancel(id) => Some(id.as_str()),
        }
    }
}

#[derive(Debug, Default)]
struct OutboxState {
    outbox: VecDeque<NotificationCommand>,
    pending: BTreeMap<String, NotificationRequest>,
    delivered: Vec<NotificationRequest>,
    categories: Vec<NotificationCategory>,
}

/// Host-drained `NotificationCenter`.
#[derive(Debug)]
pub struct OutboxNotificationCenter {
    permission: bool,
    state: Mutex<OutboxState>,
}

impl OutboxNotificationCenter {
    /// Creates a center whose permission prompt answers `permission`.
    pub fn new(permission: bool) -> Self {
        Self {
            permission,
            state: Mutex::new(OutboxState::default()),
        }
    }

    pub fn granted() -> Self {
        Self::new(true)
    }

    pub fn denied() -> Self {
        Self::new(false)
    }

    /// Removes and returns all queued commands in call order.
    ///
    /// Immediate alerts handed over here are forgotten by `delivered()`.
    pub fn drain(&self) -> Vec<NotificationCommand> {
        let mut state = self.lock();
        state.delivered.clear();
        state.outbox.drain(..).collect()
    }

    /// Number of commands waiting to be drained.
    pub fn queued_len(&self) -> usize {
        self.lock().outbox.len()
    }

    /// Scheduled requests not yet cancelled, ordered by id.
    pub fn pending(&self) -> Vec<NotificationRequest> {
        self.lock().pending.values().cloned().collect()
    }

    pub fn pending_request(&self, id: &str) -> Option<NotificationRequest> {
        self.lock().pending.get(id).cloned()
    }

    /// Immediate alerts sent since the last drain, in send order.
    pub fn delivered(&self) -> Vec<NotificationRequest> {
        self.lock().delivered.clone()
    }

    pub fn categories(&self) -> Vec<NotificationCategory> {
        self.lock().categories.clone()
    }

    /// Records the host's answer for a previously drained command.
    ///
    /// A failed schedule is dropped from `pending` since it will never fire.
    pub fn acknowledge(&self, id: &str, result: Result<(), String>) {
        match result {
            Ok(()) => {
                debug!(
                    "event=notification_ack module=outbox status=ok notification_id={}",
                    id
                );
            }
            Err(message) => {
                self.lock().pending.remove(id);
                error!(
                    "event=notification_ack module=outbox status=error notification_id={} error={}",
                    id, message
                );
            }
        }
    }

    /// Records that the host presented a scheduled reminder.
    ///
    /// The request leaves `pending`; returns `false` when it was not there.
    pub fn mark_fired(&self, id: &str) -> bool {
        let removed = self.lock().pending.remove(id).is_some();
        debug!(
            "event=notification_fired module=outbox status=ok notification_id={} was_pending={}",
            id, removed
        );
        removed
    }

    fn lock(&self) -> MutexGuard<'_, OutboxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn require_permission(&self) -> NotificationResult<()> {
        if self.permission {
            Ok(())
        } else {
            Err(NotificationError::PermissionDenied)
        }
    }
}

impl NotificationCenter for OutboxNotificationCenter {
    fn request_permission(&self) -> NotificationResult<bool> {
        Ok(self.permission)
    }

    fn register_categories(&self, categories: &[NotificationCategory]) -> NotificationResult<()> {
        self.require_permission()?;
        let mut state = self.lock();
        state.categories = categories.to_vec();
        state
            .outbox
            .push_back(NotificationCommand::RegisterCategories(categories.to_vec()));
        Ok(())
    }

    fn schedule(&self, request: &NotificationRequest) -> NotificationResult<()> {
        self.require_permission()?;
        let mut state = self.lock();
        state.pending.insert(request.id.clone(), request.clone());
        state
            .outbox
            .push_back(NotificationCommand::Schedule(request.clone()));
        Ok(())
    }

    fn cancel(&self, id: &str) -> NotificationResult<()> {
        let mut state = self.lock();
        state.pending.remove(id);
        state
            .outbox
            .push_back(NotificationCommand::Cancel(id.to_string()));
        Ok(())
    }

    fn send_immediate(&self, request: &NotificationRequest) -> NotificationResult<()> {
        self.require_permission()?;
        let mut state = self.lock();
        state.delivered.push(request.clone());
        state
            .outbox
            .push_back(NotificationCommand::SendImmediate(request.clone()));
        Ok(())
    }
}
