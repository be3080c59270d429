//! Task domain model.
//!
//! # Responsibility
//! - Define the task record, its color tag and the creation request.
//! - Reject creation input the store must never accept.
//!
//! # Invariants
//! - `id` is generated once and never reassigned.
//! - A freshly created task is never completed.
//! - `reminder_at` is kept after the reminder fires or is cancelled, so it
//!   does not say whether a reminder is still pending.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Opaque reference to an attached image. The core never interprets it.
pub type ImageRef = String;

/// Visual grouping tag picked when the task is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskColor {
    Red,
    Orange,
    Green,
    Blue,
}

impl TaskColor {
    /// All color tags in picker order.
    pub const ALL: [TaskColor; 4] = [Self::Red, Self::Orange, Self::Green, Self::Blue];

    /// Lowercase name, also used inside reminder text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl Display for TaskColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one color tag from its lowercase name.
pub fn parse_task_color(value: &str) -> Result<TaskColor, TaskColorParseError> {
    let normalized = value.trim();
    TaskColor::ALL
        .into_iter()
        .find(|color| color.as_str() == normalized)
        .ok_or_else(|| TaskColorParseError(normalized.to_string()))
}

/// Unknown color tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskColorParseError(pub String);

impl Display for TaskColorParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported task color `{}`; expected red|orange|green|blue",
            self.0
        )
    }
}

impl Error for TaskColorParseError {}

/// Creation-time validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Input for creating one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub color: TaskColor,
    pub image: Option<ImageRef>,
    /// Unix epoch milliseconds.
    pub reminder_at: Option<i64>,
}

impl NewTask {
    /// Creates a request without image or reminder.
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: TaskColor) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            image: None,
            reminder_at: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<ImageRef>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_reminder_at(mut self, reminder_at_ms: i64) -> Self {
        self.reminder_at = Some(reminder_at_ms);
        self
    }

    /// Checks creation invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// One user-created to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub color: TaskColor,
    pub image: Option<ImageRef>,
    pub is_completed: bool,
    /// Unix epoch milliseconds. Kept after the reminder fired or was cancelled.
    pub reminder_at: Option<i64>,
}

impl Task {
    /// Builds an active task with a fresh ID.
    ///
    /// Does not validate; callers go through `NewTask::validate()` first.
    pub fn new(request: NewTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            color: request.color,
            image: request.image,
            is_completed: false,
            reminder_at: request.reminder_at,
        }
    }
}
