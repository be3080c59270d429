//! Platform notification capability contract.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type NotificationResult<T> = Result<T, NotificationError>;

/// User-visible payload of one alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    /// Action category registered through `register_categories`.
    pub category: Option<String>,
    pub sound: bool,
}

/// When the platform should present an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTrigger {
    /// Absolute point in time, Unix epoch milliseconds. Past values are allowed.
    At { fire_at_ms: i64 },
    /// Relative to the moment the platform accepts the request.
    AfterDelay { seconds: u32 },
}

/// One-shot alert request keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub id: String,
    pub content: NotificationContent,
    pub trigger: NotificationTrigger,
}

/// Button attached to an alert category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub id: String,
    pub title: String,
    /// Bring the app to the foreground when chosen.
    pub opens_app: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCategory {
    pub id: String,
    pub actions: Vec<NotificationAction>,
}

/// Capability for scheduling, cancelling and presenting alerts.
///
/// Implementations may acknowledge asynchronously; callers never wait for
/// delivery. An `Ok` only means the request was accepted for dispatch.
pub trait NotificationCenter: Send + Sync {
    fn request_permission(&self) -> NotificationResult<bool>;
    fn register_categories(&self, categories: &[NotificationCategory]) -> NotificationResult<()>;
    /// Registers a one-shot alert; an existing request with the same id is replaced.
    fn schedule(&self, request: &NotificationRequest) -> NotificationResult<()>;
    /// Removes a pending alert. Unknown ids are not an error.
    fn cancel(&self, id: &str) -> NotificationResult<()>;
    fn send_immediate(&self, request: &NotificationRequest) -> NotificationResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    PermissionDenied,
    /// Backing service cannot be reached.
    Unavailable(String),
    /// Service refused the request.
    Rejected(String),
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "notification permission not granted"),
            Self::Unavailable(details) => write!(f, "notification service unavailable: {details}"),
            Self::Rejected(details) => write!(f, "notification request rejected: {details}"),
        }
    }
}

impl Error for NotificationError {}
