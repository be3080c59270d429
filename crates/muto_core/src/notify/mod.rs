//! Reminder and notification plumbing.
//!
//! # Responsibility
//! - Define the platform notification capability (`center`).
//! - Translate task lifecycle changes into alert requests (`coordinator`).
//! - Provide a host-drained command queue implementation (`outbox`).
//!
//! # Invariants
//! - Notification failures never reach task store callers.
//! - At most one pending reminder exists per task ID.

pub mod center;
pub mod coordinator;
pub mod outbox;
