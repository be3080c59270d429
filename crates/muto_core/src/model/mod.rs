//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the task record rendered by the active/completed projections.
//! - Keep creation-time validation next to the data it guards.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` for the process lifetime.
//! - Completion state lives on the task; projections are derived, never stored.

pub mod task;
