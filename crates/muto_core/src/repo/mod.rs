//! Repository layer abstractions.
//!
//! # Responsibility
//! - Own the ordered task collection behind a small data-access contract.
//! - Keep notification side effects out of storage code.
//!
//! # Invariants
//! - Repositories never validate and never call the notification layer.
//! - Insertion order is the display order.

pub mod task_repo;
