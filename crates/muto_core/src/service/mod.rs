//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository mutations and reminder side effects.
//! - Keep UI/FFI layers decoupled from storage and notification details.

pub mod task_store;
