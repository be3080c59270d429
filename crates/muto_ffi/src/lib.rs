//! Flutter-facing bindings for MUTO core.

pub mod api;
