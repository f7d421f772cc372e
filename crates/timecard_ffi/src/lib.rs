//! Flutter-facing bridge over `timecard_core`.

pub mod api;
