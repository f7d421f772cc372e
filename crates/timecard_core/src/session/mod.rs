//! Session-scoped UI state.
//!
//! # Responsibility
//! - Terminate idle sessions through the inactivity observer.
//! - Track the active view and per-view one-time setup.
//!
//! # Invariants
//! - Only one inactivity observer is alive per session.
//! - Entering the login view always stops idle observation.

pub mod timer;
pub mod view;
