//! Use-case services over the host API.
//!
//! # Responsibility
//! - Validate input locally, then delegate to `HostApi`.
//! - Convert host replies and form failures into `UiError`.
//!
//! # Invariants
//! - Invalid input never reaches the host.
//! - Services hold no UI state; `AppController` owns all of it.

pub mod admin_service;
pub mod app_controller;
pub mod calendar_service;
pub mod session_service;
