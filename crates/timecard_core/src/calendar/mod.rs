//! Calendar view logic.
//!
//! # Responsibility
//! - Build the 42-day month grid with per-day event listings.
//! - Track which month is displayed and the date range to fetch for it.
//!
//! # Invariants
//! - Event-to-day matching uses the inclusive day-span rule from
//!   `CalendarEvent::covers` everywhere.

pub mod cursor;
pub mod grid;
