//! Domain model shared by the attendance, admin and calendar views.
//!
//! # Responsibility
//! - Define the payload shapes exchanged with the host API.
//! - Enforce value invariants (event windows, status names) at construction
//!   and deserialization time.
//!
//! # Invariants
//! - Identifiers are host-assigned and never generated in core.
//! - A `CalendarEvent` never has `end < start`.

pub mod attendance;
pub mod employee;
pub mod event;
pub mod summary;

use serde::{Deserialize, Deserializer};

/// Accepts SQLite-style `0`/`1` integers as well as JSON booleans.
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Int(value)) => value != 0,
        None => false,
    })
}
