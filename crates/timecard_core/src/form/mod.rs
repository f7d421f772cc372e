//! Local form validation.
//!
//! # Responsibility
//! - Turn raw form input into validated host requests.
//! - Reject bad input before any host call is made.
//!
//! # Invariants
//! - Missing required fields are reported as `FormError::Missing`, distinct
//!   from malformed or inconsistent values.

pub mod admin_form;
pub mod event_form;

use crate::model::event::EventValidationError;
use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FormResult<T> = Result<T, FormError>;

/// Form validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Required field left empty or unselected.
    Missing(&'static str),
    /// Date field is not `YYYY-MM-DD`.
    InvalidDate { field: &'static str, value: String },
    /// Time field is not `HH:MM`.
    InvalidTime { field: &'static str, value: String },
    /// Hourly wage is not a non-negative decimal.
    InvalidWage(String),
    /// Range end precedes range start.
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    Event(EventValidationError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "`{field}` is required"),
            Self::InvalidDate { field, value } => {
                write!(f, "`{field}` must be a YYYY-MM-DD date, got `{value}`")
            }
            Self::InvalidTime { field, value } => {
                write!(f, "`{field}` must be an HH:MM time, got `{value}`")
            }
            Self::InvalidWage(value) => {
                write!(f, "hourly wage must be a non-negative number, got `{value}`")
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "end date ({end}) must not be before start date ({start})")
            }
            Self::Event(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Event(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EventValidationError> for FormError {
    fn from(value: EventValidationError) -> Self {
        Self::Event(value)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> FormResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(trimmed)
}

fn parse_date(field: &'static str, value: &str) -> FormResult<NaiveDate> {
    let trimmed = required(field, value)?;
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| FormError::InvalidDate {
        field,
        value: trimmed.to_string(),
    })
}

fn parse_time(field: &'static str, value: &str) -> FormResult<NaiveTime> {
    let trimmed = required(field, value)?;
    NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| FormError::InvalidTime {
        field,
        value: trimmed.to_string(),
    })
}
