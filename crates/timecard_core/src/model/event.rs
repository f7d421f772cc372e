//! Calendar event model.
//!
//! # Responsibility
//! - Define the canonical event record returned by the host.
//! - Define the draft shape sent to the host on create/update.
//! - Own the day-coverage rule used by the month grid.
//!
//! # Invariants
//! - `end` is never earlier than `start`.
//! - All-day drafts span `00:00:00` of the first day to `23:59:59` of the
//!   last day.
//! - An event covers every calendar date from `start.date()` through
//!   `end.date()` inclusive.

use crate::model::deserialize_flag;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Host-assigned event identifier.
pub type EventId = i64;

/// Validation failures for event records and drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// `end` is earlier than `start`.
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "event title cannot be empty"),
            Self::InvalidWindow { start, end } => {
                write!(f, "event end ({end}) must be >= event start ({start})")
            }
        }
    }
}

impl Error for EventValidationError {}

/// Event as stored and returned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CalendarEventRecord")]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "start_datetime")]
    pub start: NaiveDateTime,
    #[serde(rename = "end_datetime")]
    pub end: NaiveDateTime,
    #[serde(rename = "is_allday")]
    pub all_day: bool,
}

/// Unchecked wire shape; converted through `CalendarEvent::validate`.
#[derive(Deserialize)]
struct CalendarEventRecord {
    id: EventId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    start_datetime: NaiveDateTime,
    end_datetime: NaiveDateTime,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_allday: bool,
}

impl TryFrom<CalendarEventRecord> for CalendarEvent {
    type Error = EventValidationError;

    fn try_from(record: CalendarEventRecord) -> Result<Self, Self::Error> {
        let event = Self {
            id: record.id,
            title: record.title,
            description: record.description,
            start: record.start_datetime,
            end: record.end_datetime,
            all_day: record.is_allday,
        };
        event.validate()?;
        Ok(event)
    }
}

impl CalendarEvent {
    /// Builds a validated event from an id and a draft.
    pub fn from_draft(id: EventId, draft: EventDraft) -> Result<Self, EventValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            start: draft.start,
            end: draft.end,
            all_day: draft.all_day,
        })
    }

    /// Checks the time window.
    ///
    /// Titles are not checked here: the host is the source of truth for
    /// persisted records and may carry legacy empty titles.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.end < self.start {
            return Err(EventValidationError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Returns whether this event is listed on `date`.
    ///
    /// Day granularity: the time of day is ignored on both ends.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date <= self.end_date()
    }

    pub fn is_multi_day(&self) -> bool {
        self.start_date() != self.end_date()
    }

    /// Ordering used inside one grid cell: all-day first, then start, then id.
    pub fn display_order(&self, other: &Self) -> Ordering {
        other
            .all_day
            .cmp(&self.all_day)
            .then(self.start.cmp(&other.start))
            .then(self.id.cmp(&other.id))
    }

    /// Returns the draft that would recreate this event.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            start: self.start,
            end: self.end,
            all_day: self.all_day,
        }
    }
}

/// Create/update payload sent to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "start_datetime")]
    pub start: NaiveDateTime,
    #[serde(rename = "end_datetime")]
    pub end: NaiveDateTime,
    #[serde(rename = "is_allday")]
    pub all_day: bool,
}

impl EventDraft {
    /// Creates a timed draft.
    pub fn timed(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            start,
            end,
            all_day: false,
        }
    }

    /// Creates an all-day draft with synthetic start-of-day/end-of-day instants.
    pub fn all_day(title: impl Into<String>, first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: None,
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(end_of_day()),
            all_day: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }

    /// Validates title and window before any host call.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.end < self.start {
            return Err(EventValidationError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Last representable second of a day, used for all-day event ends.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}
