//! Event editor form.

use crate::form::{parse_date, parse_time, required, FormError, FormResult};
use crate::model::event::{CalendarEvent, EventDraft};
use chrono::NaiveDate;

/// Raw event editor input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub start_time: String,
    /// Empty means same day as `start_date`.
    pub end_date: String,
    pub end_time: String,
    pub all_day: bool,
}

impl EventForm {
    /// Blank all-day form for a clicked day.
    pub fn for_date(date: NaiveDate) -> Self {
        let day = date.format("%Y-%m-%d").to_string();
        Self {
            start_date: day.clone(),
            end_date: day,
            all_day: true,
            ..Self::default()
        }
    }

    /// Form prefilled from an existing event for editing.
    pub fn from_event(event: &CalendarEvent) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            start_date: event.start.format("%Y-%m-%d").to_string(),
            start_time: event.start.format("%H:%M").to_string(),
            end_date: event.end.format("%Y-%m-%d").to_string(),
            end_time: event.end.format("%H:%M").to_string(),
            all_day: event.all_day,
        }
    }

    /// Validates input into a host draft.
    ///
    /// All-day events ignore the time fields and get start-of-day/end-of-day
    /// instants.
    pub fn validate(&self) -> FormResult<EventDraft> {
        let title = required("title", &self.title)?;
        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = if self.end_date.trim().is_empty() {
            start_date
        } else {
            parse_date("end_date", &self.end_date)?
        };
        if end_date < start_date {
            return Err(FormError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }

        let draft = if self.all_day {
            EventDraft::all_day(title, start_date, end_date)
        } else {
            let start_time = parse_time("start_time", &self.start_time)?;
            let end_time = parse_time("end_time", &self.end_time)?;
            EventDraft::timed(
                title,
                start_date.and_time(start_time),
                end_date.and_time(end_time),
            )
        };
        let draft = draft.with_description(self.description.trim());

        draft.validate()?;
        Ok(draft)
    }
}
