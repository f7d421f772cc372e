//! Calendar event fetching and mutation.

use crate::calendar::cursor::MonthCursor;
use crate::error::UiResult;
use crate::form::event_form::EventForm;
use crate::host::api::HostApi;
use crate::model::event::{CalendarEvent, EventId};
use log::{debug, info};
use std::sync::Arc;

pub struct CalendarService<H: HostApi> {
    host: Arc<H>,
}

impl<H: HostApi> CalendarService<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// Events overlapping the 42-day grid of `cursor`'s month.
    pub async fn events_for(&self, cursor: MonthCursor) -> UiResult<Vec<CalendarEvent>> {
        let events = self
            .host
            .get_events_for_month(cursor.year(), cursor.month())
            .await
            .into_result()?;
        debug!(
            "event=events_load module=calendar status=ok month={} count={}",
            cursor.label(),
            events.len()
        );
        Ok(events)
    }

    pub async fn create(&self, form: &EventForm) -> UiResult<EventId> {
        let draft = form.validate()?;
        let id = self.host.add_event(&draft).await.into_result()?;
        info!(
            "event=event_create module=calendar status=ok event_id={id} all_day={}",
            draft.all_day
        );
        Ok(id)
    }

    pub async fn update(&self, id: EventId, form: &EventForm) -> UiResult<()> {
        let draft = form.validate()?;
        self.host.update_event(id, &draft).await.into_ack()?;
        info!("event=event_update module=calendar status=ok event_id={id}");
        Ok(())
    }

    pub async fn delete(&self, id: EventId) -> UiResult<()> {
        self.host.delete_event(id).await.into_ack()?;
        info!("event=event_delete module=calendar status=ok event_id={id}");
        Ok(())
    }
}
