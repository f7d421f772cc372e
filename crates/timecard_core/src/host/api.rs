//! Host API contract.

use crate::calendar::cursor::MonthCursor;
use crate::host::HostReply;
use crate::model::attendance::{AttendanceKind, UserStatus};
use crate::model::employee::{Employee, EmployeeId, NewEmployee, SessionUser};
use crate::model::event::{CalendarEvent, EventDraft, EventId};
use crate::model::summary::{AttendanceSummary, SummaryQuery};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Asynchronous host calls backing the UI.
///
/// The host owns authentication, persistence and wage computation. Calls that
/// need a session or admin rights are rejected by the host itself as well;
/// the controller only avoids issuing them.
#[async_trait]
pub trait HostApi: Send + Sync {
    async fn login(&self, name: &str, password: &str) -> HostReply<SessionUser>;
    async fn logout(&self) -> HostReply<()>;

    async fn record_attendance(&self, kind: AttendanceKind) -> HostReply<()>;
    /// `logged_out` when the host has no session.
    async fn get_user_status(&self) -> HostReply<UserStatus>;

    async fn get_all_employees(&self) -> HostReply<Vec<Employee>>;
    async fn add_employee(&self, request: &NewEmployee) -> HostReply<()>;
    async fn delete_employee(&self, id: EmployeeId) -> HostReply<()>;
    async fn get_attendance_summary(&self, query: &SummaryQuery) -> HostReply<AttendanceSummary>;

    /// Events overlapping the inclusive date range.
    async fn get_events(
        &self,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> HostReply<Vec<CalendarEvent>>;
    async fn add_event(&self, draft: &EventDraft) -> HostReply<EventId>;
    async fn update_event(&self, id: EventId, draft: &EventDraft) -> HostReply<()>;
    async fn delete_event(&self, id: EventId) -> HostReply<()>;

    /// Events visible in the 42-day grid of `year-month`.
    async fn get_events_for_month(&self, year: i32, month: u32) -> HostReply<Vec<CalendarEvent>> {
        match MonthCursor::new(year, month) {
            Some(cursor) => {
                let (start, end) = cursor.grid_range();
                self.get_events(start, end).await
            }
            None => HostReply::failure(format!("invalid month {year}-{month:02}")),
        }
    }
}
