//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose grid building, attendance panel derivation and form validation
//!   to Dart via FRB.
//! - Flatten core types into plain envelopes (`ok` + `message`).
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Instants cross the boundary as epoch milliseconds of local wall-clock
//!   time; no time zone conversion happens here.
//! - Dates cross the boundary as `YYYY-MM-DD` strings.

use chrono::{DateTime, NaiveDateTime};
use log::warn;
use timecard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ActivitySignal, AppConfig, AttendanceKind, AttendancePanel, CalendarEvent,
    CalendarGridBuilder, DayCell, EmployeeForm, EventForm, MonthCursor, UserStatus,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Idle logout delay in seconds, honoring `TIMECARD_IDLE_TIMEOUT_SECS`.
///
/// Falls back to the default when the environment value is invalid.
#[flutter_rust_bridge::frb(sync)]
pub fn idle_timeout_secs() -> u64 {
    match AppConfig::from_env() {
        Ok(config) => config.idle_timeout.as_secs(),
        Err(err) => {
            warn!("event=config_load module=ffi status=fallback error={err}");
            AppConfig::default().idle_timeout.as_secs()
        }
    }
}

/// Whether a DOM/Flutter input event name resets the idle countdown.
#[flutter_rust_bridge::frb(sync)]
pub fn is_activity_event(name: String) -> bool {
    ActivitySignal::from_dom_event(name.trim()).is_some()
}

/// Calendar event as exchanged with Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiCalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_epoch_ms: i64,
    pub end_epoch_ms: i64,
    pub all_day: bool,
}

/// One grid slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FfiDayCell {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub day: u32,
    pub in_current_month: bool,
    pub is_today: bool,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u32,
    /// Covering events in display order.
    pub events: Vec<FfiCalendarEvent>,
}

/// Month grid response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGridResponse {
    pub ok: bool,
    pub message: String,
    /// `YYYY-MM`.
    pub label: String,
    pub editable: bool,
    /// Always 42 cells when `ok`, empty otherwise.
    pub cells: Vec<FfiDayCell>,
}

impl MonthGridResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            label: String::new(),
            editable: false,
            cells: Vec::new(),
        }
    }
}

/// Builds the 6-week grid for `year-month` with `events` overlaid.
///
/// # FFI contract
/// - Sync call, pure computation evaluated at the local current date.
/// - Never panics; invalid months, months at the calendar limits, or invalid
///   events yield `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn month_grid(
    year: i32,
    month: u32,
    events: Vec<FfiCalendarEvent>,
    editable: bool,
) -> MonthGridResponse {
    let Some(cursor) = MonthCursor::new(year, month) else {
        return MonthGridResponse::failure(format!("invalid month {year}-{month:02}"));
    };
    let events = match events
        .into_iter()
        .map(event_from_ffi)
        .collect::<Result<Vec<_>, String>>()
    {
        Ok(events) => events,
        Err(message) => return MonthGridResponse::failure(message),
    };

    let mut builder = CalendarGridBuilder::new(cursor);
    if editable {
        builder = builder.editable();
    }
    let grid = builder.build(&events);

    MonthGridResponse {
        ok: true,
        message: String::new(),
        label: cursor.label(),
        editable,
        cells: grid.cells().iter().map(cell_to_ffi).collect(),
    }
}

/// Attendance buttons response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendancePanelResponse {
    pub ok: bool,
    pub message: String,
    /// `off_duty|working|on_break`.
    pub state: String,
    pub label: String,
    /// Wire names of the enabled actions.
    pub enabled_actions: Vec<String>,
}

/// Derives the attendance panel from a host status string.
///
/// Unknown statuses yield `ok = false` with the logged-out panel.
#[flutter_rust_bridge::frb(sync)]
pub fn attendance_panel(status: String) -> AttendancePanelResponse {
    let (panel, ok, message) = match status.parse::<UserStatus>() {
        Ok(status) => (AttendancePanel::from_status(status), true, String::new()),
        Err(err) => (AttendancePanel::default(), false, err.to_string()),
    };
    AttendancePanelResponse {
        ok,
        message,
        state: panel.state.as_str().to_string(),
        label: panel.label().to_string(),
        enabled_actions: AttendanceKind::ALL
            .into_iter()
            .filter(|kind| panel.is_enabled(*kind))
            .map(|kind| kind.as_str().to_string())
            .collect(),
    }
}

/// Validated event draft response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFormResponse {
    pub ok: bool,
    pub message: String,
    pub title: String,
    pub description: Option<String>,
    pub start_epoch_ms: i64,
    pub end_epoch_ms: i64,
    pub all_day: bool,
}

/// Validates event editor input before it is sent to the host.
#[flutter_rust_bridge::frb(sync)]
pub fn validate_event_form(
    title: String,
    description: String,
    start_date: String,
    start_time: String,
    end_date: String,
    end_time: String,
    all_day: bool,
) -> EventFormResponse {
    let form = EventForm {
        title,
        description,
        start_date,
        start_time,
        end_date,
        end_time,
        all_day,
    };
    match form.validate() {
        Ok(draft) => EventFormResponse {
            ok: true,
            message: String::new(),
            title: draft.title,
            description: draft.description,
            start_epoch_ms: to_epoch_ms(draft.start),
            end_epoch_ms: to_epoch_ms(draft.end),
            all_day: draft.all_day,
        },
        Err(err) => EventFormResponse {
            ok: false,
            message: err.to_string(),
            title: String::new(),
            description: None,
            start_epoch_ms: 0,
            end_epoch_ms: 0,
            all_day,
        },
    }
}

/// Generic validation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResponse {
    pub ok: bool,
    pub message: String,
}

/// Validates the add-employee form. The password is never echoed back.
#[flutter_rust_bridge::frb(sync)]
pub fn validate_employee_form(
    name: String,
    password: String,
    hourly_wage: String,
    is_admin: bool,
) -> ValidationResponse {
    let form = EmployeeForm {
        name,
        password,
        hourly_wage,
        is_admin,
    };
    match form.validate() {
        Ok(_) => ValidationResponse {
            ok: true,
            message: String::new(),
        },
        Err(err) => ValidationResponse {
            ok: false,
            message: err.to_string(),
        },
    }
}

fn event_from_ffi(event: FfiCalendarEvent) -> Result<CalendarEvent, String> {
    let start = from_epoch_ms(event.start_epoch_ms)?;
    let end = from_epoch_ms(event.end_epoch_ms)?;
    let candidate = CalendarEvent {
        id: event.id,
        title: event.title,
        description: event.description,
        start,
        end,
        all_day: event.all_day,
    };
    candidate
        .validate()
        .map_err(|err| format!("event {}: {err}", candidate.id))?;
    Ok(candidate)
}

fn event_to_ffi(event: &CalendarEvent) -> FfiCalendarEvent {
    FfiCalendarEvent {
        id: event.id,
        title: event.title.clone(),
        description: event.description.clone(),
        start_epoch_ms: to_epoch_ms(event.start),
        end_epoch_ms: to_epoch_ms(event.end),
        all_day: event.all_day,
    }
}

fn cell_to_ffi(cell: &DayCell) -> FfiDayCell {
    FfiDayCell {
        date: cell.date.format("%Y-%m-%d").to_string(),
        day: cell.day(),
        in_current_month: cell.in_current_month,
        is_today: cell.is_today,
        weekday: cell.weekday,
        events: cell.events.iter().map(event_to_ffi).collect(),
    }
}

fn from_epoch_ms(value: i64) -> Result<NaiveDateTime, String> {
    DateTime::from_timestamp_millis(value)
        .map(|instant| instant.naive_utc())
        .ok_or_else(|| format!("epoch milliseconds out of range: {value}"))
}

fn to_epoch_ms(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}
