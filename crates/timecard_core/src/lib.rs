//! Core front-end logic for the Timecard attendance tool.
//! The UI shell only renders; every decision it shows is made here.

pub mod calendar;
pub mod config;
pub mod error;
pub mod form;
pub mod host;
pub mod logging;
pub mod model;
pub mod service;
pub mod session;

pub use calendar::cursor::{MonthCursor, Navigation};
pub use calendar::grid::{
    build_grid, build_grid_at, CalendarGridBuilder, DayCell, GridMode, MonthGrid, GRID_DAYS,
};
pub use config::{AppConfig, ConfigError};
pub use error::{UiError, UiResult};
pub use form::admin_form::{EmployeeForm, SummaryForm};
pub use form::event_form::EventForm;
pub use form::FormError;
pub use host::api::HostApi;
pub use host::{HostError, HostReply, HostResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::attendance::{AttendanceKind, AttendancePanel, UserStatus, WorkState};
pub use model::employee::{Employee, EmployeeId, NewEmployee, SessionUser};
pub use model::event::{CalendarEvent, EventDraft, EventId, EventValidationError};
pub use model::summary::{AttendanceSummary, SummaryQuery, SummaryTotals};
pub use service::app_controller::{AppController, Clock, IdleTimeout, IdleTimeouts};
pub use session::timer::{ActivitySignal, InactivityObserver, DEFAULT_IDLE_TIMEOUT};
pub use session::view::{View, ViewState, ViewTransition};

/// Health check for the UI bridge.
pub fn ping() -> &'static str {
    "pong"
}

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
