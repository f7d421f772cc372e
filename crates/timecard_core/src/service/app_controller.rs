//! Application controller.
//!
//! # Responsibility
//! - Own all UI state: active view, session, attendance panel, admin data,
//!   calendar cursor and grid, and the inactivity observer.
//! - Run each user action as one linear async call sequence.
//!
//! # Invariants
//! - At most one inactivity observer runs, and only while a session exists.
//! - Leaving the session (manual or idle logout) always lands on the login
//!   view with session-scoped data cleared.
//! - Admin operations are never issued without an admin session.
//! - The calendar grid is rebuilt after every navigation and event mutation.

use crate::calendar::cursor::{MonthCursor, Navigation};
use crate::calendar::grid::{CalendarGridBuilder, MonthGrid};
use crate::config::AppConfig;
use crate::error::{UiError, UiResult};
use crate::form::admin_form::{EmployeeForm, SummaryForm};
use crate::form::event_form::EventForm;
use crate::host::api::HostApi;
use crate::model::attendance::{AttendanceKind, AttendancePanel};
use crate::model::employee::{Employee, EmployeeId, SessionUser};
use crate::model::event::EventId;
use crate::model::summary::AttendanceSummary;
use crate::service::admin_service::AdminService;
use crate::service::calendar_service::CalendarService;
use crate::service::session_service::SessionService;
use crate::session::timer::{ActivitySignal, InactivityObserver};
use crate::session::view::{View, ViewState};
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Source of the current local date.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Idle expiry of one session, delivered through [`IdleTimeouts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTimeout {
    session: u64,
}

/// Receiving side of idle expiries; the UI driver selects on it alongside
/// user input and passes each item to [`AppController::handle_idle_timeout`].
#[derive(Debug)]
pub struct IdleTimeouts {
    receiver: mpsc::UnboundedReceiver<IdleTimeout>,
}

impl IdleTimeouts {
    pub async fn recv(&mut self) -> Option<IdleTimeout> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<IdleTimeout> {
        self.receiver.try_recv().ok()
    }
}

pub struct AppController<H: HostApi> {
    sessions: SessionService<H>,
    admin: AdminService<H>,
    calendar: CalendarService<H>,
    config: AppConfig,
    clock: Clock,
    view: ViewState,
    user: Option<SessionUser>,
    panel: AttendancePanel,
    observer: Option<InactivityObserver>,
    idle_sender: mpsc::UnboundedSender<IdleTimeout>,
    // Bumped per login so a late expiry of an old session is ignored.
    session_seq: u64,
    employees: Vec<Employee>,
    summary_form: SummaryForm,
    summary: Option<AttendanceSummary>,
    cursor: MonthCursor,
    grid: Option<MonthGrid>,
}

impl<H: HostApi> AppController<H> {
    /// Controller evaluated against the local system date.
    pub fn new(host: H, config: AppConfig) -> (Self, IdleTimeouts) {
        Self::with_clock(host, config, Arc::new(|| Local::now().date_naive()))
    }

    pub fn with_clock(host: H, config: AppConfig, clock: Clock) -> (Self, IdleTimeouts) {
        let host = Arc::new(host);
        let (idle_sender, receiver) = mpsc::unbounded_channel();
        let today = clock();
        let controller = Self {
            sessions: SessionService::new(Arc::clone(&host)),
            admin: AdminService::new(Arc::clone(&host)),
            calendar: CalendarService::new(host),
            config,
            clock,
            view: ViewState::new(),
            user: None,
            panel: AttendancePanel::default(),
            observer: None,
            idle_sender,
            session_seq: 0,
            employees: Vec::new(),
            summary_form: SummaryForm::with_default_range(today),
            summary: None,
            cursor: MonthCursor::containing(today),
            grid: None,
        };
        (controller, IdleTimeouts { receiver })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn view(&self) -> View {
        self.view.active()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn panel(&self) -> AttendancePanel {
        self.panel
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn summary_form(&self) -> &SummaryForm {
        &self.summary_form
    }

    pub fn summary(&self) -> Option<&AttendanceSummary> {
        self.summary.as_ref()
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn grid(&self) -> Option<&MonthGrid> {
        self.grid.as_ref()
    }

    pub fn is_idle_observer_running(&self) -> bool {
        self.observer
            .as_ref()
            .is_some_and(|observer| !observer.is_finished())
    }

    /// Logs in, enters the main view and starts idle observation.
    pub async fn login(&mut self, name: &str, password: &str) -> UiResult<SessionUser> {
        let user = self.sessions.login(name, password).await?;
        self.clear_session_data();
        self.user = Some(user.clone());
        self.view.show(View::Main);
        self.start_idle_observer();

        if let Err(err) = self.refresh_status().await {
            warn!("event=status_load module=controller status=error error={err}");
        }
        Ok(user)
    }

    /// Manual logout.
    ///
    /// Local state is cleared even when the host call fails; the failure is
    /// still reported.
    pub async fn logout(&mut self) -> UiResult<()> {
        self.require_session()?;
        self.stop_idle_observer();
        let result = self.sessions.logout().await;
        self.leave_session();
        result
    }

    /// Ends the session an idle expiry belongs to.
    ///
    /// Returns the notice to show, or `None` when the expiry is stale (its
    /// session already ended).
    pub async fn handle_idle_timeout(&mut self, timeout: IdleTimeout) -> Option<String> {
        if self.user.is_none() || timeout.session != self.session_seq {
            debug!("event=idle_logout module=controller status=ignored");
            return None;
        }

        self.stop_idle_observer();
        if let Err(err) = self.sessions.logout().await {
            warn!("event=idle_logout module=controller status=host_error error={err}");
        }
        self.leave_session();
        info!("event=idle_logout module=controller status=ok");
        Some(format!(
            "Logged out automatically after {} seconds of inactivity.",
            self.config.idle_timeout.as_secs()
        ))
    }

    /// Restarts the idle countdown. Returns `false` when no observer runs.
    pub fn record_activity(&self, signal: ActivitySignal) -> bool {
        self.observer
            .as_ref()
            .is_some_and(|observer| observer.notify(signal))
    }

    pub async fn record_attendance(&mut self, kind: AttendanceKind) -> UiResult<AttendancePanel> {
        self.require_session()?;
        self.sessions.record_attendance(kind).await?;
        self.refresh_status().await
    }

    pub async fn refresh_status(&mut self) -> UiResult<AttendancePanel> {
        self.require_session()?;
        let status = self.sessions.status().await?;
        self.panel = AttendancePanel::from_status(status);
        Ok(self.panel)
    }

    /// Enters the admin view and loads the employee table.
    ///
    /// The summary filter is reset to the current month on the first visit
    /// only.
    pub async fn open_admin(&mut self) -> UiResult<&[Employee]> {
        self.require_admin()?;
        if self.view.show(View::Admin).first_visit {
            self.summary_form = SummaryForm::with_default_range(self.today());
        }
        self.load_employees().await
    }

    pub async fn back_to_main(&mut self) -> UiResult<AttendancePanel> {
        self.require_session()?;
        self.view.show(View::Main);
        self.refresh_status().await
    }

    pub async fn load_employees(&mut self) -> UiResult<&[Employee]> {
        self.require_admin()?;
        self.employees = self.admin.employees().await?;
        Ok(self.employees.as_slice())
    }

    pub async fn add_employee(&mut self, form: &EmployeeForm) -> UiResult<&[Employee]> {
        self.require_admin()?;
        self.admin.add_employee(form).await?;
        self.load_employees().await
    }

    pub async fn delete_employee(&mut self, id: EmployeeId) -> UiResult<&[Employee]> {
        self.require_admin()?;
        self.admin.delete_employee(id).await?;
        self.load_employees().await
    }

    /// Stores the filter and loads its summary.
    pub async fn show_summary(&mut self, form: SummaryForm) -> UiResult<&AttendanceSummary> {
        self.require_admin()?;
        self.summary_form = form;
        let summary = self.admin.summary(&self.summary_form).await?;
        Ok(&*self.summary.insert(summary))
    }

    pub async fn open_calendar(&mut self) -> UiResult<&MonthGrid> {
        self.require_session()?;
        self.view.show(View::Calendar);
        self.reload_calendar().await
    }

    pub async fn navigate_calendar(&mut self, navigation: Navigation) -> UiResult<&MonthGrid> {
        self.require_session()?;
        self.cursor = self.cursor.navigate(navigation, self.today());
        self.reload_calendar().await
    }

    pub async fn create_event(&mut self, form: &EventForm) -> UiResult<EventId> {
        self.require_session()?;
        let id = self.calendar.create(form).await?;
        self.refresh_after_mutation().await;
        Ok(id)
    }

    pub async fn update_event(&mut self, id: EventId, form: &EventForm) -> UiResult<()> {
        self.require_session()?;
        self.calendar.update(id, form).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    pub async fn delete_event(&mut self, id: EventId) -> UiResult<()> {
        self.require_session()?;
        self.calendar.delete(id).await?;
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Prefilled editor form for a clicked grid cell.
    pub fn draft_for_date(&self, date: NaiveDate) -> Option<EventForm> {
        let draft = self.grid.as_ref()?.draft_for(date)?;
        Some(EventForm::for_date(draft.start.date()))
    }

    fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    fn require_session(&self) -> UiResult<&SessionUser> {
        self.user.as_ref().ok_or(UiError::NotLoggedIn)
    }

    fn require_admin(&self) -> UiResult<&SessionUser> {
        let user = self.require_session()?;
        if !user.is_admin {
            return Err(UiError::Forbidden);
        }
        Ok(user)
    }

    fn start_idle_observer(&mut self) {
        self.session_seq += 1;
        let session = self.session_seq;
        let sender = self.idle_sender.clone();
        // Replacing the previous observer drops and cancels it.
        self.observer = Some(InactivityObserver::start(
            self.config.idle_timeout,
            move || {
                if sender.send(IdleTimeout { session }).is_err() {
                    debug!(
                        "event=idle_timeout module=controller status=dropped session={session}"
                    );
                }
            },
        ));
    }

    fn stop_idle_observer(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.stop();
        }
    }

    fn leave_session(&mut self) {
        if self.view.show(View::Login).stop_idle_observer {
            self.stop_idle_observer();
        }
        self.user = None;
        self.clear_session_data();
    }

    fn clear_session_data(&mut self) {
        self.panel = AttendancePanel::default();
        self.employees.clear();
        self.summary = None;
        self.grid = None;
    }

    async fn reload_calendar(&mut self) -> UiResult<&MonthGrid> {
        let events = self.calendar.events_for(self.cursor).await?;
        let grid = CalendarGridBuilder::new(self.cursor)
            .today(self.today())
            .editable()
            .build(&events);
        Ok(&*self.grid.insert(grid))
    }

    // The mutation already succeeded; a failed refetch keeps the old grid.
    async fn refresh_after_mutation(&mut self) {
        if let Err(err) = self.reload_calendar().await {
            warn!("event=events_load module=controller status=error error={err}");
        }
    }
}
