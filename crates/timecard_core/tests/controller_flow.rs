use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use timecard_core::{
    ActivitySignal, AppConfig, AppController, AttendanceKind, AttendanceSummary, CalendarEvent,
    Employee, EmployeeForm, EventDraft, EventForm, HostApi, HostError, HostReply, IdleTimeouts,
    Navigation, NewEmployee, SessionUser, SummaryForm, SummaryQuery, SummaryTotals, UiError,
    UserStatus, View, WorkState,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Default)]
struct FakeState {
    accounts: Vec<(Employee, String)>,
    session: Option<SessionUser>,
    status: Option<AttendanceKind>,
    events: Vec<CalendarEvent>,
    next_event_id: i64,
    calls: Vec<&'static str>,
}

#[derive(Clone, Default)]
struct FakeHost {
    state: Arc<Mutex<FakeState>>,
}

impl FakeHost {
    fn seeded() -> Self {
        let host = FakeHost::default();
        {
            let mut state = host.state.lock().unwrap();
            state.accounts = vec![
                (
                    Employee {
                        id: 1,
                        name: "admin".to_string(),
                        hourly_wage: 1500.0,
                        is_admin: true,
                    },
                    "secret".to_string(),
                ),
                (
                    Employee {
                        id: 2,
                        name: "sato".to_string(),
                        hourly_wage: 1200.0,
                        is_admin: false,
                    },
                    "pw".to_string(),
                ),
            ];
            state.next_event_id = 100;
        }
        host
    }

    fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: &'static str) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

#[async_trait]
impl HostApi for FakeHost {
    async fn login(&self, name: &str, password: &str) -> HostReply<SessionUser> {
        let mut state = self.record("login");
        let found = state
            .accounts
            .iter()
            .find(|(employee, pw)| employee.name == name && pw == password)
            .map(|(employee, _)| SessionUser {
                id: employee.id,
                name: employee.name.clone(),
                is_admin: employee.is_admin,
            });
        match found {
            Some(user) => {
                state.session = Some(user.clone());
                HostReply::ok(user)
            }
            None => HostReply::failure("wrong user name or password"),
        }
    }

    async fn logout(&self) -> HostReply<()> {
        self.record("logout").session = None;
        HostReply::done()
    }

    async fn record_attendance(&self, kind: AttendanceKind) -> HostReply<()> {
        let mut state = self.record("record_attendance");
        if state.session.is_none() {
            return HostReply::failure("not logged in");
        }
        state.status = Some(kind);
        HostReply::done()
    }

    async fn get_user_status(&self) -> HostReply<UserStatus> {
        let state = self.record("get_user_status");
        let status = match (&state.session, state.status) {
            (None, _) => UserStatus::LoggedOut,
            (Some(_), None) => UserStatus::None,
            (Some(_), Some(kind)) => UserStatus::Recorded(kind),
        };
        HostReply::ok(status)
    }

    async fn get_all_employees(&self) -> HostReply<Vec<Employee>> {
        let state = self.record("get_all_employees");
        HostReply::ok(state.accounts.iter().map(|(e, _)| e.clone()).collect())
    }

    async fn add_employee(&self, request: &NewEmployee) -> HostReply<()> {
        let mut state = self.record("add_employee");
        if state.accounts.iter().any(|(e, _)| e.name == request.name) {
            return HostReply::failure(format!("name \"{}\" is already taken", request.name));
        }
        let id = state.accounts.len() as i64 + 1;
        state.accounts.push((
            Employee {
                id,
                name: request.name.clone(),
                hourly_wage: request.hourly_wage,
                is_admin: request.is_admin,
            },
            request.password.clone(),
        ));
        HostReply::done()
    }

    async fn delete_employee(&self, id: i64) -> HostReply<()> {
        self.record("delete_employee")
            .accounts
            .retain(|(e, _)| e.id != id);
        HostReply::done()
    }

    async fn get_attendance_summary(&self, query: &SummaryQuery) -> HostReply<AttendanceSummary> {
        self.record("get_attendance_summary");
        let labels = query
            .start
            .iter_days()
            .take_while(|day| *day <= query.end)
            .map(|day| day.format("%Y-%m-%d").to_string())
            .collect::<Vec<_>>();
        let data = vec![7.75; labels.len()];
        let total_hours = data.iter().sum::<f64>();
        HostReply::ok(AttendanceSummary {
            labels,
            data,
            summary: SummaryTotals {
                total_hours,
                total_wage: total_hours * 1200.0,
                hourly_wage: 1200.0,
            },
        })
    }

    async fn get_events(
        &self,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> HostReply<Vec<CalendarEvent>> {
        let state = self.record("get_events");
        HostReply::ok(
            state
                .events
                .iter()
                .filter(|event| event.start_date() <= range_end && event.end_date() >= range_start)
                .cloned()
                .collect(),
        )
    }

    async fn add_event(&self, draft: &EventDraft) -> HostReply<i64> {
        let mut state = self.record("add_event");
        let id = state.next_event_id;
        state.next_event_id += 1;
        match CalendarEvent::from_draft(id, draft.clone()) {
            Ok(event) => {
                state.events.push(event);
                HostReply::ok(id)
            }
            Err(err) => HostReply::failure(err.to_string()),
        }
    }

    async fn update_event(&self, id: i64, draft: &EventDraft) -> HostReply<()> {
        let mut state = self.record("update_event");
        let Some(slot) = state.events.iter_mut().find(|event| event.id == id) else {
            return HostReply::failure("event not found");
        };
        match CalendarEvent::from_draft(id, draft.clone()) {
            Ok(event) => {
                *slot = event;
                HostReply::done()
            }
            Err(err) => HostReply::failure(err.to_string()),
        }
    }

    async fn delete_event(&self, id: i64) -> HostReply<()> {
        self.record("delete_event").events.retain(|event| event.id != id);
        HostReply::done()
    }
}

fn controller(host: &FakeHost) -> (AppController<FakeHost>, IdleTimeouts) {
    AppController::with_clock(
        host.clone(),
        AppConfig::default(),
        Arc::new(|| date(2024, 3, 17)),
    )
}

#[tokio::test(start_paused = true)]
async fn login_enters_main_view_with_attendance_panel() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);
    assert_eq!(app.view(), View::Login);

    let user = app.login("sato", "pw").await.unwrap();
    assert_eq!(user.id, 2);
    assert_eq!(app.view(), View::Main);
    assert!(app.is_idle_observer_running());
    assert_eq!(app.panel().state, WorkState::OffDuty);
    assert!(app.panel().is_enabled(AttendanceKind::ClockIn));

    let panel = app.record_attendance(AttendanceKind::ClockIn).await.unwrap();
    assert_eq!(panel.state, WorkState::Working);
    assert!(panel.is_enabled(AttendanceKind::StartBreak));
    assert!(!panel.is_enabled(AttendanceKind::ClockIn));

    let panel = app.record_attendance(AttendanceKind::StartBreak).await.unwrap();
    assert_eq!(panel.state, WorkState::OnBreak);
    assert_eq!(panel.label(), "Status: on break");
}

#[tokio::test(start_paused = true)]
async fn rejected_login_surfaces_host_message() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);

    let err = app.login("sato", "nope").await.unwrap_err();
    assert_eq!(
        err,
        UiError::Host(HostError::Rejected(
            "wrong user name or password".to_string()
        ))
    );
    assert_eq!(app.view(), View::Login);
    assert!(app.user().is_none());
    assert!(!app.is_idle_observer_running());
}

#[tokio::test(start_paused = true)]
async fn blank_credentials_never_reach_the_host() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);

    assert_eq!(
        app.login("  ", "pw").await.unwrap_err(),
        UiError::MissingSelection("name")
    );
    assert!(host.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn operations_require_a_session() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);

    assert_eq!(
        app.record_attendance(AttendanceKind::ClockIn).await.unwrap_err(),
        UiError::NotLoggedIn
    );
    assert_eq!(app.open_calendar().await.unwrap_err(), UiError::NotLoggedIn);
    assert_eq!(app.logout().await.unwrap_err(), UiError::NotLoggedIn);
    assert!(host.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn non_admin_cannot_open_admin_view() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);
    app.login("sato", "pw").await.unwrap();

    assert_eq!(app.open_admin().await.unwrap_err(), UiError::Forbidden);
    assert_eq!(app.view(), View::Main);
    assert!(!host.calls().contains(&"get_all_employees"));
}

#[tokio::test(start_paused = true)]
async fn admin_manages_employees_and_views_summary() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);
    app.login("admin", "secret").await.unwrap();

    let employees = app.open_admin().await.unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(app.view(), View::Admin);
    assert_eq!(app.summary_form().start_date, "2024-03-01");
    assert_eq!(app.summary_form().end_date, "2024-03-17");

    let bad_wage = EmployeeForm {
        name: "kato".to_string(),
        password: "pw".to_string(),
        hourly_wage: "12.345".to_string(),
        is_admin: false,
    };
    let calls_before = host.calls().len();
    assert!(matches!(
        app.add_employee(&bad_wage).await.unwrap_err(),
        UiError::Validation(_)
    ));
    assert_eq!(host.calls().len(), calls_before);

    let form = EmployeeForm {
        hourly_wage: "1100".to_string(),
        ..bad_wage
    };
    let employees = app.add_employee(&form).await.unwrap();
    assert!(employees.iter().any(|e| e.name == "kato" && e.hourly_wage == 1100.0));

    let duplicate = app.add_employee(&form).await.unwrap_err();
    assert_eq!(duplicate.to_string(), "name \"kato\" is already taken");

    let employees = app.delete_employee(3).await.unwrap();
    assert!(employees.iter().all(|e| e.name != "kato"));

    let missing = app.show_summary(app.summary_form().clone()).await.unwrap_err();
    assert_eq!(missing, UiError::MissingSelection("employee"));

    let filter = SummaryForm {
        employee_id: Some(2),
        ..app.summary_form().clone()
    };
    let summary = app.show_summary(filter).await.unwrap();
    assert_eq!(summary.labels.len(), 17);
    assert_eq!(summary.labels[0], "2024-03-01");

    let panel = app.back_to_main().await.unwrap();
    assert_eq!(panel.state, WorkState::OffDuty);
    assert_eq!(app.view(), View::Main);
}

#[tokio::test(start_paused = true)]
async fn summary_filter_survives_revisits_of_admin_view() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);
    app.login("admin", "secret").await.unwrap();
    app.open_admin().await.unwrap();

    let filter = SummaryForm {
        employee_id: Some(2),
        start_date: "2024-02-01".to_string(),
        end_date: "2024-02-29".to_string(),
    };
    app.show_summary(filter.clone()).await.unwrap();
    app.back_to_main().await.unwrap();
    app.open_admin().await.unwrap();

    assert_eq!(app.summary_form(), &filter);
}

#[tokio::test(start_paused = true)]
async fn calendar_grid_follows_navigation_and_mutations() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);
    app.login("sato", "pw").await.unwrap();

    let grid = app.open_calendar().await.unwrap();
    assert_eq!((grid.year(), grid.month()), (2024, 3));
    assert_eq!(grid.today().map(|cell| cell.date), Some(date(2024, 3, 17)));
    assert_eq!(app.view(), View::Calendar);

    let mut form = app.draft_for_date(date(2024, 3, 10)).unwrap();
    form.title = "Inventory".to_string();
    form.end_date = "2024-03-12".to_string();
    let id = app.create_event(&form).await.unwrap();

    let grid = app.grid().unwrap();
    for day in 10..=12 {
        assert_eq!(grid.cell(date(2024, 3, day)).unwrap().events[0].id, id);
    }
    assert!(!grid.cell(date(2024, 3, 13)).unwrap().has_events());

    let mut edit = EventForm::from_event(&grid.cell(date(2024, 3, 10)).unwrap().events[0]);
    edit.end_date = "2024-03-10".to_string();
    app.update_event(id, &edit).await.unwrap();
    assert!(!app.grid().unwrap().cell(date(2024, 3, 11)).unwrap().has_events());

    let grid = app.navigate_calendar(Navigation::Next).await.unwrap();
    assert_eq!((grid.year(), grid.month()), (2024, 4));
    assert!(grid.today().is_none());

    let grid = app.navigate_calendar(Navigation::Today).await.unwrap();
    assert_eq!((grid.year(), grid.month()), (2024, 3));

    app.delete_event(id).await.unwrap();
    assert!(app.grid().unwrap().cells().iter().all(|cell| !cell.has_events()));
}

#[tokio::test(start_paused = true)]
async fn invalid_event_form_is_rejected_before_host_call() {
    let host = FakeHost::seeded();
    let (mut app, _idle) = controller(&host);
    app.login("sato", "pw").await.unwrap();
    app.open_calendar().await.unwrap();

    let form = EventForm {
        title: "Review".to_string(),
        start_date: "2024-03-12".to_string(),
        end_date: "2024-03-10".to_string(),
        all_day: true,
        ..EventForm::default()
    };
    assert!(matches!(
        app.create_event(&form).await.unwrap_err(),
        UiError::Validation(_)
    ));
    assert!(!host.calls().contains(&"add_event"));
}

#[tokio::test(start_paused = true)]
async fn idle_session_is_logged_out_once() {
    let host = FakeHost::seeded();
    let (mut app, mut idle) = controller(&host);
    app.login("sato", "pw").await.unwrap();

    tokio::time::sleep(Duration::from_secs(31)).await;
    let timeout = idle.try_recv().expect("idle timeout after 30s");

    let notice = app.handle_idle_timeout(timeout).await.unwrap();
    assert!(notice.contains("30 seconds"));
    assert_eq!(app.view(), View::Login);
    assert!(app.user().is_none());
    assert!(!app.is_idle_observer_running());
    assert!(host.calls().contains(&"logout"));

    // Same expiry delivered again is stale.
    assert_eq!(app.handle_idle_timeout(timeout).await, None);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(idle.try_recv().is_none());
}

#[tokio::test(start_paused = true)]
async fn activity_keeps_the_session_alive() {
    let host = FakeHost::seeded();
    let (mut app, mut idle) = controller(&host);
    app.login("sato", "pw").await.unwrap();

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(app.record_activity(ActivitySignal::Scroll));
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(idle.try_recv().is_none());
    assert_eq!(app.view(), View::Main);

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(idle.try_recv().is_some());
}

#[tokio::test(start_paused = true)]
async fn expiry_from_a_previous_session_is_ignored() {
    let host = FakeHost::seeded();
    let (mut app, mut idle) = controller(&host);

    app.login("sato", "pw").await.unwrap();
    tokio::time::sleep(Duration::from_secs(31)).await;
    let stale = idle.try_recv().unwrap();

    // User logs out and back in before the expiry is handled.
    app.logout().await.unwrap();
    app.login("sato", "pw").await.unwrap();

    assert_eq!(app.handle_idle_timeout(stale).await, None);
    assert_eq!(app.view(), View::Main);
    assert!(app.is_idle_observer_running());
}

#[tokio::test(start_paused = true)]
async fn manual_logout_stops_idle_observation() {
    let host = FakeHost::seeded();
    let (mut app, mut idle) = controller(&host);
    app.login("admin", "secret").await.unwrap();
    app.open_admin().await.unwrap();

    app.logout().await.unwrap();
    assert_eq!(app.view(), View::Login);
    assert!(app.employees().is_empty());
    assert!(!app.record_activity(ActivitySignal::KeyPress));

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(idle.try_recv().is_none());
}

#[tokio::test(start_paused = true)]
async fn expiry_without_a_listener_is_dropped_quietly() {
    let host = FakeHost::seeded();
    let (mut app, idle) = controller(&host);
    app.login("sato", "pw").await.unwrap();
    drop(idle);

    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(app.view(), View::Main);
    assert!(app.user().is_some());
    assert!(!host.calls().contains(&"logout"));

    app.logout().await.unwrap();
    assert_eq!(app.view(), View::Login);
}

#[tokio::test]
async fn month_fetch_at_calendar_limits_fails_without_querying() {
    let host = FakeHost::seeded();
    for (year, month) in [(262142, 12), (-262143, 1)] {
        let reply = host.get_events_for_month(year, month).await;
        assert!(!reply.success);
        assert!(reply.message.unwrap().contains("invalid month"));
    }
    assert!(!host.calls().contains(&"get_events"));

    assert!(host.get_events_for_month(262142, 11).await.success);
    assert!(host.calls().contains(&"get_events"));
}
