//! Explicit view state machine.
//!
//! Tracks the active screen and which screens already ran their one-time
//! setup, owned by the controller instead of module-level flags.

use std::collections::BTreeSet;

/// Top-level screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum View {
    Login,
    Main,
    Admin,
    Calendar,
}

impl View {
    pub fn requires_session(self) -> bool {
        !matches!(self, Self::Login)
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Main => "main",
            Self::Admin => "admin",
            Self::Calendar => "calendar",
        }
    }
}

/// Outcome of a view switch, telling the caller which side effects to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTransition {
    pub from: View,
    pub to: View,
    /// `true` exactly once per view: the first time it is shown.
    pub first_visit: bool,
    /// Entering the login view ends idle observation.
    pub stop_idle_observer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    active: View,
    initialized: BTreeSet<View>,
}

impl ViewState {
    /// Starts on the login view, which is set up at startup.
    pub fn new() -> Self {
        Self {
            active: View::Login,
            initialized: BTreeSet::from([View::Login]),
        }
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn is_initialized(&self, view: View) -> bool {
        self.initialized.contains(&view)
    }

    /// Activates `view` and records its setup.
    ///
    /// Showing the already active view is allowed and reports
    /// `first_visit = false`.
    pub fn show(&mut self, view: View) -> ViewTransition {
        let from = self.active;
        let first_visit = self.initialized.insert(view);
        self.active = view;
        ViewTransition {
            from,
            to: view,
            first_visit,
            stop_idle_observer: view == View::Login,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{View, ViewState};

    #[test]
    fn starts_on_initialized_login_view() {
        let state = ViewState::new();
        assert_eq!(state.active(), View::Login);
        assert!(state.is_initialized(View::Login));
        assert!(!state.is_initialized(View::Main));
    }

    #[test]
    fn first_visit_is_reported_once_per_view() {
        let mut state = ViewState::new();

        let first = state.show(View::Main);
        assert!(first.first_visit);
        assert_eq!(first.from, View::Login);

        state.show(View::Admin);
        let back = state.show(View::Main);
        assert!(!back.first_visit);
        assert_eq!(back.from, View::Admin);
        assert_eq!(state.active(), View::Main);
    }

    #[test]
    fn entering_login_stops_idle_observer() {
        let mut state = ViewState::new();
        assert!(!state.show(View::Main).stop_idle_observer);

        let logout = state.show(View::Login);
        assert!(logout.stop_idle_observer);
        assert!(!logout.first_visit);
        // Setup already done for Main survives a logout.
        assert!(state.is_initialized(View::Main));
    }

    #[test]
    fn session_and_admin_requirements() {
        assert!(!View::Login.requires_session());
        assert!(View::Calendar.requires_session());
        assert!(View::Admin.requires_admin());
        assert!(!View::Main.requires_admin());
    }
}
