//! Attendance actions, user status and the derived action panel.
//!
//! # Invariants
//! - Wire names are snake_case and match the host's `event_type` column.
//! - Exactly one work state is derived from any status; unknown status
//!   strings are rejected rather than mapped to a default.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One attendance record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceKind {
    ClockIn,
    ClockOut,
    StartBreak,
    EndBreak,
}

impl AttendanceKind {
    pub const ALL: [Self; 4] = [
        Self::ClockIn,
        Self::ClockOut,
        Self::StartBreak,
        Self::EndBreak,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClockIn => "clock_in",
            Self::ClockOut => "clock_out",
            Self::StartBreak => "start_break",
            Self::EndBreak => "end_break",
        }
    }
}

impl Display for AttendanceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceKind {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
            .ok_or_else(|| UnknownStatusError(value.to_string()))
    }
}

/// Status string that matches no known attendance state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatusError(pub String);

impl Display for UnknownStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown attendance status: `{}`", self.0)
    }
}

impl Error for UnknownStatusError {}

/// Last known attendance state of the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UserStatus {
    /// No session on the host side.
    LoggedOut,
    /// Logged in but nothing recorded yet.
    None,
    /// Most recent attendance record.
    Recorded(AttendanceKind),
}

impl FromStr for UserStatus {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "logged_out" => Ok(Self::LoggedOut),
            "none" => Ok(Self::None),
            other => other.parse().map(Self::Recorded),
        }
    }
}

impl TryFrom<String> for UserStatus {
    type Error = UnknownStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UserStatus> for String {
    fn from(value: UserStatus) -> Self {
        match value {
            UserStatus::LoggedOut => "logged_out".to_string(),
            UserStatus::None => "none".to_string(),
            UserStatus::Recorded(kind) => kind.as_str().to_string(),
        }
    }
}

/// Coarse work state shown in the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkState {
    OffDuty,
    Working,
    OnBreak,
}

impl WorkState {
    pub fn from_status(status: UserStatus) -> Self {
        match status {
            UserStatus::Recorded(AttendanceKind::ClockIn)
            | UserStatus::Recorded(AttendanceKind::EndBreak) => Self::Working,
            UserStatus::Recorded(AttendanceKind::StartBreak) => Self::OnBreak,
            UserStatus::Recorded(AttendanceKind::ClockOut)
            | UserStatus::None
            | UserStatus::LoggedOut => Self::OffDuty,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OffDuty => "Status: not clocked in / clocked out",
            Self::Working => "Status: working",
            Self::OnBreak => "Status: on break",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OffDuty => "off_duty",
            Self::Working => "working",
            Self::OnBreak => "on_break",
        }
    }

    /// Actions that make sense from this state.
    pub fn allowed_actions(self) -> &'static [AttendanceKind] {
        match self {
            Self::OffDuty => &[AttendanceKind::ClockIn],
            Self::Working => &[AttendanceKind::ClockOut, AttendanceKind::StartBreak],
            Self::OnBreak => &[AttendanceKind::EndBreak],
        }
    }
}

/// Attendance buttons projection for the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendancePanel {
    pub status: UserStatus,
    pub state: WorkState,
}

impl AttendancePanel {
    pub fn from_status(status: UserStatus) -> Self {
        Self {
            status,
            state: WorkState::from_status(status),
        }
    }

    pub fn label(&self) -> &'static str {
        self.state.label()
    }

    pub fn is_enabled(&self, kind: AttendanceKind) -> bool {
        self.state.allowed_actions().contains(&kind)
    }
}

impl Default for AttendancePanel {
    fn default() -> Self {
        Self::from_status(UserStatus::LoggedOut)
    }
}

#[cfg(test)]
mod tests {
    use super::{AttendanceKind, AttendancePanel, UserStatus, WorkState};

    #[test]
    fn status_parses_wire_names() {
        assert_eq!("none".parse::<UserStatus>(), Ok(UserStatus::None));
        assert_eq!(
            " start_break ".parse::<UserStatus>(),
            Ok(UserStatus::Recorded(AttendanceKind::StartBreak))
        );
        assert!("lunch".parse::<UserStatus>().is_err());
    }

    #[test]
    fn panel_enables_exactly_the_allowed_actions() {
        let cases = [
            (UserStatus::LoggedOut, WorkState::OffDuty, vec![AttendanceKind::ClockIn]),
            (UserStatus::None, WorkState::OffDuty, vec![AttendanceKind::ClockIn]),
            (
                UserStatus::Recorded(AttendanceKind::ClockIn),
                WorkState::Working,
                vec![AttendanceKind::ClockOut, AttendanceKind::StartBreak],
            ),
            (
                UserStatus::Recorded(AttendanceKind::EndBreak),
                WorkState::Working,
                vec![AttendanceKind::ClockOut, AttendanceKind::StartBreak],
            ),
            (
                UserStatus::Recorded(AttendanceKind::StartBreak),
                WorkState::OnBreak,
                vec![AttendanceKind::EndBreak],
            ),
            (
                UserStatus::Recorded(AttendanceKind::ClockOut),
                WorkState::OffDuty,
                vec![AttendanceKind::ClockIn],
            ),
        ];

        for (status, state, enabled) in cases {
            let panel = AttendancePanel::from_status(status);
            assert_eq!(panel.state, state, "status {status:?}");
            for kind in AttendanceKind::ALL {
                assert_eq!(panel.is_enabled(kind), enabled.contains(&kind), "{kind}");
            }
        }
    }
}
