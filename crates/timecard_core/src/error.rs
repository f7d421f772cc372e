//! UI-facing error taxonomy.
//!
//! No variant is fatal: every error is shown to the user and the controller
//! stays usable.

use crate::form::FormError;
use crate::host::HostError;
use crate::model::event::EventValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// Host call failed; the message is surfaced as-is and not retried.
    Host(HostError),
    /// Input rejected locally before any host call.
    Validation(FormError),
    /// Required selection or field left empty.
    MissingSelection(&'static str),
    NotLoggedIn,
    /// Operation needs admin rights.
    Forbidden,
}

impl Display for UiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::MissingSelection(field) => write!(f, "please provide `{field}`"),
            Self::NotLoggedIn => write!(f, "not logged in"),
            Self::Forbidden => write!(f, "administrator rights required"),
        }
    }
}

impl Error for UiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Host(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::MissingSelection(_) | Self::NotLoggedIn | Self::Forbidden => None,
        }
    }
}

impl From<HostError> for UiError {
    fn from(value: HostError) -> Self {
        Self::Host(value)
    }
}

impl From<FormError> for UiError {
    fn from(value: FormError) -> Self {
        match value {
            FormError::Missing(field) => Self::MissingSelection(field),
            other => Self::Validation(other),
        }
    }
}

impl From<EventValidationError> for UiError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(FormError::Event(value))
    }
}

#[cfg(test)]
mod tests {
    use super::UiError;
    use crate::form::FormError;
    use crate::host::HostError;

    #[test]
    fn missing_form_fields_become_missing_selection() {
        assert_eq!(
            UiError::from(FormError::Missing("employee")),
            UiError::MissingSelection("employee")
        );
        assert!(matches!(
            UiError::from(FormError::InvalidWage("x".to_string())),
            UiError::Validation(_)
        ));
    }

    #[test]
    fn host_message_is_displayed_verbatim() {
        let err = UiError::from(HostError::Rejected("name already taken".to_string()));
        assert_eq!(err.to_string(), "name already taken");
    }
}
