//! Host API boundary.
//!
//! # Responsibility
//! - Describe the asynchronous host calls the UI depends on.
//! - Normalize host replies into `Result` values.
//!
//! # Invariants
//! - A failed reply always carries a user-presentable message.
//! - A successful reply that should carry data but does not is an error,
//!   never a silent default.

pub mod api;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const UNKNOWN_HOST_ERROR: &str = "unknown host error";

pub type HostResult<T> = Result<T, HostError>;

/// Host call failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Host answered `success = false`.
    Rejected(String),
    /// Host answered `success = true` without the expected payload.
    MissingPayload,
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(message) => write!(f, "{message}"),
            Self::MissingPayload => write!(f, "host reply is missing its payload"),
        }
    }
}

impl Error for HostError {}

/// Reply envelope shared by every host call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostReply<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub payload: Option<T>,
}

impl<T> HostReply<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            success: true,
            message: None,
            payload: Some(payload),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            payload: None,
        }
    }

    /// Unwraps the payload of a successful reply.
    pub fn into_result(self) -> HostResult<T> {
        if !self.success {
            return Err(rejection(self.message));
        }
        self.payload.ok_or(HostError::MissingPayload)
    }

    /// Checks success only, discarding any payload.
    pub fn into_ack(self) -> HostResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(rejection(self.message))
        }
    }
}

impl HostReply<()> {
    /// Successful reply for calls without a payload.
    pub fn done() -> Self {
        Self::ok(())
    }
}

fn rejection(message: Option<String>) -> HostError {
    let message = message
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST_ERROR.to_string());
    HostError::Rejected(message)
}
