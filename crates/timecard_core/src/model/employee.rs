//! Employee and session user records.

use crate::model::deserialize_flag;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Debug, Formatter};

/// Host-assigned employee identifier.
pub type EmployeeId = i64;

/// Row of the admin employee table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Missing wages are stored as `NULL` by the host and read as 0.
    #[serde(default, deserialize_with = "wage_or_zero")]
    pub hourly_wage: f64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_admin: bool,
}

fn wage_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Option::<f64>::deserialize(deserializer).map(|wage| wage.unwrap_or(0.0))
}

/// Identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: EmployeeId,
    pub name: String,
    pub is_admin: bool,
}

/// Validated add-employee request.
#[derive(Clone, PartialEq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub password: String,
    pub hourly_wage: f64,
    pub is_admin: bool,
}

impl Debug for NewEmployee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewEmployee")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("hourly_wage", &self.hourly_wage)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}
