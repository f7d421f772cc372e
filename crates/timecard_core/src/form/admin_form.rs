//! Admin forms: employee registration and attendance summary filter.

use crate::calendar::grid::first_of_month;
use crate::form::{parse_date, required, FormError, FormResult};
use crate::model::employee::{EmployeeId, NewEmployee};
use crate::model::summary::SummaryQuery;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static WAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("valid wage regex"));

/// Raw add-employee input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub password: String,
    /// Empty means 0.
    pub hourly_wage: String,
    pub is_admin: bool,
}

impl EmployeeForm {
    pub fn validate(&self) -> FormResult<NewEmployee> {
        let name = required("name", &self.name)?;
        // Passwords are taken verbatim; only emptiness is checked.
        if self.password.is_empty() {
            return Err(FormError::Missing("password"));
        }
        let hourly_wage = parse_wage(&self.hourly_wage)?;

        Ok(NewEmployee {
            name: name.to_string(),
            password: self.password.clone(),
            hourly_wage,
            is_admin: self.is_admin,
        })
    }
}

fn parse_wage(raw: &str) -> FormResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    if !WAGE_RE.is_match(trimmed) {
        return Err(FormError::InvalidWage(trimmed.to_string()));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| FormError::InvalidWage(trimmed.to_string()))
}

/// Raw summary filter input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryForm {
    pub employee_id: Option<EmployeeId>,
    pub start_date: String,
    pub end_date: String,
}

impl SummaryForm {
    /// Filter preset to the first of the current month through today.
    pub fn with_default_range(today: NaiveDate) -> Self {
        Self {
            employee_id: None,
            start_date: first_of_month(today).format("%Y-%m-%d").to_string(),
            end_date: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(&self) -> FormResult<SummaryQuery> {
        let employee_id = self.employee_id.ok_or(FormError::Missing("employee"))?;
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if end < start {
            return Err(FormError::EndBeforeStart { start, end });
        }
        Ok(SummaryQuery {
            employee_id,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_wage, EmployeeForm, SummaryForm};
    use crate::form::FormError;
    use chrono::NaiveDate;

    #[test]
    fn wage_accepts_plain_decimals_only() {
        assert_eq!(parse_wage(""), Ok(0.0));
        assert_eq!(parse_wage(" 1200 "), Ok(1200.0));
        assert_eq!(parse_wage("1050.50"), Ok(1050.5));
        assert!(matches!(parse_wage("-5"), Err(FormError::InvalidWage(_))));
        assert!(matches!(parse_wage("1e3"), Err(FormError::InvalidWage(_))));
        assert!(matches!(parse_wage("12.345"), Err(FormError::InvalidWage(_))));
    }

    #[test]
    fn employee_form_requires_name_and_password() {
        let form = EmployeeForm {
            name: "  ".to_string(),
            password: "pw".to_string(),
            ..EmployeeForm::default()
        };
        assert_eq!(form.validate(), Err(FormError::Missing("name")));

        let form = EmployeeForm {
            name: "sato".to_string(),
            ..EmployeeForm::default()
        };
        assert_eq!(form.validate(), Err(FormError::Missing("password")));
    }

    #[test]
    fn default_summary_range_starts_on_first_of_month() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 17).expect("date");
        let form = SummaryForm::with_default_range(today);
        assert_eq!(form.start_date, "2024-03-01");
        assert_eq!(form.end_date, "2024-03-17");
        assert_eq!(form.validate(), Err(FormError::Missing("employee")));
    }

    #[test]
    fn summary_rejects_reversed_range() {
        let form = SummaryForm {
            employee_id: Some(2),
            start_date: "2024-03-10".to_string(),
            end_date: "2024-03-01".to_string(),
        };
        assert!(matches!(
            form.validate(),
            Err(FormError::EndBeforeStart { .. })
        ));
    }
}
