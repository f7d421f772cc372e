//! Attendance summary query and host-computed result.
//!
//! Wage and hour totals are computed by the host; core only validates the
//! query and formats the totals for display.

use crate::model::employee::EmployeeId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validated summary filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryQuery {
    pub employee_id: EmployeeId,
    pub start: NaiveDate,
    /// Inclusive.
    pub end: NaiveDate,
}

/// Totals block of a summary reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub total_hours: f64,
    pub total_wage: f64,
    pub hourly_wage: f64,
}

/// Per-day hours plus totals for one employee and range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// `YYYY-MM-DD`, one per day of the queried range.
    pub labels: Vec<String>,
    /// Hours worked, aligned with `labels`.
    pub data: Vec<f64>,
    pub summary: SummaryTotals,
}

impl AttendanceSummary {
    /// Pairs each day label with its hours.
    pub fn daily_hours(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }

    /// Summary line shown above the chart.
    pub fn totals_text(&self) -> String {
        let totals = &self.summary;
        format!(
            "Period total: {:.2} h / Estimated pay: {} (hourly wage: {})",
            totals.total_hours,
            group_thousands(totals.total_wage.round() as i64),
            group_thousands(totals.hourly_wage.round() as i64),
        )
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}
