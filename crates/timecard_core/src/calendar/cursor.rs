//! Month navigation state for the calendar view.

use crate::calendar::grid::{first_of_month, grid_range};
use chrono::{Datelike, Months, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Calendar navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Prev,
    Next,
    Today,
}

/// Earliest month whose 6-week grid starts on or after [`NaiveDate::MIN`].
const FIRST_SUPPORTED: NaiveDate = match NaiveDate::from_ymd_opt(-262143, 2, 1) {
    Some(first) => first,
    None => panic!("first supported month is a valid date"),
};

/// Latest month whose 6-week grid ends on or before [`NaiveDate::MAX`].
const LAST_SUPPORTED: NaiveDate = match NaiveDate::from_ymd_opt(262142, 11, 1) {
    Some(first) => first,
    None => panic!("last supported month is a valid date"),
};

/// Currently displayed month. Always normalized to the 1st, and always a
/// month whose full grid is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// Returns `None` when `month` is outside `1..=12` or the month's grid
    /// would leave the representable calendar.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).and_then(Self::from_first)
    }

    /// Month of `date`, clamped to the supported month range.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: first_of_month(date).clamp(FIRST_SUPPORTED, LAST_SUPPORTED),
        }
    }

    fn from_first(first: NaiveDate) -> Option<Self> {
        (FIRST_SUPPORTED..=LAST_SUPPORTED)
            .contains(&first)
            .then_some(Self { first })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Inclusive date range covered by this month's grid.
    pub fn grid_range(&self) -> (NaiveDate, NaiveDate) {
        // Supported months always have a representable grid.
        grid_range(self.first).unwrap_or((NaiveDate::MIN, NaiveDate::MAX))
    }

    /// Applies a navigation step; saturates at the calendar bounds.
    pub fn navigate(self, navigation: Navigation, today: NaiveDate) -> Self {
        match navigation {
            Navigation::Prev => self.prev(),
            Navigation::Next => self.next(),
            Navigation::Today => Self::containing(today),
        }
    }

    pub fn prev(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .and_then(Self::from_first)
            .unwrap_or(self)
    }

    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(Self::from_first)
            .unwrap_or(self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        first_of_month(date) == self.first
    }

    /// `YYYY-MM`.
    pub fn label(&self) -> String {
        self.first.format("%Y-%m").to_string()
    }
}

impl Display for MonthCursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Month text that is not `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMonthError(pub String);

impl Display for InvalidMonthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid month `{}`; expected YYYY-MM", self.0)
    }
}

impl Error for InvalidMonthError {}

impl FromStr for MonthCursor {
    type Err = InvalidMonthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthError(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}
