//! Month grid construction with event overlay.
//!
//! # Responsibility
//! - Map a reference month to a fixed 6x7 Sunday-first grid of days.
//! - Attach the events that cover each day.
//! - Offer click-to-create drafts when the grid is editable.
//!
//! # Invariants
//! - A grid always has exactly [`GRID_DAYS`] cells.
//! - The first cell is the Sunday on or before the 1st of the month.
//! - Grids are only built for a [`MonthCursor`], whose 42 days are always
//!   representable.
//! - At most one cell is marked `is_today`.
//! - Building is pure: the same inputs yield an equal grid.

use crate::calendar::cursor::MonthCursor;
use crate::model::event::{CalendarEvent, EventDraft};
use chrono::{Datelike, Days, Local, NaiveDate};

/// Number of cells in a month grid (6 weeks).
pub const GRID_DAYS: usize = 42;
/// Cells per grid row.
pub const DAYS_PER_WEEK: usize = 7;

/// Whether cells of the grid can be clicked to create an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridMode {
    #[default]
    ReadOnly,
    Editable,
}

/// One day slot of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// `false` for leading/trailing days of the adjacent months.
    pub in_current_month: bool,
    pub is_today: bool,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u32,
    /// Events covering `date`, all-day first, then by start, then by id.
    pub events: Vec<CalendarEvent>,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn is_weekend(&self) -> bool {
        self.weekday == 0 || self.weekday == 6
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Disposable projection of one month plus its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    year: i32,
    month: u32,
    mode: GridMode,
    start: NaiveDate,
    end: NaiveDate,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn mode(&self) -> GridMode {
        self.mode
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Rows of seven cells, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> + '_ {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        let offset = usize::try_from((date - self.start).num_days()).ok()?;
        self.cells.get(offset)
    }

    pub fn today(&self) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.is_today)
    }

    /// First and last cell dates (inclusive).
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Prefilled all-day draft for a clicked cell.
    ///
    /// Returns `None` for read-only grids and dates outside the grid.
    pub fn draft_for(&self, date: NaiveDate) -> Option<EventDraft> {
        if self.mode != GridMode::Editable {
            return None;
        }
        self.cell(date)
            .map(|cell| EventDraft::all_day(String::new(), cell.date, cell.date))
    }
}

/// Configurable grid builder.
///
/// `build_grid` covers the common case; the builder exists for callers that
/// need an explicit evaluation date (tests, FFI) or an editable grid.
#[derive(Debug, Clone, Copy)]
pub struct CalendarGridBuilder {
    cursor: MonthCursor,
    today: Option<NaiveDate>,
    mode: GridMode,
}

impl CalendarGridBuilder {
    pub fn new(cursor: MonthCursor) -> Self {
        Self {
            cursor,
            today: None,
            mode: GridMode::ReadOnly,
        }
    }

    /// Overrides the evaluation date used for `is_today`.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn mode(mut self, mode: GridMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn editable(self) -> Self {
        self.mode(GridMode::Editable)
    }

    pub fn build(&self, events: &[CalendarEvent]) -> MonthGrid {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        build_grid_at(self.cursor, events, today, self.mode)
    }
}

/// Builds a read-only grid for `cursor`, evaluated at the local current date.
pub fn build_grid(cursor: MonthCursor, events: &[CalendarEvent]) -> MonthGrid {
    CalendarGridBuilder::new(cursor).build(events)
}

/// Builds a grid with an explicit evaluation date.
pub fn build_grid_at(
    cursor: MonthCursor,
    events: &[CalendarEvent],
    today: NaiveDate,
    mode: GridMode,
) -> MonthGrid {
    let mut ordered = events.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| a.display_order(b));

    let (start, end) = cursor.grid_range();
    let cells = start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| DayCell {
            date,
            in_current_month: cursor.contains(date),
            is_today: date == today,
            weekday: date.weekday().num_days_from_sunday(),
            events: ordered
                .iter()
                .filter(|event| event.covers(date))
                .map(|event| (*event).clone())
                .collect(),
        })
        .collect::<Vec<_>>();

    MonthGrid {
        year: cursor.year(),
        month: cursor.month(),
        mode,
        start,
        end,
        cells,
    }
}

/// First day of the month containing `reference`.
pub fn first_of_month(reference: NaiveDate) -> NaiveDate {
    reference.with_day(1).unwrap_or(reference)
}

/// Sunday on or before the 1st of the month containing `reference`.
///
/// `None` when that Sunday precedes [`NaiveDate::MIN`].
pub fn grid_start(reference: NaiveDate) -> Option<NaiveDate> {
    let first = first_of_month(reference);
    first.checked_sub_days(Days::new(u64::from(first.weekday().num_days_from_sunday())))
}

/// First and last dates (inclusive) shown by the grid of `reference`.
///
/// `None` when either end falls outside the representable calendar.
pub fn grid_range(reference: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = grid_start(reference)?;
    let end = start.checked_add_days(Days::new(GRID_DAYS as u64 - 1))?;
    Some((start, end))
}
