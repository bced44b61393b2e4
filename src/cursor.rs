use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::clock::Clock;
use crate::consts::{DEFAULT_MAX_NAV_YEAR, DEFAULT_MIN_NAV_YEAR};
use crate::grid::{MonthGrid, build_month_with};
use crate::types::MonthIndex;
use crate::CalendarError;

/// The month currently on screen.
///
/// Month steps wrap inside the same year; year steps stop at the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCursor {
    year:     i32,
    month:    MonthIndex,
    min_year: i32,
    max_year: i32,
}

impl MonthCursor {
    /// Cursor bounded to `DEFAULT_MIN_NAV_YEAR..=DEFAULT_MAX_NAV_YEAR`
    pub fn new(year: i32, month: MonthIndex) -> Self {
        Self::with_bounds(year, month, DEFAULT_MIN_NAV_YEAR, DEFAULT_MAX_NAV_YEAR)
    }

    /// The year is clamped into `min_year..=max_year`. Swapped bounds are
    /// put back in order.
    pub fn with_bounds(year: i32, month: MonthIndex, min_year: i32, max_year: i32) -> Self {
        let (min_year, max_year) = if min_year <= max_year { (min_year, max_year) } else { (max_year, min_year) };
        Self {
            year: year.clamp(min_year, max_year),
            month,
            min_year,
            max_year,
        }
    }

    /// Cursor on the month containing `date`
    pub fn at(date: NaiveDate, min_year: i32, max_year: i32) -> Self {
        Self::with_bounds(date.year(), MonthIndex::of(date), min_year, max_year)
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> MonthIndex {
        self.month
    }

    #[must_use]
    pub const fn next_month(self) -> Self {
        Self {
            month: self.month.next(),
            ..self
        }
    }

    #[must_use]
    pub const fn prev_month(self) -> Self {
        Self {
            month: self.month.prev(),
            ..self
        }
    }

    #[must_use]
    pub fn next_year(self) -> Self {
        Self {
            year: (self.year + 1).min(self.max_year),
            ..self
        }
    }

    #[must_use]
    pub fn prev_year(self) -> Self {
        Self {
            year: (self.year - 1).max(self.min_year),
            ..self
        }
    }

    /// Grid of the month under the cursor
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidYear` if the bounds allow a year the
    /// grid builder rejects.
    pub fn grid(&self, clock: &dyn Clock) -> Result<MonthGrid, CalendarError> {
        build_month_with(self.year, self.month, clock)
    }
}
