use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::{MonthIndex, SPAN_SEPARATOR, prelude::*};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns true iff `date` lies in the closed interval `[start, end]`.
/// An inverted interval contains no dates.
pub fn is_in_trip(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}

/// Inclusive number of days from `start` to `end`.
///
/// The distance is taken as an absolute value, so swapped arguments still
/// count the same days. Use [`TripSpan::new`] to reject inverted input.
pub fn duration(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days().abs() + 1
}

/// Represents an inclusive range between two calendar dates.
/// The start date must be less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct TripSpan {
    start: NaiveDate,
    end:   NaiveDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A side of the range is not an ISO `YYYY-MM-DD` date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl TripSpan {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day
    pub const fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// Returns the first day of the range
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the range
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns both dates as a tuple
    pub const fn dates(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        is_in_trip(date, self.start, self.end)
    }

    /// Checks if this range shares at least one day with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Inclusive day count. Always agrees with [`duration`].
    pub fn duration(&self) -> i64 {
        duration(self.start, self.end)
    }

    /// Checks if the range starts or ends in the given month
    pub fn touches_month(&self, year: i32, month: MonthIndex) -> bool {
        let matches = |date: NaiveDate| date.year() == year && MonthIndex::of(date) == month;
        matches(self.start) || matches(self.end)
    }

    /// Every day of the range in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

fn parse_iso_date(s: &str) -> Result<NaiveDate, RangeError> {
    NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).map_err(|_| RangeError::InvalidDate(s.to_owned()))
}

impl FromStr for TripSpan {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(SPAN_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{SPAN_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(SPAN_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{SPAN_SEPARATOR}' not found despite count == 1"))
                })?;
                let start = parse_iso_date(start_str.trim())?;
                let end = parse_iso_date(end_str.trim())?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{SPAN_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}
