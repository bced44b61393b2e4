//! Week-aligned month grids.
//!
//! Weeks start on Sunday. The first and last rows are padded with days of
//! the neighbouring months so every row holds exactly seven days.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::consts::{DAYS_IN_WEEK, MAX_YEAR, MIN_YEAR, WEEKDAY_ABBREVIATIONS};
use crate::{CalendarError, MonthIndex};

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date:       NaiveDate,
    pub day_number: u32,
    pub is_sunday:  bool,
    pub is_today:   bool,
    /// False for padding days borrowed from the previous or next month
    pub in_month:   bool,
}

impl Day {
    fn new(date: NaiveDate, today: NaiveDate, in_month: bool) -> Self {
        Self {
            date,
            day_number: date.day(),
            is_sunday: date.weekday() == Weekday::Sun,
            is_today: date == today,
            in_month,
        }
    }
}

/// A grid row of exactly seven days, Sunday to Saturday
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub week_number: u32,
    pub days:        Vec<Day>,
}

impl Week {
    fn close(days: Vec<Day>) -> Self {
        let week_number = days.first().map_or(0, |day| week_of_year(day.date));
        Self { week_number, days }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub name:        String,
    pub year:        i32,
    pub month_index: MonthIndex,
    pub weeks:       Vec<Week>,
}

impl MonthGrid {
    /// Every cell, row by row
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// Only the cells that belong to the month itself
    pub fn month_days(&self) -> impl Iterator<Item = &Day> {
        self.days().filter(|day| day.in_month)
    }

    /// First cell of the grid (always a Sunday)
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days().next().map(|day| day.date)
    }

    /// Last cell of the grid (always a Saturday)
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days().last().map(|day| day.date)
    }
}

/// Localized month name for a zero-based index
pub const fn month_name(month: MonthIndex) -> &'static str {
    month.name()
}

/// Localized short weekday name
pub fn weekday_abbreviation(weekday: Weekday) -> &'static str {
    WEEKDAY_ABBREVIATIONS[weekday.num_days_from_sunday() as usize]
}

/// Week of the year with Sunday-start weeks, where week 1 is the week
/// containing 1 January.
///
/// The last days of December that share a week with the next 1 January
/// belong to week 1 of the next year.
pub fn week_of_year(date: NaiveDate) -> u32 {
    let saturday = date.week(Weekday::Sun).last_day();
    (saturday.ordinal() - 1) / 7 + 1
}

/// Builds the grid for a month, reading "today" from the system clock.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` if the year is outside `MIN_YEAR..=MAX_YEAR`.
pub fn build_month(year: i32, month: MonthIndex) -> Result<MonthGrid, CalendarError> {
    build_month_with(year, month, &SystemClock)
}

/// Builds the grid for a month, reading "today" from `clock` at build time.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` if the year is outside `MIN_YEAR..=MAX_YEAR`.
pub fn build_month_with(year: i32, month: MonthIndex, clock: &dyn Clock) -> Result<MonthGrid, CalendarError> {
    build_month_on(year, month, clock.today())
}

/// Builds the grid for a month with an explicit current date.
///
/// # Errors
/// Returns `CalendarError::InvalidYear` if the year is outside `MIN_YEAR..=MAX_YEAR`.
pub fn build_month_on(year: i32, month: MonthIndex, today: NaiveDate) -> Result<MonthGrid, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::InvalidYear(year));
    }
    let first = NaiveDate::from_ymd_opt(year, month.number(), 1).ok_or(CalendarError::InvalidYear(year))?;

    let mut weeks = Vec::new();
    let mut current: Vec<Day> = Vec::with_capacity(DAYS_IN_WEEK);

    current.extend(
        first
            .week(Weekday::Sun)
            .first_day()
            .iter_days()
            .take_while(|date| *date < first)
            .map(|date| Day::new(date, today, false)),
    );

    let mut last = first;
    for date in first.iter_days().take_while(|date| date.month0() == first.month0()) {
        last = date;
        current.push(Day::new(date, today, true));
        if current.len() == DAYS_IN_WEEK {
            weeks.push(Week::close(std::mem::replace(
                &mut current,
                Vec::with_capacity(DAYS_IN_WEEK),
            )));
        }
    }

    if !current.is_empty() {
        let missing = DAYS_IN_WEEK - current.len();
        current.extend(
            last.iter_days()
                .skip(1)
                .take(missing)
                .map(|date| Day::new(date, today, false)),
        );
        weeks.push(Week::close(current));
    }

    debug!(year, month = month.get(), weeks = weeks.len(), "built month grid");

    Ok(MonthGrid {
        name: month.name().to_owned(),
        year,
        month_index: month,
        weeks,
    })
}
