use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DESTINATION_PLACEHOLDER, MAX_MONTH_INDEX, MONTH_NAMES};
use crate::prelude::*;
use crate::range::{RangeError, TripSpan, duration};
use crate::CalendarError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Deref, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a fresh random identifier (UUID v4)
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

string_id! {
    /// Identifies a technician
    TechnicianId
}

string_id! {
    /// Identifies one technician's copy of a trip
    TripId
}

string_id! {
    /// Shared by every per-technician trip that belongs to the same logical trip
    GroupId
}

/// A zero-based month index guaranteed to be in the range `0..=MAX_MONTH_INDEX` (0..=11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct MonthIndex(u8);

impl MonthIndex {
    /// Creates a new `MonthIndex`, validating that it's <= `MAX_MONTH_INDEX`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonthIndex` if the value is > `MAX_MONTH_INDEX`.
    pub const fn new(value: u8) -> Result<Self, CalendarError> {
        if value > MAX_MONTH_INDEX {
            return Err(CalendarError::InvalidMonthIndex(value));
        }
        Ok(Self(value))
    }

    /// Month index of the given date
    #[allow(clippy::cast_possible_truncation)]
    pub fn of(date: NaiveDate) -> Self {
        // month0() is always 0..=11
        Self(date.month0() as u8)
    }

    /// Returns the zero-based index
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the calendar month number (1..=12)
    #[inline]
    pub const fn number(self) -> u32 {
        self.0 as u32 + 1
    }

    /// Localized month name
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.0 as usize]
    }

    /// Following month, December wrapping to January
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % (MAX_MONTH_INDEX + 1))
    }

    /// Preceding month, January wrapping to December
    pub const fn prev(self) -> Self {
        Self((self.0 + MAX_MONTH_INDEX) % (MAX_MONTH_INDEX + 1))
    }
}

impl TryFrom<u8> for MonthIndex {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MonthIndex> for u8 {
    fn from(index: MonthIndex) -> Self {
        index.0
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One technician's record of a trip. Dates are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id:          TripId,
    pub group_id:    GroupId,
    pub start_date:  NaiveDate,
    pub end_date:    NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub color:       String,
}

impl Trip {
    /// Creates a trip with a fresh id covering `span`
    pub fn new(group_id: GroupId, span: TripSpan, destination: Option<String>, color: String) -> Self {
        Self {
            id: TripId::generate(),
            group_id,
            start_date: span.start(),
            end_date: span.end(),
            destination,
            color,
        }
    }

    /// The trip's date range
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if the stored start is after the end.
    pub fn span(&self) -> Result<TripSpan, RangeError> {
        TripSpan::new(self.start_date, self.end_date)
    }

    /// Destination with surrounding whitespace removed, `None` when blank
    pub fn known_destination(&self) -> Option<&str> {
        self.destination.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }
}

/// A person that can be assigned to trips
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id:    TechnicianId,
    pub name:  String,
    #[serde(default)]
    pub trips: Vec<Trip>,
}

impl Technician {
    /// Creates a technician with a fresh id and no trips
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id:    TechnicianId::generate(),
            name:  name.into(),
            trips: Vec::new(),
        }
    }

    /// Whether any of this technician's trips belongs to `group_id`
    pub fn has_group(&self, group_id: &GroupId) -> bool {
        self.trips.iter().any(|trip| &trip.group_id == group_id)
    }

    pub fn reference(&self) -> TechnicianRef {
        TechnicianRef {
            id:   self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Id and name of a trip participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianRef {
    pub id:   TechnicianId,
    pub name: String,
}

/// One logical trip with everyone assigned to it. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTrip {
    pub group_id:    GroupId,
    pub start_date:  NaiveDate,
    pub end_date:    NaiveDate,
    pub destination: String,
    pub color:       String,
    pub technicians: Vec<TechnicianRef>,
}

impl GroupedTrip {
    pub(crate) fn seed(trip: &Trip) -> Self {
        Self {
            group_id:    trip.group_id.clone(),
            start_date:  trip.start_date,
            end_date:    trip.end_date,
            destination: trip.known_destination().unwrap_or(DESTINATION_PLACEHOLDER).to_owned(),
            color:       trip.color.clone(),
            technicians: Vec::new(),
        }
    }

    /// Inclusive day count, same rule as [`duration`]
    pub fn duration(&self) -> i64 {
        duration(self.start_date, self.end_date)
    }

    /// Participant names in assignment order
    pub fn technician_names(&self) -> Vec<&str> {
        self.technicians.iter().map(|t| t.name.as_str()).collect()
    }

    /// Whether the trip starts or ends in the given month
    pub fn touches_month(&self, year: i32, month: MonthIndex) -> bool {
        let matches = |date: NaiveDate| date.year() == year && MonthIndex::of(date) == month;
        matches(self.start_date) || matches(self.end_date)
    }
}
