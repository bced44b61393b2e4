mod clock;
mod color;
mod config;
mod consts;
mod cursor;
mod grid;
mod group;
mod overlay;
mod parser;
mod prelude;
mod range;
mod report;
mod repository;
mod store;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use color::{ColorStrategy, CyclingPalette, RandomPalette};
pub use config::{ConfigError, ScheduleConfig};
pub use consts::*;
pub use cursor::MonthCursor;
pub use grid::{
    Day, MonthGrid, Week, build_month, build_month_on, build_month_with, month_name, weekday_abbreviation,
    week_of_year,
};
pub use group::{group_trips, trips_for_month};
pub use overlay::{TechnicianRow, TripBar, active_trip, overlay_month, trip_bar};
pub use parser::{IngestOutcome, TripRequest, TripRequestParser, ingest_trip_request, parse_trip_request_json};
pub use range::{RangeError, TripSpan, duration, is_in_trip};
pub use report::{MonthlyReport, ReportRow};
pub use repository::{JsonFileRepository, MemoryRepository, RepositoryError, ScheduleRepository};
pub use store::{ScheduleStore, StoreError, SubscriptionId, TripGroupDraft};
pub use types::{GroupId, GroupedTrip, MonthIndex, Technician, TechnicianId, TechnicianRef, Trip, TripId};

use crate::prelude::*;

/// Rejected calendar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CalendarError {
    #[display(fmt = "Invalid month index: {} (must be 0-{})", "_0", MAX_MONTH_INDEX)]
    InvalidMonthIndex(u8),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
}

impl std::error::Error for CalendarError {}
