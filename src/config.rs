//! Runtime configuration.
//!
//! Defaults cover every field. Overrides come from environment variables or
//! a JSON file:
//! - `TRIP_CALENDAR_DATA_PATH`: roster file used by [`JsonFileRepository`]
//! - `TRIP_CALENDAR_MIN_YEAR` / `TRIP_CALENDAR_MAX_YEAR`: navigation bounds
//! - `TRIP_CALENDAR_PALETTE`: comma separated trip colors
//! - `TRIP_CALENDAR_REPORT_HEADING`: line printed above monthly reports

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::RandomPalette;
use crate::consts::{DEFAULT_MAX_NAV_YEAR, DEFAULT_MIN_NAV_YEAR, MAX_YEAR, MIN_YEAR, VIBRANT_COLORS};
use crate::cursor::MonthCursor;
use crate::report::MonthlyReport;
use crate::repository::JsonFileRepository;
use crate::types::{MonthIndex, Technician};

const ENV_DATA_PATH: &str = "TRIP_CALENDAR_DATA_PATH";
const ENV_MIN_YEAR: &str = "TRIP_CALENDAR_MIN_YEAR";
const ENV_MAX_YEAR: &str = "TRIP_CALENDAR_MAX_YEAR";
const ENV_PALETTE: &str = "TRIP_CALENDAR_PALETTE";
const ENV_REPORT_HEADING: &str = "TRIP_CALENDAR_REPORT_HEADING";

const DEFAULT_DATA_PATH: &str = "trip_calendar.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid year bounds: {min}..={max} (must be ordered and within {lo}-{hi})", lo = MIN_YEAR, hi = MAX_YEAR)]
    InvalidYearBounds { min: i32, max: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleConfig {
    pub data_path:      PathBuf,
    pub min_year:       i32,
    pub max_year:       i32,
    pub palette:        Vec<String>,
    pub report_heading: Option<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            data_path:      PathBuf::from(DEFAULT_DATA_PATH),
            min_year:       DEFAULT_MIN_NAV_YEAR,
            max_year:       DEFAULT_MAX_NAV_YEAR,
            palette:        VIBRANT_COLORS.iter().map(|c| (*c).to_owned()).collect(),
            report_heading: None,
        }
    }
}

impl ScheduleConfig {
    /// Defaults overridden by the process environment
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        info!(data_path = %config.data_path.display(), "configuration loaded from environment");
        Ok(config)
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATA_PATH) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_MIN_YEAR) {
            config.min_year = parse_year(ENV_MIN_YEAR, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_YEAR) {
            config.max_year = parse_year(ENV_MAX_YEAR, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PALETTE) {
            config.palette = raw
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(heading) = lookup(ENV_REPORT_HEADING) {
            config.report_heading = Some(heading);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or holds
    /// invalid values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "configuration loaded from file");
        Ok(config)
    }

    /// # Errors
    /// Returns `ConfigError::InvalidYearBounds` for unordered or
    /// out-of-range navigation years.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_range = |year: i32| (MIN_YEAR..=MAX_YEAR).contains(&year);
        if self.min_year > self.max_year || !in_range(self.min_year) || !in_range(self.max_year) {
            return Err(ConfigError::InvalidYearBounds {
                min: self.min_year,
                max: self.max_year,
            });
        }
        Ok(())
    }

    pub fn repository(&self) -> JsonFileRepository {
        JsonFileRepository::new(self.data_path.clone())
    }

    pub fn colors(&self) -> RandomPalette {
        RandomPalette::new(self.palette.clone())
    }

    /// Monthly report carrying the configured heading, if any
    pub fn monthly_report(&self, technicians: &[Technician], year: i32, month: MonthIndex) -> MonthlyReport {
        let report = MonthlyReport::build(technicians, year, month);
        match &self.report_heading {
            Some(heading) => report.with_heading(heading.as_str()),
            None => report,
        }
    }

    /// Cursor on the month of `today`, held within the configured years
    pub fn cursor(&self, today: NaiveDate) -> MonthCursor {
        MonthCursor::at(today, self.min_year, self.max_year)
    }
}

fn parse_year(key: &'static str, raw: &str) -> Result<i32, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_owned(),
    })
}
