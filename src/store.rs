//! The schedule store owns the technician roster.
//!
//! Views (grid overlay, grouped trips, reports) are computed from snapshots
//! returned by [`ScheduleStore::technicians`]; they never hold the store.
//! Every mutation is applied to a copy, persisted, and only then committed
//! and broadcast to subscribers.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::color::ColorStrategy;
use crate::consts::DEFAULT_ROSTER;
use crate::group::group_trips;
use crate::parser::TripRequest;
use crate::prelude::*;
use crate::range::{RangeError, TripSpan};
use crate::report::MonthlyReport;
use crate::repository::{RepositoryError, ScheduleRepository};
use crate::types::{GroupId, GroupedTrip, MonthIndex, Technician, TechnicianId, Trip};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Unknown technician: {0}")]
    UnknownTechnician(TechnicianId),

    #[error("Unknown trip group: {0}")]
    UnknownGroup(GroupId),

    #[error("Technician name must not be empty")]
    EmptyName,

    #[error("A trip needs at least one technician")]
    NoTechniciansSelected,

    #[error("Trip group {0} appears more than once for the same technician")]
    DuplicateGroup(GroupId),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Handle returned by [`ScheduleStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&[Technician]) + Send + Sync>;

/// Form input for creating or editing a trip group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripGroupDraft {
    pub technician_ids: Vec<TechnicianId>,
    pub start_date:     NaiveDate,
    pub end_date:       NaiveDate,
    pub destination:    Option<String>,
}

impl TripGroupDraft {
    pub fn new(technician_ids: Vec<TechnicianId>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            technician_ids,
            start_date,
            end_date,
            destination: None,
        }
    }

    #[must_use]
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }
}

fn clean_destination(destination: Option<&str>) -> Option<String> {
    destination.map(str::trim).filter(|d| !d.is_empty()).map(str::to_owned)
}

fn clean_name(name: &str) -> Result<String, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn default_roster() -> Vec<Technician> {
    DEFAULT_ROSTER
        .iter()
        .map(|(id, name)| Technician {
            id:    TechnicianId::from(*id),
            name:  (*name).to_owned(),
            trips: Vec::new(),
        })
        .collect()
}

pub struct ScheduleStore {
    technicians:       Vec<Technician>,
    repository:        Box<dyn ScheduleRepository>,
    colors:            Box<dyn ColorStrategy>,
    subscribers:       Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl ScheduleStore {
    /// Loads the roster from `repository`, falling back to the default
    /// roster when nothing has been saved.
    ///
    /// # Errors
    /// Returns `StoreError::Repository` if saved data cannot be read, and
    /// `StoreError::Range` or `StoreError::DuplicateGroup` if a saved trip
    /// list is invalid.
    pub fn open(
        repository: impl ScheduleRepository + 'static,
        colors: impl ColorStrategy + 'static,
    ) -> Result<Self, StoreError> {
        let technicians = match repository.load() {
            Ok(Some(technicians)) => {
                if let Err(err) = validate_roster(&technicians) {
                    error!(error = %err, "saved schedule holds invalid trips");
                    return Err(err);
                }
                technicians
            },
            Ok(None) => {
                info!("no saved schedule, starting with the default roster");
                default_roster()
            },
            Err(err) => {
                error!(error = %err, "failed to load schedule");
                return Err(err.into());
            },
        };

        Ok(Self {
            technicians,
            repository: Box::new(repository),
            colors: Box::new(colors),
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Current roster snapshot
    pub fn technicians(&self) -> &[Technician] {
        &self.technicians
    }

    pub fn technician(&self, id: &TechnicianId) -> Option<&Technician> {
        self.technicians.iter().find(|t| &t.id == id)
    }

    /// Trips of the current roster grouped by group id
    pub fn grouped_trips(&self) -> Vec<GroupedTrip> {
        group_trips(&self.technicians)
    }

    pub fn monthly_report(&self, year: i32, month: MonthIndex) -> MonthlyReport {
        MonthlyReport::build(&self.technicians, year, month)
    }

    /// Registers a callback invoked with the new roster after every
    /// committed change
    pub fn subscribe(&mut self, callback: impl Fn(&[Technician]) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// # Errors
    /// Returns `StoreError::EmptyName` for a blank name, or
    /// `StoreError::Repository` if the change cannot be saved.
    pub fn create_technician(&mut self, name: &str) -> Result<TechnicianId, StoreError> {
        let technician = Technician::new(clean_name(name)?);
        let id = technician.id.clone();

        let mut next = self.technicians.clone();
        next.push(technician);
        self.commit(next, "create_technician")?;
        Ok(id)
    }

    /// # Errors
    /// Returns `StoreError::EmptyName`, `StoreError::UnknownTechnician`, or
    /// `StoreError::Repository` if the change cannot be saved.
    pub fn rename_technician(&mut self, id: &TechnicianId, name: &str) -> Result<(), StoreError> {
        let name = clean_name(name)?;
        let index = self.position(id)?;

        let mut next = self.technicians.clone();
        next[index].name = name;
        self.commit(next, "rename_technician")
    }

    /// Removes the technician together with all of their trips
    ///
    /// # Errors
    /// Returns `StoreError::UnknownTechnician` or `StoreError::Repository`.
    pub fn delete_technician(&mut self, id: &TechnicianId) -> Result<(), StoreError> {
        let index = self.position(id)?;

        let mut next = self.technicians.clone();
        next.remove(index);
        self.commit(next, "delete_technician")
    }

    /// Replaces one technician's whole trip list
    ///
    /// # Errors
    /// Returns `StoreError::UnknownTechnician`, `StoreError::Range` if any
    /// trip ends before it starts, `StoreError::DuplicateGroup` if two trips
    /// share a group, or `StoreError::Repository`.
    pub fn replace_trip_list(&mut self, id: &TechnicianId, trips: Vec<Trip>) -> Result<(), StoreError> {
        let index = self.position(id)?;
        validate_trips(&trips)?;

        let mut next = self.technicians.clone();
        next[index].trips = trips;
        self.commit(next, "replace_trip_list")
    }

    /// Creates one trip per selected technician, all sharing a new group id
    /// and a single color.
    ///
    /// # Errors
    /// Returns `StoreError::NoTechniciansSelected`,
    /// `StoreError::UnknownTechnician`, `StoreError::Range`, or
    /// `StoreError::Repository`.
    pub fn add_trip_group(&mut self, draft: &TripGroupDraft) -> Result<GroupId, StoreError> {
        let span = self.validate_draft(draft)?;
        let group_id = GroupId::generate();
        let color = self.colors.next_color();

        let mut next = self.technicians.clone();
        assign_group(&mut next, &group_id, span, draft, &color);
        self.commit(next, "add_trip_group")?;
        Ok(group_id)
    }

    /// Rewrites a trip group: it is removed from everyone and re-created
    /// for the draft's technicians with a fresh color. The group id is kept.
    ///
    /// # Errors
    /// Returns `StoreError::UnknownGroup` plus the errors of
    /// [`Self::add_trip_group`].
    pub fn update_trip_group(&mut self, group_id: &GroupId, draft: &TripGroupDraft) -> Result<(), StoreError> {
        self.ensure_group(group_id)?;
        let span = self.validate_draft(draft)?;
        let color = self.colors.next_color();

        let mut next = self.technicians.clone();
        strip_group(&mut next, group_id);
        assign_group(&mut next, group_id, span, draft, &color);
        self.commit(next, "update_trip_group")
    }

    /// Removes a trip group from every technician
    ///
    /// # Errors
    /// Returns `StoreError::UnknownGroup` or `StoreError::Repository`.
    pub fn remove_trip_group(&mut self, group_id: &GroupId) -> Result<(), StoreError> {
        self.ensure_group(group_id)?;

        let mut next = self.technicians.clone();
        strip_group(&mut next, group_id);
        self.commit(next, "remove_trip_group")
    }

    /// Applies a parsed free-text request.
    ///
    /// The trip goes to the first technician whose name contains the
    /// requested name, ignoring case; otherwise a technician with that name
    /// is created. Returns the id of the technician that received the trip.
    ///
    /// # Errors
    /// Returns `StoreError::EmptyName`, `StoreError::Range`, or
    /// `StoreError::Repository`.
    pub fn apply_trip_request(&mut self, request: &TripRequest) -> Result<TechnicianId, StoreError> {
        let name = clean_name(&request.technician_name)?;
        let span = TripSpan::new(request.start_date, request.end_date)?;
        let trip = Trip::new(
            GroupId::generate(),
            span,
            clean_destination(request.destination.as_deref()),
            self.colors.next_color(),
        );

        let needle = name.to_lowercase();
        let mut next = self.technicians.clone();
        let id = if let Some(existing) = next.iter_mut().find(|t| t.name.to_lowercase().contains(&needle)) {
            existing.trips.push(trip);
            existing.id.clone()
        } else {
            let mut created = Technician::new(name);
            created.trips.push(trip);
            let id = created.id.clone();
            next.push(created);
            id
        };

        self.commit(next, "apply_trip_request")?;
        Ok(id)
    }

    fn position(&self, id: &TechnicianId) -> Result<usize, StoreError> {
        self.technicians
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| StoreError::UnknownTechnician(id.clone()))
    }

    fn ensure_group(&self, group_id: &GroupId) -> Result<(), StoreError> {
        if self.technicians.iter().any(|t| t.has_group(group_id)) {
            Ok(())
        } else {
            Err(StoreError::UnknownGroup(group_id.clone()))
        }
    }

    fn validate_draft(&self, draft: &TripGroupDraft) -> Result<TripSpan, StoreError> {
        if draft.technician_ids.is_empty() {
            return Err(StoreError::NoTechniciansSelected);
        }
        for id in &draft.technician_ids {
            self.position(id)?;
        }
        Ok(TripSpan::new(draft.start_date, draft.end_date)?)
    }

    fn commit(&mut self, next: Vec<Technician>, action: &'static str) -> Result<(), StoreError> {
        if let Err(err) = self.repository.save(&next) {
            error!(error = %err, action, "failed to save schedule, keeping previous state");
            return Err(err.into());
        }

        self.technicians = next;
        info!(action, technicians = self.technicians.len(), "schedule updated");

        for (_, subscriber) in &self.subscribers {
            subscriber(self.technicians.as_slice());
        }
        Ok(())
    }
}

/// A technician holds at most one trip per group, and every trip is ordered
fn validate_trips(trips: &[Trip]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(trips.len());
    for trip in trips {
        trip.span()?;
        if !seen.insert(&trip.group_id) {
            return Err(StoreError::DuplicateGroup(trip.group_id.clone()));
        }
    }
    Ok(())
}

fn validate_roster(technicians: &[Technician]) -> Result<(), StoreError> {
    technicians.iter().try_for_each(|technician| validate_trips(&technician.trips))
}

fn strip_group(technicians: &mut [Technician], group_id: &GroupId) {
    for technician in technicians {
        technician.trips.retain(|trip| &trip.group_id != group_id);
    }
}

fn assign_group(
    technicians: &mut [Technician],
    group_id: &GroupId,
    span: TripSpan,
    draft: &TripGroupDraft,
    color: &str,
) {
    let destination = clean_destination(draft.destination.as_deref());
    for technician in technicians.iter_mut().filter(|t| draft.technician_ids.contains(&t.id)) {
        technician
            .trips
            .push(Trip::new(group_id.clone(), span, destination.clone(), color.to_owned()));
    }
}
