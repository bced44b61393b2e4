//! Trip bars drawn over the month grid, one row per technician.

use chrono::NaiveDate;
use serde::Serialize;

use crate::consts::TRIP_LABEL_FALLBACK;
use crate::grid::{Day, MonthGrid};
use crate::range::is_in_trip;
use crate::types::{GroupId, Technician, TechnicianRef, Trip, TripId};

/// How a single (technician, day) cell renders its trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripBar {
    pub trip_id:  TripId,
    pub group_id: GroupId,
    pub color:    String,
    /// Set on the cell that opens the bar and on the first cell of each
    /// wrapped row
    pub label:    Option<String>,
    /// Left cap: the cell is the trip's first day
    pub is_start: bool,
    /// Right cap: the cell is the trip's last day
    pub is_end:   bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnicianRow {
    pub technician: TechnicianRef,
    /// One entry per grid cell, in grid order
    pub cells:      Vec<Option<TripBar>>,
}

/// First trip, in stored order, whose range contains `date`
pub fn active_trip(technician: &Technician, date: NaiveDate) -> Option<&Trip> {
    technician
        .trips
        .iter()
        .find(|trip| is_in_trip(date, trip.start_date, trip.end_date))
}

/// Bar for the cell at `column` (0 = Sunday) of a grid row, if the
/// technician travels that day.
pub fn trip_bar(technician: &Technician, day: &Day, column: usize) -> Option<TripBar> {
    let trip = active_trip(technician, day.date)?;
    let is_start = trip.start_date == day.date;
    let is_end = trip.end_date == day.date;
    let wrapped = column == 0 && !is_end;

    let label = (is_start || wrapped).then(|| trip.known_destination().unwrap_or(TRIP_LABEL_FALLBACK).to_owned());

    Some(TripBar {
        trip_id: trip.id.clone(),
        group_id: trip.group_id.clone(),
        color: trip.color.clone(),
        label,
        is_start,
        is_end,
    })
}

/// Overlays every technician's trips on the grid
pub fn overlay_month(grid: &MonthGrid, technicians: &[Technician]) -> Vec<TechnicianRow> {
    technicians
        .iter()
        .map(|technician| TechnicianRow {
            technician: technician.reference(),
            cells:      grid
                .weeks
                .iter()
                .flat_map(|week| {
                    week.days
                        .iter()
                        .enumerate()
                        .map(|(column, day)| trip_bar(technician, day, column))
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build_month_on;
    use crate::test_utils::{iso, month, technician, trip};

    fn june_2026() -> MonthGrid {
        build_month_on(2026, month(5), iso("2026-06-01")).expect("failed to build June grid")
    }

    fn bars_by_date(grid: &MonthGrid, row: &TechnicianRow) -> Vec<(NaiveDate, TripBar)> {
        grid.days()
            .zip(&row.cells)
            .filter_map(|(day, cell)| cell.clone().map(|bar| (day.date, bar)))
            .collect()
    }

    #[test]
    fn test_active_trip_prefers_stored_order() {
        let t = technician(
            "1",
            "João Silva",
            vec![
                trip("first", "g1", "2026-06-10", "2026-06-15", None),
                trip("second", "g2", "2026-06-12", "2026-06-20", None),
            ],
        );
        let found = active_trip(&t, iso("2026-06-13")).expect("expected an active trip");
        assert_eq!(found.id, TripId::from("first"));
        let found = active_trip(&t, iso("2026-06-18")).expect("expected an active trip");
        assert_eq!(found.id, TripId::from("second"));
        assert!(active_trip(&t, iso("2026-06-21")).is_none());
    }

    #[test]
    fn test_bar_caps_and_label_within_one_row() {
        // Wednesday 10 to Monday 15 June crosses the row break on Sunday 14
        let grid = june_2026();
        let t = technician(
            "1",
            "João",
            vec![trip("a", "g1", "2026-06-10", "2026-06-15", Some("Recife"))],
        );
        let rows = overlay_month(&grid, &[t]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), grid.days().count());

        let bars = bars_by_date(&grid, &rows[0]);
        let dates: Vec<NaiveDate> = bars.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, iso("2026-06-10").iter_days().take(6).collect::<Vec<_>>());

        let (_, first) = &bars[0];
        assert!(first.is_start && !first.is_end);
        assert_eq!(first.label.as_deref(), Some("Recife"));

        let (_, middle) = &bars[1];
        assert!(!middle.is_start && !middle.is_end);
        assert_eq!(middle.label, None);

        // Sunday 14 opens a new row: label repeated
        let (sunday, wrapped) = &bars[4];
        assert_eq!(*sunday, iso("2026-06-14"));
        assert_eq!(wrapped.label.as_deref(), Some("Recife"));

        let (_, last) = &bars[5];
        assert!(last.is_end && !last.is_start);
        assert_eq!(last.label, None);
    }

    #[test]
    fn test_trip_ending_on_sunday_shows_no_wrapped_label() {
        let grid = june_2026();
        let t = technician("1", "João", vec![trip("a", "g1", "2026-06-11", "2026-06-14", None)]);
        let rows = overlay_month(&grid, &[t]);
        let bars = bars_by_date(&grid, &rows[0]);

        let (sunday, bar) = bars.last().expect("expected bars");
        assert_eq!(*sunday, iso("2026-06-14"));
        assert!(bar.is_end);
        assert_eq!(bar.label, None);
        assert_eq!(bars[0].1.label.as_deref(), Some(TRIP_LABEL_FALLBACK));
    }

    #[test]
    fn test_single_day_trip_has_both_caps() {
        let grid = june_2026();
        let t = technician("1", "João", vec![trip("a", "g1", "2026-06-14", "2026-06-14", Some("Natal"))]);
        let rows = overlay_month(&grid, &[t]);
        let bars = bars_by_date(&grid, &rows[0]);

        assert_eq!(bars.len(), 1);
        let (_, bar) = &bars[0];
        assert!(bar.is_start && bar.is_end);
        assert_eq!(bar.label.as_deref(), Some("Natal"));
    }

    #[test]
    fn test_caps_compare_full_dates() {
        // Same day-of-month in another month must not produce a cap
        let grid = june_2026();
        let t = technician("1", "João", vec![trip("a", "g1", "2026-05-10", "2026-07-10", None)]);
        let rows = overlay_month(&grid, &[t]);
        let bars = bars_by_date(&grid, &rows[0]);

        assert_eq!(bars.len(), grid.days().count());
        assert!(bars.iter().all(|(_, bar)| !bar.is_start && !bar.is_end));
    }

    #[test]
    fn test_padding_days_are_overlaid() {
        let grid = june_2026();
        let t = technician("1", "João", vec![trip("a", "g1", "2026-05-28", "2026-06-03", None)]);
        let rows = overlay_month(&grid, &[t]);
        let first = rows[0].cells[0].as_ref().expect("May 31 should carry the bar");
        assert!(!first.is_start);
        assert_eq!(first.label.as_deref(), Some(TRIP_LABEL_FALLBACK));
    }

    #[test]
    fn test_rows_follow_technician_order() {
        let grid = june_2026();
        let technicians = vec![technician("1", "João", vec![]), technician("2", "Maria", vec![])];
        let rows = overlay_month(&grid, &technicians);
        let names: Vec<&str> = rows.iter().map(|r| r.technician.name.as_str()).collect();
        assert_eq!(names, vec!["João", "Maria"]);
        assert!(rows.iter().all(|r| r.cells.iter().all(Option::is_none)));
    }
}
