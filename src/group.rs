use std::collections::HashMap;

use crate::types::{GroupId, GroupedTrip, MonthIndex, Technician};

/// Folds every technician's trips into one entry per group id.
///
/// The first trip seen for a group provides its dates, destination and
/// color; participants are listed in technician order. The result is sorted
/// by start date and keeps first-seen order on ties.
pub fn group_trips(technicians: &[Technician]) -> Vec<GroupedTrip> {
    let mut groups: Vec<GroupedTrip> = Vec::new();
    let mut positions: HashMap<&GroupId, usize> = HashMap::new();

    for technician in technicians {
        for trip in &technician.trips {
            let position = *positions.entry(&trip.group_id).or_insert_with(|| {
                groups.push(GroupedTrip::seed(trip));
                groups.len() - 1
            });
            groups[position].technicians.push(technician.reference());
        }
    }

    groups.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    groups
}

/// Groups that start or end in the given month. A trip crossing a month
/// boundary is kept for both months.
pub fn trips_for_month(groups: &[GroupedTrip], year: i32, month: MonthIndex) -> Vec<GroupedTrip> {
    groups.iter().filter(|group| group.touches_month(year, month)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DESTINATION_PLACEHOLDER;
    use crate::test_utils::{iso, month, technician, trip};

    #[test]
    fn test_shared_group_lists_both_technicians_in_input_order() {
        let technicians = vec![
            technician("1", "João Silva", vec![trip("a", "g1", "2026-06-10", "2026-06-15", Some("Recife"))]),
            technician("2", "Maria Santos", vec![trip("b", "g1", "2026-06-10", "2026-06-15", Some("Recife"))]),
        ];

        let groups = group_trips(&technicians);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_id, GroupId::from("g1"));
        assert_eq!(groups[0].technician_names(), vec!["João Silva", "Maria Santos"]);
        assert_eq!(groups[0].destination, "Recife");
    }

    #[test]
    fn test_first_sighting_seeds_group_fields() {
        let mut second = trip("b", "g1", "2026-07-01", "2026-07-09", Some("Natal"));
        second.color = "#000000".to_owned();
        let technicians = vec![
            technician("1", "João Silva", vec![trip("a", "g1", "2026-06-10", "2026-06-15", None)]),
            technician("2", "Maria Santos", vec![second]),
        ];

        let groups = group_trips(&technicians);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].start_date, iso("2026-06-10"));
        assert_eq!(groups[0].end_date, iso("2026-06-15"));
        assert_eq!(groups[0].destination, DESTINATION_PLACEHOLDER);
        assert_eq!(groups[0].color, "#4f46e5");
    }

    #[test]
    fn test_groups_sorted_by_start_date() {
        let technicians = vec![
            technician(
                "1",
                "João Silva",
                vec![
                    trip("a", "late", "2026-09-01", "2026-09-03", None),
                    trip("b", "early", "2026-02-01", "2026-02-03", None),
                ],
            ),
            technician("2", "Maria Santos", vec![trip("c", "middle", "2026-05-01", "2026-05-02", None)]),
        ];

        let ids: Vec<String> = group_trips(&technicians).into_iter().map(|g| g.group_id.into()).collect();
        assert_eq!(ids, vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let technicians = vec![
            technician(
                "1",
                "João Silva",
                vec![
                    trip("a", "second-seen", "2026-06-01", "2026-06-02", None),
                    trip("b", "first-tie", "2026-05-01", "2026-05-02", None),
                ],
            ),
            technician(
                "2",
                "Maria Santos",
                vec![
                    trip("c", "second-tie", "2026-05-01", "2026-05-09", None),
                    trip("d", "third-tie", "2026-05-01", "2026-05-03", None),
                ],
            ),
        ];

        let ids: Vec<String> = group_trips(&technicians).into_iter().map(|g| g.group_id.into()).collect();
        assert_eq!(ids, vec!["first-tie", "second-tie", "third-tie", "second-seen"]);
    }

    #[test]
    fn test_no_trips_yields_no_groups() {
        let technicians = vec![technician("1", "João Silva", vec![])];
        assert!(group_trips(&technicians).is_empty());
        assert!(group_trips(&[]).is_empty());
    }

    #[test]
    fn test_month_filter_keeps_boundary_crossing_trip_in_both_months() {
        let technicians = vec![technician(
            "1",
            "João Silva",
            vec![
                trip("a", "crossing", "2026-05-28", "2026-06-03", None),
                trip("b", "june-only", "2026-06-10", "2026-06-12", None),
                trip("c", "other-year", "2025-05-10", "2025-05-12", None),
            ],
        )];
        let groups = group_trips(&technicians);

        let may: Vec<String> = trips_for_month(&groups, 2026, month(4))
            .into_iter()
            .map(|g| g.group_id.into())
            .collect();
        assert_eq!(may, vec!["crossing"]);

        let june: Vec<String> = trips_for_month(&groups, 2026, month(5))
            .into_iter()
            .map(|g| g.group_id.into())
            .collect();
        assert_eq!(june, vec!["crossing", "june-only"]);
    }

    #[test]
    fn test_month_filter_excludes_trip_spanning_over_the_month() {
        // Neither endpoint lies in June
        let technicians = vec![technician(
            "1",
            "João Silva",
            vec![trip("a", "long", "2026-05-20", "2026-07-10", None)],
        )];
        let groups = group_trips(&technicians);
        assert!(trips_for_month(&groups, 2026, month(5)).is_empty());
    }
}
