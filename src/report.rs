use std::fmt;

use serde::Serialize;

use crate::consts::{DISPLAY_DATE_FORMAT, NAME_SEPARATOR};
use crate::group::{group_trips, trips_for_month};
use crate::types::{GroupedTrip, MonthIndex, Technician};

const HEADERS: [&str; 5] = ["Técnico(s)", "Destino", "Saída", "Retorno", "Dias"];

/// One table line, already formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub technicians: String,
    pub destination: String,
    pub start:       String,
    pub end:         String,
    pub days:        i64,
}

impl From<&GroupedTrip> for ReportRow {
    fn from(group: &GroupedTrip) -> Self {
        Self {
            technicians: group.technician_names().join(NAME_SEPARATOR),
            destination: group.destination.clone(),
            start:       group.start_date.format(DISPLAY_DATE_FORMAT).to_string(),
            end:         group.end_date.format(DISPLAY_DATE_FORMAT).to_string(),
            days:        group.duration(),
        }
    }
}

/// Trips of one month, shared by the on-screen list and the print view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyReport {
    /// Printed above the title, e.g. "Gestor de Viagens de Técnicos 2026"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    /// e.g. "junho / 2026"
    pub title:   String,
    pub rows:    Vec<ReportRow>,
}

impl MonthlyReport {
    pub fn build(technicians: &[Technician], year: i32, month: MonthIndex) -> Self {
        let groups = group_trips(technicians);
        Self::from_groups(&groups, year, month)
    }

    /// Builds the report from already grouped trips
    pub fn from_groups(groups: &[GroupedTrip], year: i32, month: MonthIndex) -> Self {
        Self {
            heading: None,
            title:   format!("{} / {year}", month.name()),
            rows:    trips_for_month(groups, year, month).iter().map(ReportRow::from).collect(),
        }
    }

    /// Sets the heading; a blank heading is dropped
    #[must_use]
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        let heading = heading.into();
        self.heading = Some(heading.trim().to_owned()).filter(|h| !h.is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for MonthlyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(heading) = &self.heading {
            writeln!(f, "{heading}")?;
        }
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", HEADERS.join(" | "))?;
        for row in &self.rows {
            writeln!(
                f,
                "{} | {} | {} | {} | {}",
                row.technicians, row.destination, row.start, row.end, row.days
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{month, technician, trip};

    fn sample() -> Vec<Technician> {
        vec![
            technician(
                "1",
                "João Silva",
                vec![
                    trip("a", "g1", "2026-05-28", "2026-06-03", Some("Recife")),
                    trip("b", "g2", "2026-06-10", "2026-06-20", None),
                ],
            ),
            technician("2", "Maria Santos", vec![trip("c", "g1", "2026-05-28", "2026-06-03", Some("Recife"))]),
        ]
    }

    #[test]
    fn test_rows_are_formatted_for_display() {
        let report = MonthlyReport::build(&sample(), 2026, month(5));

        assert_eq!(report.title, "junho / 2026");
        assert_eq!(
            report.rows,
            vec![
                ReportRow {
                    technicians: "João Silva, Maria Santos".to_owned(),
                    destination: "Recife".to_owned(),
                    start:       "28/05/2026".to_owned(),
                    end:         "03/06/2026".to_owned(),
                    days:        7,
                },
                ReportRow {
                    technicians: "João Silva".to_owned(),
                    destination: "Sem destino".to_owned(),
                    start:       "10/06/2026".to_owned(),
                    end:         "20/06/2026".to_owned(),
                    days:        11,
                },
            ]
        );
    }

    #[test]
    fn test_may_report_includes_crossing_trip() {
        let report = MonthlyReport::build(&sample(), 2026, month(4));
        assert_eq!(report.title, "maio / 2026");
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].destination, "Recife");
    }

    #[test]
    fn test_heading_is_printed_above_title() {
        let report = MonthlyReport::build(&sample(), 2026, month(4)).with_heading("Gestor de Viagens de Técnicos 2026");
        let rendered = report.to_string();
        let lines: Vec<&str> = rendered.lines().take(2).collect();
        assert_eq!(lines, vec!["Gestor de Viagens de Técnicos 2026", "maio / 2026"]);

        let blank = MonthlyReport::build(&sample(), 2026, month(4)).with_heading("  ");
        assert_eq!(blank.heading, None);
        assert!(blank.to_string().starts_with("maio / 2026\n"));
    }

    #[test]
    fn test_empty_month() {
        let report = MonthlyReport::build(&sample(), 2026, month(0));
        assert!(report.is_empty());
    }

    #[test]
    fn test_display_table() {
        let report = MonthlyReport::build(&sample(), 2026, month(4));
        let rendered = report.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "maio / 2026",
                "Técnico(s) | Destino | Saída | Retorno | Dias",
                "João Silva, Maria Santos | Recife | 28/05/2026 | 03/06/2026 | 7",
            ]
        );
    }
}
