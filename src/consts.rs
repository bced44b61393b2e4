/// Smallest year accepted by the grid builder and trip spans
pub const MIN_YEAR: i32 = 1;

/// Largest year accepted by the grid builder and trip spans (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Highest zero-based month index (December)
pub const MAX_MONTH_INDEX: u8 = 11;

/// Number of days in every grid row
pub const DAYS_IN_WEEK: usize = 7;

/// Month names in the display locale (pt-BR), indexed by zero-based month
pub const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Weekday abbreviations in the display locale (pt-BR), Sunday first
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];

/// Destination shown for grouped trips saved without one
pub const DESTINATION_PLACEHOLDER: &str = "Sem destino";

/// Label drawn on a trip bar when the trip has no destination
pub const TRIP_LABEL_FALLBACK: &str = "Viagem";

/// Date format of report cells (dd/MM/yyyy)
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Separator between start and end of a serialized trip span
pub const SPAN_SEPARATOR: char = '/';

/// Separator between technician names in a report row
pub const NAME_SEPARATOR: &str = ", ";

/// First year reachable with the month cursor
pub const DEFAULT_MIN_NAV_YEAR: i32 = 2025;

/// Last year reachable with the month cursor
pub const DEFAULT_MAX_NAV_YEAR: i32 = 2027;

/// Palette a trip color is drawn from
pub const VIBRANT_COLORS: [&str; 20] = [
    "#4f46e5", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", //
    "#ec4899", "#06b6d4", "#f97316", "#84cc16", "#6366f1", //
    "#2dd4bf", "#fb7185", "#a78bfa", "#fbbf24", "#4ade80", //
    "#3b82f6", "#f43f5e", "#8b5cf6", "#14b8a6", "#f97316",
];

/// Roster used when the repository has nothing saved yet
pub(crate) const DEFAULT_ROSTER: [(&str, &str); 3] =
    [("1", "João Silva"), ("2", "Maria Santos"), ("3", "Ricardo Oliveira")];
