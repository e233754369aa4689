pub mod attendance_modal;
pub mod attendance_table;
pub mod field_trip_modal;
pub mod filters;
pub mod stats_cards;

pub use attendance_modal::AttendanceModal;
pub use attendance_table::AttendanceTable;
pub use field_trip_modal::FieldTripModal;
pub use filters::MonthYearFilters;
pub use stats_cards::StatsCards;
