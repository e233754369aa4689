pub mod date_panel;

pub use date_panel::DateAttendancePanel;
