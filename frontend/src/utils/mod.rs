pub mod calendar;
pub mod polling;
pub mod storage;
pub mod time;
