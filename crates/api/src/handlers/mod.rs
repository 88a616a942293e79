pub mod approval;
pub mod calendar;
pub mod calendar_row;
