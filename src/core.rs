pub mod device;
pub mod error;
pub mod savings;
pub mod schedule;
pub mod series;
pub mod time_of_day;
pub mod toggle;
