pub mod categories;
pub mod insights;
pub mod resample;
pub mod stations;
pub mod time_of_day;
