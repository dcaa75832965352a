pub mod category;
pub mod frequency;
pub mod reading;
pub mod time_of_day;
