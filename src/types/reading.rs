use chrono::NaiveDateTime;

/// One row of the source dataset.
///
/// The timestamp drives all time-based grouping; the PM2.5 concentration may
/// be missing and is skipped by every mean computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub station: String,
    pub pm25: Option<f64>,
    pub aqi_category: String,
    pub time_of_day: String,
}
