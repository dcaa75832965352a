//! Defines the resampling frequencies supported by the aggregation pipeline
//! and the per-frequency period labels attached to resampled buckets.

use chrono::NaiveDate;
use std::fmt;

/// The calendar bucket width used when resampling PM2.5 readings.
///
/// Each variant carries its own period-label encoding (see [`Period`]):
/// hourly buckets are labeled by hour of day, daily buckets by calendar date,
/// monthly buckets by `YYYY-MM`, yearly buckets by the year number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Hour-of-day buckets (0..=23), aggregated across all days in the range.
    Hourly,
    /// One bucket per calendar day.
    Daily,
    /// One bucket per calendar month.
    Monthly,
    /// One bucket per calendar year.
    Yearly,
}

impl Frequency {
    /// The lowercase name of this frequency, e.g. for log lines and chart
    /// titles.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Hourly => "hourly",
            Frequency::Daily => "daily",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The label of one resampled bucket.
///
/// The encoding follows the bucket's [`Frequency`]: an hour of day, a
/// calendar date, a year/month pair (displayed as `YYYY-MM`) or a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    /// Hour of day, 0..=23.
    Hour(u32),
    /// Calendar day.
    Day(NaiveDate),
    /// Calendar month, displayed as `YYYY-MM`.
    Month { year: i32, month: u32 },
    /// Calendar year.
    Year(i32),
}

impl Period {
    /// The calendar date, if this is a daily period label.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Period::Day(date) => Some(*date),
            _ => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Hour(hour) => write!(f, "{}", hour),
            Period::Day(date) => write!(f, "{}", date),
            Period::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            Period::Year(year) => write!(f, "{}", year),
        }
    }
}
