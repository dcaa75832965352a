//! The in-memory record store: one immutable, fully parsed dataset.

use crate::dataset::error::DatasetError;
use crate::dataset::loader::load_csv;
use crate::dataset::schema::{
    DatasetSchema, COL_CATEGORY, COL_DATETIME, COL_PM25, COL_STATION, COL_TIME_OF_DAY,
};
use crate::error::AqStatError;
use crate::filtering::AqFrameFilterExt;
use crate::types::reading::Reading;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;

/// Converts a Polars `Date` physical value (days since 1970-01-01) to a
/// `NaiveDate`. `from_num_days_from_ce` counts from 0001-01-01, hence the
/// epoch offset.
pub(crate) fn days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + 719_163)
}

/// Converts a Polars `Datetime` physical value to a `NaiveDateTime`,
/// honoring the column's time unit.
pub(crate) fn timestamp_to_datetime(value: i64, time_unit: TimeUnit) -> Option<NaiveDateTime> {
    let utc = match time_unit {
        TimeUnit::Milliseconds => chrono::DateTime::from_timestamp_millis(value),
        TimeUnit::Microseconds => chrono::DateTime::from_timestamp_micros(value),
        TimeUnit::Nanoseconds => Some(chrono::DateTime::from_timestamp_nanos(value)),
    };
    utc.map(|dt| dt.naive_utc())
}

/// An ordered, immutable collection of air-quality readings.
///
/// A `Dataset` is loaded once per process (see [`Dataset::load`]) and then
/// only ever passed by reference; filtering and aggregation always produce
/// new values and never mutate the store. Construct one directly from typed
/// rows with [`Dataset::from_readings`] to substitute a fresh dataset in
/// tests.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Loads and parses the source CSV at `path`.
    ///
    /// The configured columns are renamed to canonical names and the
    /// timestamp column is parsed strictly; see [`DatasetError`] for the
    /// failure modes. Intended to run once at startup, with the result kept
    /// for the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::FileNotFound`] when `path` does not exist,
    /// [`DatasetError::CsvRead`] when the file cannot be parsed as CSV,
    /// [`DatasetError::MissingColumn`] when a configured column is absent and
    /// [`DatasetError::TimestampParse`] when any timestamp fails to parse.
    pub fn load(path: impl AsRef<Path>, schema: &DatasetSchema) -> Result<Self, DatasetError> {
        Ok(Self::new(load_csv(path.as_ref(), schema)?))
    }

    /// Builds a dataset from typed rows.
    pub fn from_readings(readings: &[Reading]) -> Result<Self, AqStatError> {
        let timestamps: Vec<NaiveDateTime> = readings.iter().map(|r| r.timestamp).collect();
        let stations: Vec<&str> = readings.iter().map(|r| r.station.as_str()).collect();
        let pm25: Vec<Option<f64>> = readings.iter().map(|r| r.pm25).collect();
        let categories: Vec<&str> = readings.iter().map(|r| r.aqi_category.as_str()).collect();
        let times: Vec<&str> = readings.iter().map(|r| r.time_of_day.as_str()).collect();

        let df = DataFrame::new(vec![
            Column::new(COL_DATETIME.into(), timestamps),
            Column::new(COL_STATION.into(), stations),
            Column::new(COL_PM25.into(), pm25),
            Column::new(COL_CATEGORY.into(), categories),
            Column::new(COL_TIME_OF_DAY.into(), times),
        ])?;
        Ok(Self::new(df))
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// The underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// A lazy view over the underlying frame for further Polars operations.
    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    /// The observed `[min, max]` calendar-date bounds of the dataset, or
    /// `None` when the dataset is empty. The presentation layer constrains
    /// its date picker to these bounds.
    pub fn date_bounds(&self) -> Result<Option<(NaiveDate, NaiveDate)>, AqStatError> {
        if self.is_empty() {
            return Ok(None);
        }
        let bounds = self
            .lazy()
            .select([
                col(COL_DATETIME).cast(DataType::Date).min().alias("min"),
                col(COL_DATETIME).cast(DataType::Date).max().alias("max"),
            ])
            .collect()?;

        let min = bounds.column("min")?.date()?.get(0);
        let max = bounds.column("max")?.date()?.get(0);
        Ok(min.and_then(days_to_date).zip(max.and_then(days_to_date)))
    }

    /// Retains exactly the readings whose timestamp's calendar date lies in
    /// `[start, end]`, both bounds inclusive.
    ///
    /// A range with no matching readings yields an empty dataset, not an
    /// error; every aggregation tolerates the empty case. The input dataset
    /// is not modified.
    pub fn filter_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Dataset, AqStatError> {
        let df = self.lazy().filter_date_range(start, end).collect()?;
        Ok(Dataset::new(df))
    }

    /// Exports the dataset as typed rows, in stored order.
    pub fn readings(&self) -> Result<Vec<Reading>, AqStatError> {
        let datetimes = self.df.column(COL_DATETIME)?.datetime()?;
        let time_unit = datetimes.time_unit();
        let stations = self.df.column(COL_STATION)?.str()?;
        let pm25 = self.df.column(COL_PM25)?.f64()?;
        let categories = self.df.column(COL_CATEGORY)?.str()?;
        let times = self.df.column(COL_TIME_OF_DAY)?.str()?;

        let mut rows = Vec::with_capacity(self.len());
        for idx in 0..self.len() {
            let timestamp = datetimes
                .get(idx)
                .and_then(|v| timestamp_to_datetime(v, time_unit));
            let Some(timestamp) = timestamp else {
                // Load-time parsing guarantees a timestamp per row.
                continue;
            };
            rows.push(Reading {
                timestamp,
                station: stations.get(idx).unwrap_or_default().to_string(),
                pm25: pm25.get(idx),
                aqi_category: categories.get(idx).unwrap_or_default().to_string(),
                time_of_day: times.get(idx).unwrap_or_default().to_string(),
            });
        }
        Ok(rows)
    }
}
