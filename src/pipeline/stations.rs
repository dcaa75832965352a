//! Per-station summaries and rankings.

use crate::dataset::schema::{COL_AVG_PM25, COL_COUNT, COL_PM25, COL_STATION};
use crate::dataset::store::Dataset;
use crate::error::AqStatError;
use crate::filtering::AqFrameFilterExt;
use polars::prelude::*;
use std::cmp::Ordering;

/// Number of entries in the default rankings.
pub const DEFAULT_TOP_N: usize = 5;

/// One station's mean PM2.5 over the active range.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMean {
    pub station: String,
    pub avg_pm25: f64,
}

/// One station's reading count within a single AQI category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationCount {
    pub station: String,
    pub count: u32,
}

/// Mean PM2.5 per station, recomputed per filter change.
///
/// Entries keep the order of first appearance in the input, which makes the
/// tie-breaking of [`StationSummary::top_n_worst`] and
/// [`StationSummary::top_n_best`] deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StationSummary {
    entries: Vec<StationMean>,
}

impl StationSummary {
    /// The per-station means in first-appearance order.
    pub fn entries(&self) -> &[StationMean] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The mean PM2.5 for one station, if present.
    pub fn get(&self, station: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.station == station)
            .map(|e| e.avg_pm25)
    }

    /// The `n` stations with the highest mean PM2.5, non-increasing.
    ///
    /// Fewer entries are returned when the summary has fewer distinct
    /// stations; ties keep first-appearance order (stable sort).
    pub fn top_n_worst(&self, n: usize) -> Vec<StationMean> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| {
            b.avg_pm25
                .partial_cmp(&a.avg_pm25)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }

    /// The `n` stations with the lowest mean PM2.5, non-decreasing.
    pub fn top_n_best(&self, n: usize) -> Vec<StationMean> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| {
            a.avg_pm25
                .partial_cmp(&b.avg_pm25)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }

    /// The station with the highest mean PM2.5.
    pub fn worst(&self) -> Option<StationMean> {
        self.top_n_worst(1).into_iter().next()
    }

    /// The station with the lowest mean PM2.5.
    pub fn best(&self) -> Option<StationMean> {
        self.top_n_best(1).into_iter().next()
    }
}

/// Mean PM2.5 grouped by station, one entry per distinct station in the
/// input. Stations whose readings are all missing produce no entry. An empty
/// dataset yields an empty summary.
pub fn station_summary(dataset: &Dataset) -> Result<StationSummary, AqStatError> {
    let df = dataset
        .lazy()
        .group_by_stable([col(COL_STATION)])
        .agg([col(COL_PM25).mean().alias(COL_AVG_PM25)])
        .drop_nulls(Some(vec![col(COL_AVG_PM25)]))
        .collect()?;

    let stations = df.column(COL_STATION)?.str()?;
    let means = df.column(COL_AVG_PM25)?.f64()?;

    let mut entries = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if let (Some(station), Some(avg_pm25)) = (stations.get(idx), means.get(idx)) {
            entries.push(StationMean {
                station: station.to_string(),
                avg_pm25,
            });
        }
    }
    Ok(StationSummary { entries })
}

/// Counts readings per station within one AQI category and returns the top
/// `n` stations by count, descending.
///
/// Returns an empty ranking (not an error) when no readings match the
/// category. Ties keep first-appearance order.
pub fn top_stations_for_category(
    dataset: &Dataset,
    category: &str,
    n: usize,
) -> Result<Vec<StationCount>, AqStatError> {
    let df = dataset
        .lazy()
        .filter_category(category)
        .group_by_stable([col(COL_STATION)])
        .agg([len().cast(DataType::UInt32).alias(COL_COUNT)])
        .collect()?;

    let stations = df.column(COL_STATION)?.str()?;
    let counts = df.column(COL_COUNT)?.u32()?;

    let mut ranking = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if let (Some(station), Some(count)) = (stations.get(idx), counts.get(idx)) {
            ranking.push(StationCount {
                station: station.to_string(),
                count,
            });
        }
    }
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(n);
    Ok(ranking)
}
