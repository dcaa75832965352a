//! Headline figures for the report: the numbers the dashboard shows as
//! metrics and "key insights" text next to the charts.

use crate::pipeline::resample::PeriodMean;
use crate::pipeline::stations::{StationMean, StationSummary};
use chrono::NaiveDate;

/// Headline figures over the active date range.
///
/// All statistics are derived from the daily mean series (not the raw
/// readings), matching what the dashboard displays: `avg_pm25` is the mean
/// of the daily means, `max_pm25`/`min_pm25` their extremes and `peak_day`
/// the day with the highest daily mean.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyInsights {
    pub avg_pm25: f64,
    pub max_pm25: f64,
    pub min_pm25: f64,
    /// The calendar day with the highest daily mean PM2.5.
    pub peak_day: NaiveDate,
    /// Difference between the last and the previous monthly mean; 0 when the
    /// range spans fewer than two months.
    pub month_delta: f64,
    pub worst_station: StationMean,
    pub best_station: StationMean,
}

/// Derives the headline figures from already-computed pipeline views.
///
/// Returns `None` when the range is empty (no daily buckets or no station
/// means), leaving the empty-case handling to the presentation layer.
pub fn key_insights(
    daily: &[PeriodMean],
    monthly: &[PeriodMean],
    stations: &StationSummary,
) -> Option<KeyInsights> {
    let (worst_station, best_station) = stations.worst().zip(stations.best())?;

    let mut sum = 0.0;
    let mut max_pm25 = f64::NEG_INFINITY;
    let mut min_pm25 = f64::INFINITY;
    let mut peak: Option<(NaiveDate, f64)> = None;
    for bucket in daily {
        sum += bucket.avg_pm25;
        max_pm25 = max_pm25.max(bucket.avg_pm25);
        min_pm25 = min_pm25.min(bucket.avg_pm25);
        let day = bucket.period.as_date()?;
        if peak.map_or(true, |(_, best)| bucket.avg_pm25 > best) {
            peak = Some((day, bucket.avg_pm25));
        }
    }
    let (peak_day, _) = peak?;
    let avg_pm25 = sum / daily.len() as f64;

    let month_delta = if monthly.len() > 1 {
        monthly[monthly.len() - 1].avg_pm25 - monthly[monthly.len() - 2].avg_pm25
    } else {
        0.0
    };

    Some(KeyInsights {
        avg_pm25,
        max_pm25,
        min_pm25,
        peak_day,
        month_delta,
        worst_station,
        best_station,
    })
}
