//! This module provides the main entry point of the crate: a once-loaded
//! dataset handle plus the per-range report that recomputes every derived
//! view when the user picks a new date range.

use crate::dataset::schema::DatasetSchema;
use crate::dataset::store::Dataset;
use crate::error::AqStatError;
use crate::pipeline::categories::{category_distribution, CategoryTally};
use crate::pipeline::insights::{key_insights, KeyInsights};
use crate::pipeline::resample::{resample, AggregateSeries};
use crate::pipeline::stations::{
    station_summary, top_stations_for_category, StationCount, StationMean, StationSummary,
    DEFAULT_TOP_N,
};
use crate::pipeline::time_of_day::{time_of_day_summary, TimeOfDayMean};
use crate::types::category::{CategorySchema, TallyMode};
use crate::types::frequency::Frequency;
use crate::types::time_of_day::TimeOfDayOrder;
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use std::path::PathBuf;

/// Every derived view over one date range, computed in a single pass.
///
/// A `RangeReport` is what the presentation layer consumes: one value per
/// chart plus the headline [`KeyInsights`]. When the range matches no
/// readings, `rows` is 0, the series and rankings are empty, the category
/// tally is zeroed and `insights` is `None`; the presentation layer is
/// expected to detect this and short-circuit its rendering.
#[derive(Debug, Clone)]
pub struct RangeReport {
    /// Start of the range (inclusive).
    pub start: NaiveDate,
    /// End of the range (inclusive).
    pub end: NaiveDate,
    /// Number of readings in the range.
    pub rows: usize,
    pub hourly: AggregateSeries,
    pub daily: AggregateSeries,
    pub monthly: AggregateSeries,
    pub yearly: AggregateSeries,
    pub stations: StationSummary,
    pub top_worst: Vec<StationMean>,
    pub top_best: Vec<StationMean>,
    pub categories: CategoryTally,
    /// Per-category station rankings, one entry per schema category in
    /// schema order.
    pub category_leaders: Vec<(String, Vec<StationCount>)>,
    pub time_of_day: Vec<TimeOfDayMean>,
    pub insights: Option<KeyInsights>,
}

impl RangeReport {
    /// True when the range matched no readings.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// The main handle for computing air-quality reports.
///
/// Loads the dataset exactly once and keeps it for the process lifetime;
/// every [`AqStat::report`] call filters and aggregates against the same
/// in-memory data with no re-read. The handle is an explicit instance passed
/// by reference, so tests can substitute a fresh dataset via
/// [`AqStat::from_dataset`] instead of relying on cache invalidation.
///
/// # Examples
///
/// ```no_run
/// use aqstat::{AqStat, AqStatError};
///
/// fn run() -> Result<(), AqStatError> {
///     let aqstat = AqStat::load().path("data.csv").call()?;
///     let (min, max) = aqstat.dataset().date_bounds()?.expect("dataset is not empty");
///     let report = aqstat.report().start(min).end(max).call()?;
///     println!("{} readings, {} daily buckets", report.rows, report.daily.len());
///     Ok(())
/// }
/// ```
pub struct AqStat {
    dataset: Dataset,
}

#[bon]
impl AqStat {
    /// Loads the source CSV at `path` into a new handle.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.path(...)`: **Required.** Path of the CSV file.
    /// * `.schema(DatasetSchema)`: Optional. Source column configuration;
    ///   defaults to the shipped dataset's header.
    ///
    /// # Errors
    ///
    /// Returns [`AqStatError::Dataset`] when the file is missing, unreadable,
    /// lacks a configured column or contains an unparseable timestamp. A load
    /// failure is fatal; there is nothing transient to retry.
    #[builder]
    pub fn load(
        #[builder(into)] path: PathBuf,
        schema: Option<DatasetSchema>,
    ) -> Result<Self, AqStatError> {
        let schema = schema.unwrap_or_default();
        let dataset = Dataset::load(&path, &schema)?;
        Ok(Self { dataset })
    }

    /// Wraps an already-built dataset, e.g. one from
    /// [`Dataset::from_readings`] in tests.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// The loaded dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Recomputes every derived view for one date range.
    ///
    /// This is the single recomputation triggered per user interaction: the
    /// range filter runs once and each pipeline view is derived from the
    /// filtered readings, sequentially. A range outside the dataset's bounds
    /// is not an error; it produces the empty report.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.start(NaiveDate)`: **Required.** Start date, inclusive.
    /// * `.end(NaiveDate)`: **Required.** End date, inclusive.
    /// * `.categories(CategorySchema)`: Optional. Category axis; defaults to
    ///   [`CategorySchema::aqi`].
    /// * `.time_order(TimeOfDayOrder)`: Optional. Time-of-day axis order.
    /// * `.mode(TallyMode)`: Optional. Category tally mode; defaults to
    ///   [`TallyMode::Percent`].
    /// * `.top_n(usize)`: Optional. Ranking length; defaults to 5.
    ///
    /// # Examples
    ///
    /// ```
    /// use aqstat::{AqStat, Dataset, Reading};
    /// use chrono::NaiveDate;
    ///
    /// # fn main() -> Result<(), aqstat::AqStatError> {
    /// let readings = vec![Reading {
    ///     timestamp: NaiveDate::from_ymd_opt(2014, 3, 1).unwrap().and_hms_opt(8, 0, 0).unwrap(),
    ///     station: "Aotizhongxin".to_string(),
    ///     pm25: Some(12.5),
    ///     aqi_category: "Good".to_string(),
    ///     time_of_day: "Pagi".to_string(),
    /// }];
    /// let aqstat = AqStat::from_dataset(Dataset::from_readings(&readings)?);
    ///
    /// let report = aqstat
    ///     .report()
    ///     .start(NaiveDate::from_ymd_opt(2014, 3, 1).unwrap())
    ///     .end(NaiveDate::from_ymd_opt(2014, 3, 31).unwrap())
    ///     .call()?;
    /// assert_eq!(report.rows, 1);
    /// assert_eq!(report.categories.get("Good"), Some(100.0));
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        categories: Option<CategorySchema>,
        time_order: Option<TimeOfDayOrder>,
        mode: Option<TallyMode>,
        top_n: Option<usize>,
    ) -> Result<RangeReport, AqStatError> {
        let categories = categories.unwrap_or_default();
        let time_order = time_order.unwrap_or_default();
        let mode = mode.unwrap_or_default();
        let top_n = top_n.unwrap_or(DEFAULT_TOP_N);

        if let Some((min, max)) = self.dataset.date_bounds()? {
            if end < min || start > max {
                warn!(
                    "Requested range [{start}, {end}] lies outside the dataset bounds [{min}, {max}]"
                );
            }
        }

        let filtered = self.dataset.filter_range(start, end)?;
        info!(
            "Recomputing report for [{start}, {end}]: {} of {} readings",
            filtered.len(),
            self.dataset.len()
        );

        let hourly = resample(&filtered, Frequency::Hourly)?;
        let daily = resample(&filtered, Frequency::Daily)?;
        let monthly = resample(&filtered, Frequency::Monthly)?;
        let yearly = resample(&filtered, Frequency::Yearly)?;

        let stations = station_summary(&filtered)?;
        let top_worst = stations.top_n_worst(top_n);
        let top_best = stations.top_n_best(top_n);

        let tally = category_distribution(&filtered, &categories, mode)?;
        let mut category_leaders = Vec::with_capacity(categories.len());
        for label in categories.labels() {
            let leaders = top_stations_for_category(&filtered, label, top_n)?;
            category_leaders.push((label.clone(), leaders));
        }

        let time_of_day = time_of_day_summary(&filtered, &time_order)?;
        let insights = key_insights(&daily, &monthly, &stations);

        Ok(RangeReport {
            start,
            end,
            rows: filtered.len(),
            hourly,
            daily,
            monthly,
            yearly,
            stations,
            top_worst,
            top_best,
            categories: tally,
            category_leaders,
            time_of_day,
            insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::reading::Reading;
    use chrono::NaiveDateTime;

    fn rd(ts: &str, station: &str, pm25: Option<f64>, category: &str, tod: &str) -> Reading {
        Reading {
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            station: station.to_string(),
            pm25,
            aqi_category: category.to_string(),
            time_of_day: tod.to_string(),
        }
    }

    fn fixture() -> AqStat {
        AqStat::from_dataset(
            Dataset::from_readings(&[
                rd("2014-03-01 08:00:00", "A", Some(5.0), "Good", "Pagi"),
                rd("2014-03-01 13:00:00", "A", Some(15.0), "Good", "Siang"),
                rd("2014-03-02 08:00:00", "B", Some(40.0), "Moderate", "Pagi"),
                rd("2014-04-03 19:00:00", "B", Some(80.0), "Unhealthy", "Malam"),
            ])
            .unwrap(),
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn report_recomputes_every_view() {
        let report = fixture()
            .report()
            .start(date("2014-03-01"))
            .end(date("2014-04-30"))
            .call()
            .unwrap();

        assert_eq!(report.rows, 4);
        assert_eq!(report.daily.len(), 3);
        assert_eq!(report.monthly.len(), 2);
        assert_eq!(report.yearly.len(), 1);
        assert_eq!(report.hourly.len(), 3);
        assert_eq!(report.stations.len(), 2);
        assert_eq!(report.top_worst[0].station, "B");
        assert_eq!(report.top_best[0].station, "A");
        assert_eq!(report.categories.buckets.len(), 4);
        assert_eq!(report.category_leaders.len(), 4);
        assert_eq!(report.category_leaders[0].0, "Good");
        assert_eq!(report.category_leaders[0].1[0].station, "A");
        assert_eq!(report.time_of_day.len(), 4);
        assert!(!report.is_empty());

        let insights = report.insights.unwrap();
        assert_eq!(insights.worst_station.station, "B");
        assert_eq!(insights.peak_day, date("2014-04-03"));
    }

    #[test]
    fn report_narrows_with_the_range() {
        let report = fixture()
            .report()
            .start(date("2014-03-01"))
            .end(date("2014-03-01"))
            .call()
            .unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(report.stations.len(), 1);
        assert_eq!(report.categories.get("Good"), Some(100.0));
        assert_eq!(report.categories.get("Moderate"), Some(0.0));
    }

    #[test]
    fn out_of_bounds_range_yields_the_empty_report() {
        let report = fixture()
            .report()
            .start(date("2020-01-01"))
            .end(date("2020-12-31"))
            .call()
            .unwrap();

        assert!(report.is_empty());
        assert!(report.daily.is_empty());
        assert!(report.monthly.is_empty());
        assert!(report.stations.is_empty());
        assert!(report.top_worst.is_empty());
        assert!(report.insights.is_none());
        assert_eq!(report.categories.buckets.len(), 4);
        assert!(report.categories.buckets.iter().all(|b| b.value == 0.0));
        assert!(report
            .category_leaders
            .iter()
            .all(|(_, leaders)| leaders.is_empty()));
        assert!(report.time_of_day.iter().all(|e| e.avg_pm25.is_none()));
    }

    #[test]
    fn report_honors_mode_and_top_n() {
        let report = fixture()
            .report()
            .start(date("2014-03-01"))
            .end(date("2014-04-30"))
            .mode(TallyMode::Count)
            .top_n(1)
            .call()
            .unwrap();

        assert_eq!(report.categories.get("Good"), Some(2.0));
        assert_eq!(report.top_worst.len(), 1);
        assert_eq!(report.top_best.len(), 1);
    }

    #[test]
    fn report_honors_custom_category_axis() {
        let report = fixture()
            .report()
            .start(date("2014-03-01"))
            .end(date("2014-04-30"))
            .categories(CategorySchema::custom(["Good"]))
            .call()
            .unwrap();

        assert_eq!(report.categories.buckets.len(), 1);
        assert_eq!(report.category_leaders.len(), 1);
    }
}
