//! Mean PM2.5 per time-of-day label, on a fixed label order.

use crate::dataset::schema::{COL_AVG_PM25, COL_PM25, COL_TIME_OF_DAY};
use crate::dataset::store::Dataset;
use crate::error::AqStatError;
use crate::types::time_of_day::TimeOfDayOrder;
use polars::prelude::*;
use std::collections::HashMap;

/// Mean PM2.5 for one time-of-day label. `avg_pm25` is `None` when the label
/// has no readings (or no non-missing PM2.5 values) in the filtered data.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfDayMean {
    pub label: String,
    pub avg_pm25: Option<f64>,
}

/// Mean PM2.5 grouped by time-of-day label, reindexed onto `order`.
///
/// The output always has one entry per label of `order`, in that order, so
/// charts keep a consistent axis regardless of which labels are present in
/// the filtered data.
pub fn time_of_day_summary(
    dataset: &Dataset,
    order: &TimeOfDayOrder,
) -> Result<Vec<TimeOfDayMean>, AqStatError> {
    let df = dataset
        .lazy()
        .group_by_stable([col(COL_TIME_OF_DAY)])
        .agg([col(COL_PM25).mean().alias(COL_AVG_PM25)])
        .collect()?;

    let labels = df.column(COL_TIME_OF_DAY)?.str()?;
    let means = df.column(COL_AVG_PM25)?.f64()?;

    let mut observed: HashMap<&str, f64> = HashMap::with_capacity(df.height());
    for idx in 0..df.height() {
        if let (Some(label), Some(avg)) = (labels.get(idx), means.get(idx)) {
            observed.insert(label, avg);
        }
    }

    Ok(order
        .labels()
        .iter()
        .map(|label| TimeOfDayMean {
            label: label.clone(),
            avg_pm25: observed.get(label.as_str()).copied(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::reading::Reading;
    use chrono::NaiveDateTime;

    fn rd(tod: &str, pm25: Option<f64>) -> Reading {
        Reading {
            timestamp: NaiveDateTime::parse_from_str("2014-03-01 08:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            station: "A".to_string(),
            pm25,
            aqi_category: "Good".to_string(),
            time_of_day: tod.to_string(),
        }
    }

    #[test]
    fn summary_follows_canonical_order_not_data_order() {
        let dataset = Dataset::from_readings(&[
            rd("Malam", Some(40.0)),
            rd("Pagi", Some(10.0)),
            rd("Pagi", Some(20.0)),
        ])
        .unwrap();

        let summary = time_of_day_summary(&dataset, &TimeOfDayOrder::default()).unwrap();
        let labels: Vec<&str> = summary.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Pagi", "Siang", "Sore", "Malam"]);
        assert_eq!(summary[0].avg_pm25, Some(15.0));
        assert_eq!(summary[3].avg_pm25, Some(40.0));
    }

    #[test]
    fn absent_labels_carry_none() {
        let dataset = Dataset::from_readings(&[rd("Pagi", Some(10.0))]).unwrap();
        let summary = time_of_day_summary(&dataset, &TimeOfDayOrder::default()).unwrap();
        assert_eq!(summary[1].avg_pm25, None);
        assert_eq!(summary[2].avg_pm25, None);
        assert_eq!(summary[3].avg_pm25, None);
    }

    #[test]
    fn empty_dataset_yields_all_none() {
        let dataset = Dataset::from_readings(&[]).unwrap();
        let summary = time_of_day_summary(&dataset, &TimeOfDayOrder::default()).unwrap();
        assert_eq!(summary.len(), 4);
        assert!(summary.iter().all(|e| e.avg_pm25.is_none()));
    }

    #[test]
    fn label_with_only_missing_values_carries_none() {
        let dataset = Dataset::from_readings(&[rd("Sore", None)]).unwrap();
        let summary = time_of_day_summary(&dataset, &TimeOfDayOrder::default()).unwrap();
        assert_eq!(summary[2].label, "Sore");
        assert_eq!(summary[2].avg_pm25, None);
    }
}
