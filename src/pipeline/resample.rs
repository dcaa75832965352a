//! Resampling of readings into fixed-width calendar buckets.

use crate::dataset::schema::{COL_AVG_PM25, COL_DATETIME, COL_PERIOD, COL_PM25};
use crate::dataset::store::{days_to_date, Dataset};
use crate::error::AqStatError;
use crate::types::frequency::{Frequency, Period};
use polars::prelude::*;

/// One resampled bucket: a period label and the mean PM2.5 within it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodMean {
    pub period: Period,
    pub avg_pm25: f64,
}

/// An ordered sequence of resampled buckets, chronological by period.
pub type AggregateSeries = Vec<PeriodMean>;

const COL_PERIOD_YEAR: &str = "period_year";
const COL_PERIOD_MONTH: &str = "period_month";

/// Groups readings into calendar buckets at `frequency` and computes the
/// arithmetic mean of PM2.5 within each bucket.
///
/// Missing PM2.5 values are ignored; a bucket containing only missing values
/// produces no row rather than a zero. Buckets are returned in chronological
/// order. Hourly buckets group by hour of day (0..=23) across all days in
/// the input, the other frequencies by calendar day, month and year.
///
/// An empty dataset yields an empty series.
pub fn resample(dataset: &Dataset, frequency: Frequency) -> Result<AggregateSeries, AqStatError> {
    if let Frequency::Monthly = frequency {
        return resample_monthly(dataset);
    }

    let period_key = match frequency {
        Frequency::Hourly => col(COL_DATETIME).dt().hour().cast(DataType::Int32),
        Frequency::Daily => col(COL_DATETIME).cast(DataType::Date),
        Frequency::Yearly => col(COL_DATETIME).dt().year().cast(DataType::Int32),
        Frequency::Monthly => unreachable!(),
    };

    let df = dataset
        .lazy()
        .group_by_stable([period_key.alias(COL_PERIOD)])
        .agg([col(COL_PM25).mean().alias(COL_AVG_PM25)])
        .drop_nulls(Some(vec![col(COL_AVG_PM25)]))
        .sort([COL_PERIOD], SortMultipleOptions::default())
        .collect()?;

    let means = df.column(COL_AVG_PM25)?.f64()?;
    let mut series = Vec::with_capacity(df.height());
    match frequency {
        Frequency::Daily => {
            let dates = df.column(COL_PERIOD)?.date()?;
            for idx in 0..df.height() {
                let day = dates.get(idx).and_then(days_to_date);
                if let (Some(day), Some(avg)) = (day, means.get(idx)) {
                    series.push(PeriodMean {
                        period: Period::Day(day),
                        avg_pm25: avg,
                    });
                }
            }
        }
        Frequency::Hourly | Frequency::Yearly => {
            let keys = df.column(COL_PERIOD)?.i32()?;
            for idx in 0..df.height() {
                if let (Some(key), Some(avg)) = (keys.get(idx), means.get(idx)) {
                    let period = match frequency {
                        Frequency::Hourly => Period::Hour(key as u32),
                        _ => Period::Year(key),
                    };
                    series.push(PeriodMean {
                        period,
                        avg_pm25: avg,
                    });
                }
            }
        }
        Frequency::Monthly => unreachable!(),
    }
    Ok(series)
}

/// Monthly buckets key on a (year, month) pair so the series stays
/// chronological across year boundaries.
fn resample_monthly(dataset: &Dataset) -> Result<AggregateSeries, AqStatError> {
    let df = dataset
        .lazy()
        .group_by_stable([
            col(COL_DATETIME)
                .dt()
                .year()
                .cast(DataType::Int32)
                .alias(COL_PERIOD_YEAR),
            col(COL_DATETIME)
                .dt()
                .month()
                .cast(DataType::Int32)
                .alias(COL_PERIOD_MONTH),
        ])
        .agg([col(COL_PM25).mean().alias(COL_AVG_PM25)])
        .drop_nulls(Some(vec![col(COL_AVG_PM25)]))
        .sort(
            [COL_PERIOD_YEAR, COL_PERIOD_MONTH],
            SortMultipleOptions::default(),
        )
        .collect()?;

    let years = df.column(COL_PERIOD_YEAR)?.i32()?;
    let months = df.column(COL_PERIOD_MONTH)?.i32()?;
    let means = df.column(COL_AVG_PM25)?.f64()?;

    let mut series = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if let (Some(year), Some(month), Some(avg)) =
            (years.get(idx), months.get(idx), means.get(idx))
        {
            series.push(PeriodMean {
                period: Period::Month {
                    year,
                    month: month as u32,
                },
                avg_pm25: avg,
            });
        }
    }
    Ok(series)
}
