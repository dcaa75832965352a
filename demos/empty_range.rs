use aqstat::{AqStat, Dataset, Reading};
use chrono::NaiveDate;

fn main() -> anyhow::Result<()> {
    let readings = vec![Reading {
        timestamp: NaiveDate::from_ymd_opt(2014, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap(),
        station: "Aotizhongxin".to_string(),
        pm25: Some(12.5),
        aqi_category: "Good".to_string(),
        time_of_day: "Pagi".to_string(),
    }];
    let aqstat = AqStat::from_dataset(Dataset::from_readings(&readings)?);

    // A range the dataset does not cover is fine: it produces the empty
    // report rather than an error, so the caller can short-circuit rendering.
    let report = aqstat
        .report()
        .start(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
        .end(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap())
        .call()?;

    println!("rows matched: {}", report.rows);
    println!("report is empty: {}", report.is_empty());
    println!("insights present: {}", report.insights.is_some());
    for bucket in &report.categories.buckets {
        println!("{}: {}", bucket.category, bucket.value);
    }

    Ok(())
}
