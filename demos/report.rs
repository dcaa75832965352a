use aqstat::{AqStat, DatasetSchema, Frequency};
use std::env;

fn main() -> anyhow::Result<()> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "data/PRSA_combined.csv".to_string());

    let aqstat = AqStat::load()
        .path(path)
        .schema(DatasetSchema::default())
        .call()?;

    let Some((min, max)) = aqstat.dataset().date_bounds()? else {
        println!("Dataset is empty, nothing to report.");
        return Ok(());
    };
    println!("Loaded {} readings covering [{min}, {max}]", aqstat.dataset().len());

    let report = aqstat.report().start(min).end(max).call()?;

    println!("\n--- {} trend ---", Frequency::Monthly.label());
    for entry in &report.monthly {
        println!("{}: {:.2}", entry.period, entry.avg_pm25);
    }

    println!("\n--- Top {} most polluted stations ---", report.top_worst.len());
    for entry in &report.top_worst {
        println!("{}: {:.2}", entry.station, entry.avg_pm25);
    }

    println!("\n--- Category distribution ({:?}) ---", report.categories.mode);
    for bucket in &report.categories.buckets {
        println!("{}: {:.1}%", bucket.category, bucket.value);
    }

    println!("\n--- Time of day ---");
    for entry in &report.time_of_day {
        match entry.avg_pm25 {
            Some(avg) => println!("{}: {:.2}", entry.label, avg),
            None => println!("{}: no readings", entry.label),
        }
    }

    if let Some(insights) = &report.insights {
        println!("\n--- Key insights ---");
        println!("Average of daily means: {:.2}", insights.avg_pm25);
        println!("Peak day: {} ({:.2})", insights.peak_day, insights.max_pm25);
        println!(
            "Worst station: {} ({:.2}), best station: {} ({:.2})",
            insights.worst_station.station,
            insights.worst_station.avg_pm25,
            insights.best_station.station,
            insights.best_station.avg_pm25
        );
        println!("Month-over-month change: {:+.2}", insights.month_delta);
    }

    Ok(())
}
