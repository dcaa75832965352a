//! Source column configuration and the canonical column names the loader
//! normalizes every dataset to.

// Canonical column names used throughout the pipeline.
pub(crate) const COL_DATETIME: &str = "datetime";
pub(crate) const COL_STATION: &str = "station";
pub(crate) const COL_PM25: &str = "pm25";
pub(crate) const COL_CATEGORY: &str = "category";
pub(crate) const COL_TIME_OF_DAY: &str = "time_of_day";

// Derived columns produced by the aggregation pipeline.
pub(crate) const COL_AVG_PM25: &str = "avg_pm25";
pub(crate) const COL_COUNT: &str = "count";
pub(crate) const COL_PERIOD: &str = "period";

/// Maps the required dataset columns to their names in the source CSV.
///
/// Column names are a configuration concern of the input file, not of the
/// pipeline: the loader validates that each configured column exists and
/// renames them to the canonical names above, so the rest of the crate never
/// sees source naming. Extra columns in the file are kept untouched.
///
/// The default matches the shipped dataset's header
/// (`datetime`, `station`, `PM2.5`, `AQI_Category`, `waktu`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    /// Name of the timestamp column. Parsed to a datetime at load time.
    pub timestamp: String,
    /// Name of the station identifier column.
    pub station: String,
    /// Name of the PM2.5 concentration column.
    pub pm25: String,
    /// Name of the AQI category label column.
    pub category: String,
    /// Name of the time-of-day label column.
    pub time_of_day: String,
    /// Optional strftime format for the timestamp column. When `None` the
    /// format is inferred from the data.
    pub timestamp_format: Option<String>,
}

impl DatasetSchema {
    /// The configured source column names, paired with the canonical name
    /// each one is renamed to.
    pub(crate) fn column_mapping(&self) -> [(&str, &'static str); 5] {
        [
            (self.timestamp.as_str(), COL_DATETIME),
            (self.station.as_str(), COL_STATION),
            (self.pm25.as_str(), COL_PM25),
            (self.category.as_str(), COL_CATEGORY),
            (self.time_of_day.as_str(), COL_TIME_OF_DAY),
        ]
    }
}

impl Default for DatasetSchema {
    fn default() -> Self {
        Self {
            timestamp: "datetime".to_string(),
            station: "station".to_string(),
            pm25: "PM2.5".to_string(),
            category: "AQI_Category".to_string(),
            time_of_day: "waktu".to_string(),
            timestamp_format: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_matches_shipped_dataset_header() {
        let schema = DatasetSchema::default();
        assert_eq!(schema.pm25, "PM2.5");
        assert_eq!(schema.category, "AQI_Category");
        assert_eq!(schema.time_of_day, "waktu");
        assert!(schema.timestamp_format.is_none());
    }

    #[test]
    fn mapping_targets_canonical_names() {
        let schema = DatasetSchema::default();
        let targets: Vec<&str> = schema.column_mapping().iter().map(|(_, c)| *c).collect();
        assert_eq!(
            targets,
            [COL_DATETIME, COL_STATION, COL_PM25, COL_CATEGORY, COL_TIME_OF_DAY]
        );
    }
}
