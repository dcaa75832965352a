use crate::dataset::error::DatasetError;
use crate::dataset::schema::{DatasetSchema, COL_DATETIME};
use log::{info, warn};
use polars::prelude::*;
use std::path::Path;

/// Reads the source CSV into a normalized `DataFrame`.
///
/// The configured columns are validated, renamed to the canonical names and
/// the timestamp column is parsed to a datetime dtype. Parsing is strict:
/// a single unparseable timestamp fails the load instead of being dropped.
pub(crate) fn load_csv(path: &Path, schema: &DatasetSchema) -> Result<DataFrame, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| DatasetError::CsvRead(path.to_path_buf(), e))?;

    let mapping = schema.column_mapping();
    let present: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
    for (source, _) in mapping.iter() {
        if !present.contains(source) {
            warn!(
                "Dataset '{}' is missing column '{}' (found: {:?})",
                path.display(),
                source,
                present
            );
            return Err(DatasetError::MissingColumn {
                path: path.to_path_buf(),
                column: source.to_string(),
            });
        }
    }

    let existing: Vec<&str> = mapping.iter().map(|(s, _)| *s).collect();
    let canonical: Vec<&str> = mapping.iter().map(|(_, c)| *c).collect();

    let strptime = StrptimeOptions {
        format: schema.timestamp_format.clone().map(Into::into),
        strict: true,
        exact: true,
        cache: true,
    };

    let df = df
        .lazy()
        .rename(existing, canonical, true)
        .with_column(
            col(COL_DATETIME)
                .str()
                .to_datetime(Some(TimeUnit::Milliseconds), None, strptime, lit("raise"))
                .alias(COL_DATETIME),
        )
        .collect()
        .map_err(|e| DatasetError::TimestampParse {
            path: path.to_path_buf(),
            column: schema.timestamp.clone(),
            source: e,
        })?;

    info!(
        "Loaded {} readings ({} columns) from '{}'",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "datetime,station,PM2.5,AQI_Category,waktu";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_and_normalizes_columns() {
        let file = write_csv(&[
            "2014-03-01 08:00:00,Aotizhongxin,12.5,Good,Pagi",
            "2014-03-01 13:00:00,Changping,80.0,Unhealthy,Siang",
        ]);

        let df = load_csv(file.path(), &DatasetSchema::default()).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            ["datetime", "station", "pm25", "category", "time_of_day"]
        );
        assert!(matches!(
            df.column("datetime").unwrap().dtype(),
            DataType::Datetime(_, _)
        ));
        assert_eq!(df.column("pm25").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn keeps_missing_pm25_as_null() {
        let file = write_csv(&[
            "2014-03-01 08:00:00,Aotizhongxin,,Good,Pagi",
            "2014-03-01 09:00:00,Aotizhongxin,10.0,Good,Pagi",
        ]);

        let df = load_csv(file.path(), &DatasetSchema::default()).unwrap();
        assert_eq!(df.column("pm25").unwrap().null_count(), 1);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_csv(
            Path::new("/nonexistent/data.csv"),
            &DatasetSchema::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::FileNotFound(_)));
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "datetime,station,PM2.5,waktu").unwrap();
        writeln!(file, "2014-03-01 08:00:00,Aotizhongxin,12.5,Pagi").unwrap();
        file.flush().unwrap();

        let err = load_csv(file.path(), &DatasetSchema::default()).unwrap_err();
        match err {
            DatasetError::MissingColumn { column, .. } => assert_eq!(column, "AQI_Category"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_timestamp_is_a_load_error() {
        let file = write_csv(&["not-a-timestamp,Aotizhongxin,12.5,Good,Pagi"]);

        let err = load_csv(file.path(), &DatasetSchema::default()).unwrap_err();
        assert!(matches!(err, DatasetError::TimestampParse { .. }));
    }

    #[test]
    fn custom_schema_maps_renamed_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ts,site,conc,label,part_of_day").unwrap();
        writeln!(file, "2014-03-01 08:00:00,A,1.0,Good,Pagi").unwrap();
        file.flush().unwrap();

        let schema = DatasetSchema {
            timestamp: "ts".to_string(),
            station: "site".to_string(),
            pm25: "conc".to_string(),
            category: "label".to_string(),
            time_of_day: "part_of_day".to_string(),
            timestamp_format: Some("%Y-%m-%d %H:%M:%S".to_string()),
        };
        let df = load_csv(file.path(), &schema).unwrap();
        assert_eq!(df.height(), 1);
        assert!(df.column("station").is_ok());
    }
}
