use crate::dataset::schema::{COL_CATEGORY, COL_DATETIME};
use chrono::NaiveDate;
use polars::prelude::{col, lit, DataType, LazyFrame};

/// Filtering helpers for frames carrying the canonical dataset columns.
pub trait AqFrameFilterExt {
    /// Filters by a calendar-date range (inclusive on both ends).
    ///
    /// The comparison is on the `datetime` column truncated to its calendar
    /// date, so a reading at 23:59 on `end` is retained.
    ///
    /// # Arguments
    /// * `start`: The start date (inclusive).
    /// * `end`: The end date (inclusive).
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Potential errors surface
    /// during execution (e.g., `collect`).
    fn filter_date_range(self, start: NaiveDate, end: NaiveDate) -> LazyFrame;

    /// Filters to the readings labeled with one AQI category.
    fn filter_category(self, category: &str) -> LazyFrame;
}

impl AqFrameFilterExt for LazyFrame {
    fn filter_date_range(self, start: NaiveDate, end: NaiveDate) -> LazyFrame {
        self.filter(
            col(COL_DATETIME)
                .cast(DataType::Date)
                .gt_eq(lit(start))
                .and(col(COL_DATETIME).cast(DataType::Date).lt_eq(lit(end))),
        )
    }

    fn filter_category(self, category: &str) -> LazyFrame {
        self.filter(col(COL_CATEGORY).eq(lit(category.to_string())))
    }
}
