//! AQI category distribution over a fixed category order.

use crate::dataset::schema::{COL_CATEGORY, COL_COUNT};
use crate::dataset::store::Dataset;
use crate::error::AqStatError;
use crate::types::category::{CategorySchema, TallyMode};
use polars::prelude::*;
use std::collections::HashMap;

/// One category's tally value: a raw count or a percentage share, depending
/// on the tally's [`TallyMode`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket {
    pub category: String,
    pub value: f64,
}

/// Reading tallies per category, reindexed onto a canonical category order.
///
/// The bucket list always has exactly one entry per schema label, in schema
/// order; categories absent from the filtered data carry 0. This keeps the
/// chart axis fixed across filter changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTally {
    pub mode: TallyMode,
    pub buckets: Vec<CategoryBucket>,
}

impl CategoryTally {
    /// The tally value for one category label, if it is part of the schema.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.buckets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.value)
    }
}

/// Tallies readings per AQI category and reindexes the result onto
/// `schema`'s order.
///
/// In [`TallyMode::Count`] the values are raw reading counts and sum to the
/// number of categorized input rows; in [`TallyMode::Percent`] they are
/// percentage shares summing to 100 (or 0 for an empty input). Labels found
/// in the data but not in the schema are not reported; the schema defines
/// the axis.
pub fn category_distribution(
    dataset: &Dataset,
    schema: &CategorySchema,
    mode: TallyMode,
) -> Result<CategoryTally, AqStatError> {
    let df = dataset
        .lazy()
        .group_by_stable([col(COL_CATEGORY)])
        .agg([len().cast(DataType::UInt32).alias(COL_COUNT)])
        .collect()?;

    let labels = df.column(COL_CATEGORY)?.str()?;
    let counts = df.column(COL_COUNT)?.u32()?;

    let mut observed: HashMap<&str, u32> = HashMap::with_capacity(df.height());
    let mut total: u64 = 0;
    for idx in 0..df.height() {
        if let (Some(label), Some(count)) = (labels.get(idx), counts.get(idx)) {
            observed.insert(label, count);
            total += u64::from(count);
        }
    }

    let buckets = schema
        .labels()
        .iter()
        .map(|label| {
            let count = observed.get(label.as_str()).copied().unwrap_or(0);
            let value = match mode {
                TallyMode::Count => f64::from(count),
                TallyMode::Percent => {
                    if total == 0 {
                        0.0
                    } else {
                        f64::from(count) * 100.0 / total as f64
                    }
                }
            };
            CategoryBucket {
                category: label.clone(),
                value,
            }
        })
        .collect();

    Ok(CategoryTally { mode, buckets })
}
