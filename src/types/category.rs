//! The canonical AQI category label sets and the tally mode used when
//! computing category distributions.

/// An ordered set of AQI category labels.
///
/// The order is the fixed chart axis: [`crate::category_distribution`]
/// reindexes its output onto this order, so categories absent from a filtered
/// range still appear with a zero value and the axis stays stable across
/// filter changes.
///
/// Two label schemas ship with the known dataset variants; they use different
/// labels and a different category source (rule-based vs clustering-derived)
/// and must not be mixed within one dataset.
///
/// # Examples
///
/// ```
/// use aqstat::CategorySchema;
///
/// let schema = CategorySchema::aqi();
/// assert_eq!(schema.labels()[0], "Good");
/// assert_eq!(schema.len(), 4);
///
/// let clusters = CategorySchema::cluster();
/// assert_eq!(clusters.labels()[0], "Low Pollution");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySchema {
    labels: Vec<String>,
}

impl CategorySchema {
    /// The rule-based AQI label set: Good, Moderate, Unhealthy, Hazardous.
    ///
    /// This is the canonical schema and the [`Default`].
    pub fn aqi() -> Self {
        Self::custom(["Good", "Moderate", "Unhealthy", "Hazardous"])
    }

    /// The clustering-derived label set: Low, Moderate and High Pollution.
    pub fn cluster() -> Self {
        Self::custom(["Low Pollution", "Moderate Pollution", "High Pollution"])
    }

    /// A caller-defined ordered label set.
    pub fn custom<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The category labels in canonical order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for CategorySchema {
    fn default() -> Self {
        Self::aqi()
    }
}

/// How a category distribution reports its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TallyMode {
    /// Raw reading counts per category.
    Count,
    /// Percentage share of readings per category, 0..=100.
    Percent,
}

impl Default for TallyMode {
    fn default() -> Self {
        TallyMode::Percent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_keep_their_order() {
        assert_eq!(
            CategorySchema::aqi().labels(),
            ["Good", "Moderate", "Unhealthy", "Hazardous"]
        );
        assert_eq!(
            CategorySchema::cluster().labels(),
            ["Low Pollution", "Moderate Pollution", "High Pollution"]
        );
        assert_eq!(CategorySchema::default(), CategorySchema::aqi());
    }

    #[test]
    fn custom_schema_accepts_any_labels() {
        let schema = CategorySchema::custom(["A", "B"]);
        assert_eq!(schema.len(), 2);
        assert!(!schema.is_empty());
    }
}
