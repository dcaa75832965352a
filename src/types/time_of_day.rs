//! The fixed time-of-day label order used by the time-of-day breakdown.

/// A fixed, ordered set of time-of-day labels.
///
/// [`crate::time_of_day_summary`] reindexes its output onto this order so the
/// chart axis stays identical regardless of which labels occur in the
/// filtered data. The default matches the shipped dataset's labels
/// (morning, midday, afternoon, night).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDayOrder {
    labels: Vec<String>,
}

impl TimeOfDayOrder {
    /// A caller-defined label order, e.g. for a translated label set.
    pub fn custom<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// The labels in canonical order.
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

impl Default for TimeOfDayOrder {
    // The shipped dataset labels its "waktu" column in Indonesian.
    fn default() -> Self {
        Self::custom(["Pagi", "Siang", "Sore", "Malam"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order_has_four_labels() {
        let order = TimeOfDayOrder::default();
        assert_eq!(order.len(), 4);
        assert_eq!(order.labels()[0], "Pagi");
        assert_eq!(order.labels()[3], "Malam");
    }

    #[test]
    fn custom_order_is_preserved() {
        let order = TimeOfDayOrder::custom(["Morning", "Midday", "Afternoon", "Night"]);
        assert_eq!(order.labels()[2], "Afternoon");
    }
}
