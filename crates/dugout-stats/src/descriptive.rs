use crate::{mean, population_variance};

/// Summary of a fitness distribution, one per generation.
///
/// Variance is the population variance, matching [`population_variance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Upper median for an even number of values.
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Sorts the values and summarizes them; `None` when there are none.
    ///
    /// ```
    /// # use dugout_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([12.5, 0.0, 40.0]).unwrap();
    /// assert_eq!((stats.min, stats.median, stats.max), (0.0, 12.5, 40.0));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from values already in ascending order.
    ///
    /// Mean and variance come from [`mean`] and [`population_variance`].
    ///
    /// # Panics
    ///
    /// Panics if a value is smaller than the one before it.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.windows(2).all(|w| w[0] <= w[1]),
            "out-of-order value in sorted input"
        );

        let (&min, &max) = (sorted_values.first()?, sorted_values.last()?);
        let mean = mean(sorted_values.iter().copied())?;
        let variance = population_variance(sorted_values.iter().copied())?;
        Some(Self {
            min,
            max,
            mean,
            median: sorted_values[sorted_values.len() / 2],
            variance,
            std_dev: variance.sqrt(),
        })
    }
}
