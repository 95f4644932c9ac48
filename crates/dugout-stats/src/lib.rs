//! Statistical helpers shared by the dugout crates.
//!
//! - **Moments**: [`mean`] and [`population_variance`] over arbitrary iterators of `f64`
//! - **Descriptive statistics**: min, max, mean, median, variance, and standard deviation
//!   of a dataset in one pass over sorted values
//!
//! Team derived statistics (average skill, attendance, within-team variance), the
//! balance terms of the fitness function, and the per-generation population summary
//! are all computed through this crate so that every layer agrees on the definition
//! of "variance" (population variance, divisor `n`).
//!
//! # Examples
//!
//! ```
//! use dugout_stats::{descriptive::DescriptiveStats, mean, population_variance};
//!
//! assert_eq!(mean([1.0, 2.0, 3.0]), Some(2.0));
//! assert_eq!(population_variance([1.0, 3.0]), Some(1.0));
//! assert_eq!(mean(std::iter::empty()), None);
//!
//! let stats = DescriptiveStats::new([4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
//! assert_eq!(stats.median, 3.0);
//! ```

pub mod descriptive;

/// Arithmetic mean of the values, or `None` when there are none.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Population variance (divisor `n`) of the values, or `None` when there are none.
///
/// Two-pass: the mean is computed first, then the squared deviations.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn population_variance<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let values = values.into_iter().collect::<Vec<_>>();
    let mean = mean(values.iter().copied())?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(sum_sq / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        let test_cases: Vec<(&str, Vec<f64>, Option<f64>)> = vec![
            ("empty", vec![], None),
            ("single", vec![7.0], Some(7.0)),
            ("pair", vec![1.0, 2.0], Some(1.5)),
            ("negative", vec![-3.0, 3.0, 6.0], Some(2.0)),
        ];
        for (name, values, expected) in test_cases {
            assert_eq!(mean(values), expected, "{name}");
        }
    }

    #[test]
    fn test_population_variance_uses_divisor_n() {
        // sample variance would be 2.0 here
        assert_eq!(population_variance([1.0, 3.0]), Some(1.0));
        assert_eq!(population_variance([5.0, 5.0, 5.0]), Some(0.0));
        assert_eq!(population_variance([2.0]), Some(0.0));
        assert_eq!(population_variance(std::iter::empty()), None);
    }

    #[test]
    fn test_population_variance_known_value() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let variance = population_variance(values).unwrap();
        assert!((variance - 4.0).abs() < 1e-12);
    }
}
