//! Partitioned counting on the rayon thread pool.
//!
//! Every worker folds its share of the items into a private estimator and
//! the partial estimators are merged pairwise by per-bucket maximum. The
//! merged registers are identical to those of a sequential pass.

use rayon::iter::{FromParallelIterator, IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::config::Config;
use crate::estimator::{CardinalityEstimator, Reduce};

impl<R: Reduce> CardinalityEstimator<R> {
    /// Build an estimator for `config` from a parallel iterator of items.
    pub fn par_from_iter_with<I>(config: Config, items: I) -> Self
    where
        I: IntoParallelIterator,
        I::Item: AsRef<[u8]>,
    {
        let estimator = items
            .into_par_iter()
            .fold(
                || Self::with_config(config),
                |mut estimator, item| {
                    estimator.insert(&item);
                    estimator
                },
            )
            .reduce(
                || Self::with_config(config),
                |mut lhs, rhs| {
                    lhs.registers_mut().merge_unchecked(rhs.registers());
                    lhs
                },
            );
        debug!(
            reduction = R::NAME,
            occupied = estimator.registers().occupied(),
            buckets = config.buckets(),
            "parallel count finished"
        );
        estimator
    }
}

impl<T: AsRef<[u8]> + Send, R: Reduce> FromParallelIterator<T> for CardinalityEstimator<R> {
    fn from_par_iter<I>(items: I) -> Self
    where
        I: IntoParallelIterator<Item = T>,
    {
        Self::par_from_iter_with(Config::default(), items)
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;
    use crate::estimator::{HyperLogLogEstimator, LogLogEstimator};

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item{}", i)).collect()
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let words = words(10_000);
        let sequential: LogLogEstimator = words.iter().collect();
        let parallel: LogLogEstimator = words.par_iter().collect();
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.estimate(), 16426);

        let sequential: HyperLogLogEstimator = words.iter().collect();
        let parallel: HyperLogLogEstimator = words.par_iter().collect();
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.estimate(), 7131);
    }

    #[test]
    fn test_parallel_with_config() {
        let config = Config::new(32, 4).unwrap();
        let words = words(1000);
        let parallel = LogLogEstimator::par_from_iter_with(config, words.par_iter());
        let mut sequential = LogLogEstimator::with_config(config);
        sequential.extend(&words);
        assert_eq!(parallel, sequential);
        assert_eq!(parallel.estimate(), 1474);
    }

    #[test]
    fn test_parallel_empty() {
        let parallel: HyperLogLogEstimator = Vec::<String>::new().into_par_iter().collect();
        assert_eq!(parallel.estimate(), 0);
    }
}
