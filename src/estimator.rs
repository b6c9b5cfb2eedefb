//! Cardinality estimator estimates the number of distinct items in a
//! stream in constant memory. It is defined by a [`Config`] and a
//! reduction `R`:
//! - [`LogLog`](crate::loglog::LogLog): arithmetic mean of bucket ranks,
//!   exponentiated.
//! - [`HyperLogLog`](crate::hyperloglog::HyperLogLog): harmonic mean of
//!   `2^-rank` over all buckets.
//!
//! # Data-structure design
//!
//! Both reductions share the same update path. Each item is hashed with
//! [`one_at_a_time`], split into a 1-based bucket index and a rank, and
//! the bucket keeps the maximum rank it has seen. Updates commute, so the
//! final registers do not depend on item order, and two estimators over
//! disjoint partitions merge by element-wise maximum into exactly the
//! registers a single pass would have produced.
//!
//! The estimate is a pure reduction over the registers and can be taken at
//! any time. Estimators with no items return `0`.

use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;
use std::mem::size_of;

use tracing::trace;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::hash::{bucket_and_rank, one_at_a_time};
use crate::hyperloglog::HyperLogLog;
use crate::loglog::LogLog;
use crate::registers::Registers;

/// Reduction of bucket registers into a raw cardinality estimate.
pub trait Reduce: Send + Sync {
    /// Human readable name of the reduction.
    const NAME: &'static str;

    /// Return the unrounded estimate for non-empty `registers`.
    fn reduce(config: &Config, registers: &Registers) -> f64;
}

pub struct CardinalityEstimator<R: Reduce> {
    config: Config,
    registers: Registers,
    reduction: PhantomData<R>,
}

/// Estimator using the LogLog geometric-mean reduction.
pub type LogLogEstimator = CardinalityEstimator<LogLog>;
/// Estimator using the HyperLogLog harmonic-mean reduction.
pub type HyperLogLogEstimator = CardinalityEstimator<HyperLogLog>;

impl<R: Reduce> CardinalityEstimator<R> {
    /// Creates new estimator with the default 32-bit, 32-bucket configuration.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates new estimator for an already validated `config`.
    #[inline]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            registers: Registers::new(config.hash_k()),
            reduction: PhantomData,
        }
    }

    /// Insert an item, viewed as a byte string.
    #[inline]
    pub fn insert<T: AsRef<[u8]> + ?Sized>(&mut self, item: &T) {
        self.insert_hash(one_at_a_time(item.as_ref()));
    }

    /// Insert an already computed one-at-a-time hash.
    #[inline]
    pub fn insert_hash(&mut self, hash: i32) {
        let (bucket, rank) = bucket_and_rank(hash, &self.config);
        self.registers.update(bucket, rank);
    }

    /// Return cardinality estimate, rounded down.
    #[inline]
    pub fn estimate(&self) -> usize {
        if self.registers.is_empty() {
            return 0;
        }
        R::reduce(&self.config, &self.registers).floor() as usize
    }

    /// Merge `rhs` into `self` by taking the per-bucket maximum.
    ///
    /// Both estimators must share the same configuration.
    pub fn merge(&mut self, rhs: &Self) -> Result<()> {
        if self.config != rhs.config {
            return Err(ConfigError::Mismatch);
        }
        self.registers.merge_unchecked(&rhs.registers);
        trace!(
            reduction = R::NAME,
            occupied = self.registers.occupied(),
            "merged estimators"
        );
        Ok(())
    }

    #[inline]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    #[cfg(feature = "parallel")]
    #[inline]
    pub(crate) fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return memory size of `CardinalityEstimator`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() - size_of::<Registers>() + self.registers.size_of()
    }
}

impl<R: Reduce> Default for CardinalityEstimator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reduce> Clone for CardinalityEstimator<R> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            registers: self.registers.clone(),
            reduction: PhantomData,
        }
    }
}

impl<R: Reduce> PartialEq for CardinalityEstimator<R> {
    fn eq(&self, rhs: &Self) -> bool {
        self.config == rhs.config && self.registers == rhs.registers
    }
}

impl<R: Reduce> Debug for CardinalityEstimator<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ estimate: {}, occupied: {}/{} }}",
            self.estimate(),
            self.registers.occupied(),
            self.registers.len()
        )
    }
}

impl<T: AsRef<[u8]>, R: Reduce> Extend<T> for CardinalityEstimator<R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.insert(&item);
        }
    }
}

impl<T: AsRef<[u8]>, R: Reduce> FromIterator<T> for CardinalityEstimator<R> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut estimator = Self::new();
        estimator.extend(items);
        estimator
    }
}

/// Estimate the number of distinct `items` with the default LogLog estimator.
pub fn count_loglog<I>(items: I) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    items.into_iter().collect::<LogLogEstimator>().estimate()
}

/// Estimate the number of distinct `items` with the default HyperLogLog estimator.
pub fn count_hyperloglog<I>(items: I) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    items.into_iter().collect::<HyperLogLogEstimator>().estimate()
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    fn items(n: usize) -> impl Iterator<Item = String> {
        (0..n).map(|i| format!("item{}", i))
    }

    #[test_case(0 => "{ estimate: 0, occupied: 0/32 }")]
    #[test_case(1 => "{ estimate: 26, occupied: 1/32 }")]
    #[test_case(2 => "{ estimate: 26, occupied: 2/32 }")]
    #[test_case(3 => "{ estimate: 27, occupied: 3/32 }")]
    #[test_case(10 => "{ estimate: 37, occupied: 9/32 }")]
    #[test_case(100 => "{ estimate: 225, occupied: 31/32 }")]
    #[test_case(1000 => "{ estimate: 1331, occupied: 32/32 }")]
    #[test_case(10_000 => "{ estimate: 16426, occupied: 32/32 }")]
    fn test_loglog_estimator(n: usize) -> String {
        format!("{:?}", items(n).collect::<LogLogEstimator>())
    }

    #[test_case(0 => "{ estimate: 0, occupied: 0/32 }")]
    #[test_case(1 => "{ estimate: 22, occupied: 1/32 }")]
    #[test_case(2 => "{ estimate: 23, occupied: 2/32 }")]
    #[test_case(3 => "{ estimate: 23, occupied: 3/32 }")]
    #[test_case(10 => "{ estimate: 27, occupied: 9/32 }")]
    #[test_case(100 => "{ estimate: 105, occupied: 31/32 }")]
    #[test_case(1000 => "{ estimate: 788, occupied: 32/32 }")]
    #[test_case(10_000 => "{ estimate: 7131, occupied: 32/32 }")]
    fn test_hyperloglog_estimator(n: usize) -> String {
        format!("{:?}", items(n).collect::<HyperLogLogEstimator>())
    }

    #[test]
    fn test_insert() {
        let mut e = LogLogEstimator::new();
        assert_eq!(e.estimate(), 0);

        e.insert("test item 1");
        assert_eq!(e.estimate(), 25);

        // duplicates never move the registers
        let registers = e.registers().clone();
        for _ in 0..100 {
            e.insert("test item 1");
        }
        assert_eq!(e.registers(), &registers);
        assert_eq!(e.estimate(), 25);

        e.insert("test item 2");
        assert_eq!(e.estimate(), 26);
    }

    #[test]
    fn test_insert_accepts_byte_strings() {
        let mut from_str = HyperLogLogEstimator::new();
        let mut from_bytes = HyperLogLogEstimator::new();
        let mut from_vec = HyperLogLogEstimator::new();
        from_str.insert("hello");
        from_bytes.insert(b"hello");
        from_vec.insert(&b"hello".to_vec());
        assert_eq!(from_str, from_bytes);
        assert_eq!(from_str, from_vec);
        assert_eq!(from_str.registers().get(24), Some(1));
    }

    #[test]
    fn test_insert_hash_matches_insert() {
        let mut lhs = LogLogEstimator::new();
        let mut rhs = LogLogEstimator::new();
        lhs.insert("hello world");
        rhs.insert_hash(one_at_a_time(b"hello world"));
        assert_eq!(lhs, rhs);
    }

    #[test_case(1; "single copy")]
    #[test_case(10; "ten copies")]
    #[test_case(10_000; "many copies")]
    fn test_identical_items_stay_small(copies: usize) {
        for word in ["a", "b", "hello", "test item 1", "item42"] {
            let items = std::iter::repeat(word).take(copies);
            let loglog = count_loglog(items.clone());
            let hyperloglog = count_hyperloglog(items);
            assert!(loglog > 0 && loglog < 64, "loglog = {}", loglog);
            assert!(hyperloglog > 0 && hyperloglog < 64, "hll = {}", hyperloglog);
        }
    }

    #[test]
    fn test_estimate_is_repeatable() {
        let e: HyperLogLogEstimator = items(500).collect();
        let first = e.estimate();
        assert!((0..10).all(|_| e.estimate() == first));
        assert_eq!(count_hyperloglog(items(500)), first);
    }

    #[test]
    fn test_registers_never_decrease() {
        let mut e = LogLogEstimator::new();
        let mut previous = e.registers().clone();
        for item in items(2000) {
            e.insert(&item);
            let (bucket, rank) = bucket_and_rank(one_at_a_time(item.as_bytes()), e.config());
            assert!(e.registers().get(bucket) >= Some(rank));
            for (before, after) in previous.iter().zip(e.registers().iter()) {
                assert!(after >= before);
            }
            previous = e.registers().clone();
        }
    }

    #[test_case(0, 0 => "{ estimate: 0, occupied: 0/32 }")]
    #[test_case(0, 1 => "{ estimate: 26, occupied: 1/32 }")]
    #[test_case(1, 0 => "{ estimate: 26, occupied: 1/32 }")]
    #[test_case(400, 600 => "{ estimate: 1331, occupied: 32/32 }")]
    #[test_case(999, 1 => "{ estimate: 1331, occupied: 32/32 }")]
    #[test_case(5000, 5000 => "{ estimate: 16426, occupied: 32/32 }")]
    fn test_merge(lhs_n: usize, rhs_n: usize) -> String {
        let mut lhs: LogLogEstimator = items(lhs_n).collect();
        let rhs: LogLogEstimator = items(lhs_n + rhs_n).skip(lhs_n).collect();
        lhs.merge(&rhs).unwrap();
        assert_eq!(lhs, items(lhs_n + rhs_n).collect::<LogLogEstimator>());
        format!("{:?}", lhs)
    }

    #[test]
    fn test_merge_rejects_different_config() {
        let mut lhs = HyperLogLogEstimator::new();
        let rhs = HyperLogLogEstimator::with_config(Config::new(32, 4).unwrap());
        assert_eq!(lhs.merge(&rhs), Err(ConfigError::Mismatch));

        let rhs = HyperLogLogEstimator::with_config(
            Config::default().with_hyperloglog_alpha(0.7).unwrap(),
        );
        assert_eq!(lhs.merge(&rhs), Err(ConfigError::Mismatch));
    }

    #[test_case(32, 4 => (1474, 923); "sixteen buckets")]
    #[test_case(24, 5 => (1653, 790); "narrow hash")]
    fn test_custom_config(hash_length: u32, hash_k: u32) -> (usize, usize) {
        let config = Config::new(hash_length, hash_k).unwrap();
        let mut loglog = LogLogEstimator::with_config(config);
        let mut hyperloglog = HyperLogLogEstimator::with_config(config);
        loglog.extend(items(1000));
        hyperloglog.extend(items(1000));
        assert_eq!(loglog.registers().len(), 1 << hash_k);
        (loglog.estimate(), hyperloglog.estimate())
    }

    #[test]
    fn test_size_of_is_constant() {
        let mut e = LogLogEstimator::new();
        let empty = e.size_of();
        e.extend(items(10_000));
        assert_eq!(e.size_of(), empty);
        assert_eq!(empty, size_of::<LogLogEstimator>() + 32);
    }
}
