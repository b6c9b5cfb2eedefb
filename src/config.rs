//! Estimator configuration.
//!
//! A `Config` fixes the hash width, the bucket-index width and the two
//! bias-correction constants. It is validated once at construction, so
//! estimators built from it never need to check it again.

use tracing::debug;

use crate::alpha::{hyperloglog_alpha, loglog_alpha, ALPHA_HLL, ALPHA_LL, MAX_HASH_K};
use crate::error::{ConfigError, Result};

/// Default total hash width in bits.
pub const HASH_LENGTH: u32 = 32;
/// Default bucket-index width in bits, giving `2^HASH_K = 32` buckets.
pub const HASH_K: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    hash_length: u32,
    hash_k: u32,
    loglog_alpha: f64,
    hyperloglog_alpha: f64,
}

impl Config {
    /// Creates a validated configuration with bias constants derived for `2^hash_k` buckets.
    ///
    /// `hash_length` must be in `2..=32` and `hash_k` in `1..=16`, strictly
    /// below `hash_length`.
    pub fn new(hash_length: u32, hash_k: u32) -> Result<Self> {
        if !(2..=HASH_LENGTH).contains(&hash_length) {
            return Err(ConfigError::HashLength(hash_length));
        }
        if hash_k == 0 || hash_k >= hash_length || hash_k > MAX_HASH_K {
            return Err(ConfigError::BucketBits {
                hash_k,
                hash_length,
            });
        }

        let config = Self {
            hash_length,
            hash_k,
            loglog_alpha: loglog_alpha(hash_k),
            hyperloglog_alpha: hyperloglog_alpha(hash_k),
        };
        debug!(
            hash_length,
            hash_k,
            buckets = config.buckets(),
            loglog_alpha = config.loglog_alpha,
            hyperloglog_alpha = config.hyperloglog_alpha,
            "estimator configured"
        );
        Ok(config)
    }

    /// Overrides the LogLog bias constant.
    pub fn with_loglog_alpha(mut self, alpha: f64) -> Result<Self> {
        self.loglog_alpha = check_alpha(alpha)?;
        Ok(self)
    }

    /// Overrides the HyperLogLog bias constant.
    pub fn with_hyperloglog_alpha(mut self, alpha: f64) -> Result<Self> {
        self.hyperloglog_alpha = check_alpha(alpha)?;
        Ok(self)
    }

    #[inline]
    pub fn hash_length(&self) -> u32 {
        self.hash_length
    }

    #[inline]
    pub fn hash_k(&self) -> u32 {
        self.hash_k
    }

    /// Number of buckets, `2^hash_k`.
    #[inline]
    pub fn buckets(&self) -> usize {
        1 << self.hash_k
    }

    /// Width of the hash field the rank is taken from, `hash_length - hash_k`.
    #[inline]
    pub fn rank_bits(&self) -> u32 {
        self.hash_length - self.hash_k
    }

    #[inline]
    pub fn loglog_alpha(&self) -> f64 {
        self.loglog_alpha
    }

    #[inline]
    pub fn hyperloglog_alpha(&self) -> f64 {
        self.hyperloglog_alpha
    }
}

impl Default for Config {
    /// 32-bit hash, 32 buckets.
    fn default() -> Self {
        Self {
            hash_length: HASH_LENGTH,
            hash_k: HASH_K,
            loglog_alpha: ALPHA_LL,
            hyperloglog_alpha: ALPHA_HLL,
        }
    }
}

#[inline]
fn check_alpha(alpha: f64) -> Result<f64> {
    if alpha.is_finite() && alpha > 0.0 {
        Ok(alpha)
    } else {
        Err(ConfigError::Alpha(alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_default_matches_new() {
        assert_eq!(Config::new(HASH_LENGTH, HASH_K), Ok(Config::default()));
        let config = Config::default();
        assert_eq!(config.buckets(), 32);
        assert_eq!(config.rank_bits(), 27);
    }

    #[test_case(0, 5 => Err(ConfigError::HashLength(0)); "zero hash length")]
    #[test_case(1, 1 => Err(ConfigError::HashLength(1)); "one bit hash")]
    #[test_case(33, 5 => Err(ConfigError::HashLength(33)); "hash wider than 32 bits")]
    #[test_case(32, 0 => Err(ConfigError::BucketBits { hash_k: 0, hash_length: 32 }); "no bucket bits")]
    #[test_case(8, 8 => Err(ConfigError::BucketBits { hash_k: 8, hash_length: 8 }); "no rank bits")]
    #[test_case(8, 9 => Err(ConfigError::BucketBits { hash_k: 9, hash_length: 8 }); "more bucket bits than hash")]
    #[test_case(32, 17 => Err(ConfigError::BucketBits { hash_k: 17, hash_length: 32 }); "too many buckets")]
    #[test_case(2, 1 => Ok((2, 1)); "smallest config")]
    #[test_case(32, 16 => Ok((65536, 16)); "largest config")]
    fn test_new(hash_length: u32, hash_k: u32) -> Result<(usize, u32)> {
        Config::new(hash_length, hash_k).map(|c| (c.buckets(), c.rank_bits()))
    }

    #[test_case(0.0; "zero")]
    #[test_case(-0.5; "negative")]
    #[test_case(f64::NAN; "nan")]
    #[test_case(f64::INFINITY; "infinite")]
    fn test_invalid_alpha(alpha: f64) {
        assert!(matches!(
            Config::default().with_loglog_alpha(alpha),
            Err(ConfigError::Alpha(_))
        ));
        assert!(matches!(
            Config::default().with_hyperloglog_alpha(alpha),
            Err(ConfigError::Alpha(_))
        ));
    }

    #[test]
    fn test_alpha_override() {
        let config = Config::default()
            .with_loglog_alpha(0.5)
            .and_then(|c| c.with_hyperloglog_alpha(0.25))
            .unwrap();
        assert_eq!(config.loglog_alpha(), 0.5);
        assert_eq!(config.hyperloglog_alpha(), 0.25);
        assert_eq!(config.buckets(), 32);
    }
}
