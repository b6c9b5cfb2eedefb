use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::estimator::{CardinalityEstimator, HyperLogLogEstimator, LogLogEstimator, Reduce};
use crate::registers::Registers;

/// Estimator variants selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    LogLog,
    HyperLogLog,
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "loglog" | "ll" => Ok(Variant::LogLog),
            "hyperloglog" | "hll" => Ok(Variant::HyperLogLog),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Either estimator behind one interface.
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch]
pub enum AnyEstimator {
    LogLog(LogLogEstimator),
    HyperLogLog(HyperLogLogEstimator),
}

/// Operations shared by every estimator variant.
#[enum_dispatch(AnyEstimator)]
pub trait EstimatorTrait {
    fn insert_bytes(&mut self, item: &[u8]);
    fn estimate(&self) -> usize;
    fn registers(&self) -> &Registers;
    fn name(&self) -> &'static str;
}

impl<R: Reduce> EstimatorTrait for CardinalityEstimator<R> {
    #[inline]
    fn insert_bytes(&mut self, item: &[u8]) {
        CardinalityEstimator::insert(self, item);
    }

    #[inline]
    fn estimate(&self) -> usize {
        CardinalityEstimator::estimate(self)
    }

    #[inline]
    fn registers(&self) -> &Registers {
        CardinalityEstimator::registers(self)
    }

    #[inline]
    fn name(&self) -> &'static str {
        R::NAME
    }
}

impl AnyEstimator {
    pub fn new(variant: Variant, config: Config) -> Self {
        match variant {
            Variant::LogLog => LogLogEstimator::with_config(config).into(),
            Variant::HyperLogLog => HyperLogLogEstimator::with_config(config).into(),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            AnyEstimator::LogLog(_) => Variant::LogLog,
            AnyEstimator::HyperLogLog(_) => Variant::HyperLogLog,
        }
    }

    /// Merge estimators of the same variant and configuration.
    pub fn merge(&mut self, rhs: &AnyEstimator) -> Result<()> {
        match (self, rhs) {
            (AnyEstimator::LogLog(lhs), AnyEstimator::LogLog(rhs)) => lhs.merge(rhs),
            (AnyEstimator::HyperLogLog(lhs), AnyEstimator::HyperLogLog(rhs)) => lhs.merge(rhs),
            _ => Err(ConfigError::VariantMismatch),
        }
    }
}
