//! ## HyperLogLog reduction
//! `floor(alpha * m^2 / Z)` with `Z = sum(2^-M[i])` over all `m` buckets.
//! An unset bucket is read as rank `0` and adds `1` to `Z`, so `Z >= 1`
//! always holds and the division is always defined.
//!
//! No small- or large-range correction is applied: the raw harmonic-mean
//! estimate is biased upwards at low cardinalities.
//!
//! [Original HyperLogLog paper](http://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)

use crate::config::Config;
use crate::estimator::Reduce;
use crate::registers::Registers;

/// Harmonic-mean reduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HyperLogLog;

impl Reduce for HyperLogLog {
    const NAME: &'static str = "HyperLogLog";

    #[inline]
    fn reduce(config: &Config, registers: &Registers) -> f64 {
        let m = registers.len() as f64;
        let z: f64 = registers
            .as_slice()
            .iter()
            .map(|&r| (-f64::from(r)).exp2())
            .sum();
        config.hyperloglog_alpha() * m * m / z
    }
}
