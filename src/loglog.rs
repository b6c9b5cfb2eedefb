//! ## LogLog reduction
//! `floor(alpha * m * 2^E)` where `E` is the arithmetic mean of all `m`
//! bucket ranks. Unset buckets add `0` to the sum but still count towards
//! `m`.
//!
//! [Original LogLog paper](http://algo.inria.fr/flajolet/Publications/DuFl03-LNCS.pdf)

use crate::config::Config;
use crate::estimator::Reduce;
use crate::registers::Registers;

/// Geometric-mean reduction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogLog;

impl Reduce for LogLog {
    const NAME: &'static str = "LogLog";

    #[inline]
    fn reduce(config: &Config, registers: &Registers) -> f64 {
        let m = registers.len() as f64;
        let sum: u32 = registers.as_slice().iter().map(|&r| u32::from(r)).sum();
        let mean = f64::from(sum) / m;
        config.loglog_alpha() * m * mean.exp2()
    }
}
