//! `loglog-estimator` estimates the number of distinct items in a stream or dataset
//! in constant memory.
//!
//! Items are byte strings. Each is hashed into one of 32 buckets (by default), every
//! bucket remembers the longest run of leading zeros it has seen, and the registers
//! are reduced into an estimate either with the LogLog geometric mean or with the
//! HyperLogLog harmonic mean.
//!
//! ```
//! use loglog_estimator::{count_hyperloglog, HyperLogLogEstimator};
//!
//! let words = ["apple", "pear", "apple", "plum", "pear"];
//! let mut estimator = HyperLogLogEstimator::new();
//! for word in words {
//!     estimator.insert(word);
//! }
//! assert_eq!(estimator.estimate(), count_hyperloglog(words));
//! ```
mod alpha;
pub mod config;
pub mod error;
pub mod estimator;
pub mod hash;
pub mod hyperloglog;
pub mod loglog;
#[cfg(feature = "parallel")]
mod parallel;
pub mod registers;
pub mod variant;

pub use alpha::{ALPHA_HLL, ALPHA_LL};
pub use config::{Config, HASH_K, HASH_LENGTH};
pub use error::ConfigError;
pub use estimator::{
    count_hyperloglog, count_loglog, CardinalityEstimator, HyperLogLogEstimator, LogLogEstimator,
    Reduce,
};
pub use registers::Registers;
pub use variant::{AnyEstimator, EstimatorTrait, Variant};
