//! Bias-correction constants for both reductions.
//!
//! Each constant is only valid for the bucket count it was derived for, so
//! they are looked up by bucket-index width rather than shared.

/// LogLog bias constant for 32 buckets: `(Γ(-1/32) * (2^(-1/32) - 1) / ln 2)^(-32)`.
pub const ALPHA_LL: f64 = 0.773_082_497_846_973;

/// HyperLogLog bias constant for 32 buckets:
/// `1 / (32 * ∫[0,∞) (log2((2 + x) / (1 + x)))^32 dx)`.
pub const ALPHA_HLL: f64 = 0.697_122_946;

/// Largest supported bucket-index width.
pub(crate) const MAX_HASH_K: u32 = 16;

/// Return LogLog bias constant for `2^hash_k` buckets.
///
/// `hash_k` must be in `1..=MAX_HASH_K`.
#[inline]
pub(crate) fn loglog_alpha(hash_k: u32) -> f64 {
    if hash_k == 5 {
        return ALPHA_LL;
    }
    LOGLOG_ALPHA[(hash_k - 1) as usize]
}

/// Return HyperLogLog bias constant for `2^hash_k` buckets.
#[inline]
pub(crate) fn hyperloglog_alpha(hash_k: u32) -> f64 {
    let m = 1u32 << hash_k;
    match m {
        16 => 0.673,
        32 => ALPHA_HLL,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / f64::from(m)),
    }
}

/// `(Γ(-1/m) * (2^(-1/m) - 1) / ln 2)^(-m)` for `m = 2^k`, `k` in `1..=16`.
const LOGLOG_ALPHA: [f64; MAX_HASH_K as usize] = [
    0.445_679_260_054_149_79,
    0.624_031_967_113_569_66,
    0.709_781_381_001_976_35,
    0.752_065_394_810_114_68,
    0.773_082_497_846_972_97,
    0.783_562_237_597_216_87,
    0.788_795_183_787_627_36,
    0.791_409_959_576_912_81,
    0.792_716_927_269_531_54,
    0.793_370_306_576_149_64,
    0.793_696_970_158_094_33,
    0.793_860_295_439_152_15,
    0.793_941_956_453_192_11,
    0.793_982_786_553_713_49,
    0.794_003_201_502_364_98,
    0.794_013_408_951_290_36,
];
