//! Hashing and bucketing shared by both estimators.
//!
//! Items are hashed with Jenkins' one-at-a-time function evaluated in
//! 32-bit two's-complement arithmetic. The hash is then split into two
//! disjoint fields, counted from the most significant considered bit:
//! - bits `[1, hash_k]`                - bucket index (stored 1-based)
//! - bits `[hash_k + 1, hash_length]`  - rank input
//!
//! Every intermediate step wraps at 32 bits. Widening any of them changes
//! the bucket and rank distribution, and with it every estimate.

use crate::config::Config;

/// Jenkins one-at-a-time hash of `item` as a signed 32-bit value.
///
/// [Reference](http://en.wikipedia.org/wiki/Jenkins_hash_function)
#[inline]
pub fn one_at_a_time(item: &[u8]) -> i32 {
    let mut hash: i32 = 0;
    for &byte in item {
        hash = hash.wrapping_add(i32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 6;
    hash.wrapping_add(hash << 16)
}

/// Extract the unsigned field at inclusive positions `[start, end]` of a `hash_length`-bit hash.
///
/// Position 1 is the most significant bit considered and `hash_length` the
/// least significant. Shifts are logical on the hash's bit pattern.
#[inline]
pub fn get_bits(hash: i32, start: u32, end: u32, hash_length: u32) -> u32 {
    debug_assert!(1 <= start && start <= end && end <= hash_length && hash_length <= 32);
    let width = end - start + 1;
    let mask = u32::MAX >> (32 - width);
    ((hash as u32) >> (hash_length - end)) & mask
}

/// Rank of a `rank_bits`-wide field: the 1-based position of its highest set bit, counted from
/// the field's most significant bit.
///
/// An all-zero field is capped at `rank_bits`.
#[inline]
pub fn rank(w: u32, rank_bits: u32) -> u8 {
    if w == 0 {
        return rank_bits as u8;
    }
    (rank_bits - w.ilog2()) as u8
}

/// Split `hash` into its 1-based bucket index and rank under `config`.
#[inline]
pub fn bucket_and_rank(hash: i32, config: &Config) -> (usize, u8) {
    let hash_length = config.hash_length();
    let hash_k = config.hash_k();
    let bucket = get_bits(hash, 1, hash_k, hash_length) as usize + 1;
    let w = get_bits(hash, hash_k + 1, hash_length, hash_length);
    (bucket, rank(w, config.rank_bits()))
}
