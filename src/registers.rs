//! ## Bucket registers
//! Fixed array of `2^hash_k` slots, one `u8` per bucket, each holding the
//! maximum rank observed for items routed to that bucket.
//!
//! Buckets are addressed 1-based (`1..=len`). A slot value of `0` means no
//! item has reached the bucket yet; ranks are always at least `1`, so the
//! sentinel cannot collide with a real rank. Slots only ever grow.

use std::mem::{size_of, size_of_val};

use crate::error::{ConfigError, Result};

#[derive(Clone, PartialEq, Eq)]
pub struct Registers {
    ranks: Box<[u8]>,
}

impl Registers {
    /// Create `2^hash_k` unset registers.
    #[inline]
    pub fn new(hash_k: u32) -> Self {
        Self {
            ranks: vec![0u8; 1 << hash_k].into_boxed_slice(),
        }
    }

    /// Number of buckets.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Return whether no bucket has been set yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.iter().all(|&r| r == 0)
    }

    /// Number of buckets holding a rank.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.ranks.iter().filter(|&&r| r != 0).count()
    }

    /// Rank stored for 1-based `bucket`, `None` if unset or out of range.
    #[inline]
    pub fn get(&self, bucket: usize) -> Option<u8> {
        let idx = bucket.checked_sub(1)?;
        self.ranks.get(idx).copied().filter(|&r| r != 0)
    }

    /// Raise 1-based `bucket` to `rank` if `rank` is larger.
    ///
    /// Returns whether the register changed. Panics if `bucket` is not in `1..=len`.
    #[inline]
    pub fn update(&mut self, bucket: usize, rank: u8) -> bool {
        let slot = &mut self.ranks[bucket - 1];
        if rank > *slot {
            *slot = rank;
            true
        } else {
            false
        }
    }

    /// Element-wise maximum with `rhs`.
    pub fn merge(&mut self, rhs: &Registers) -> Result<()> {
        if self.len() != rhs.len() {
            return Err(ConfigError::Mismatch);
        }
        self.merge_unchecked(rhs);
        Ok(())
    }

    /// Element-wise maximum, assuming equal lengths.
    #[inline]
    pub(crate) fn merge_unchecked(&mut self, rhs: &Registers) {
        for (lhs, &rhs) in self.ranks.iter_mut().zip(rhs.ranks.iter()) {
            *lhs = (*lhs).max(rhs);
        }
    }

    /// Iterate buckets in index order, `None` for unset ones.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Option<u8>> + '_ {
        self.ranks.iter().map(|&r| (r != 0).then_some(r))
    }

    /// Raw slot values in bucket order, `0` for unset.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.ranks
    }

    /// Return memory size of `Registers`
    #[inline]
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(&*self.ranks)
    }
}

impl std::fmt::Debug for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ranks.iter()).finish()
    }
}

#[cfg(test)]
impl From<Vec<u8>> for Registers {
    fn from(ranks: Vec<u8>) -> Self {
        assert!(ranks.len().is_power_of_two());
        Self {
            ranks: ranks.into_boxed_slice(),
        }
    }
}
