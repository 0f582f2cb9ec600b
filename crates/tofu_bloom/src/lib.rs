//! Fixed-capacity bloom filter.
//!
//! Sized once from an expected item count `n` and a target false-positive
//! rate `p`:
//!
//! - bits: `m = ceil(-n * ln(p) / ln(2)^2)`
//! - hash functions: `k = ceil((m / n) * ln(2))`
//!
//! The `k` bit positions of a key come from two seeded 64-bit hashes
//! (`h1 + i * h2 mod m`, Kirsch-Mitzenmacher double hashing). Bits are
//! packed LSB-first within each byte and are only ever set, except by a
//! full [`BloomFilter::clear`], so a key that was inserted is always
//! reported as present.

use std::f64::consts::LN_2;

use tofu_value::{hash64_seed, TofuError, TofuResult, TofuValue};

/// Seed of the first hash stream.
const SEED_PRIMARY: u64 = 0x1234_5678;

/// Seed of the second hash stream (the double-hashing stride).
const SEED_SECONDARY: u64 = 0x8765_4321;

/// Number of leading bits shown by [`BloomFilter::dump`].
const DUMP_BITS: usize = 64;

/// Sizing whose bit array cannot be addressed or allocated.
const TOO_LARGE: TofuError = TofuError::InvalidArgument {
    reason: "bloom filter too large",
};

/// Probabilistic set of byte-string keys.
///
/// `contains` may report a key that was never inserted (a false positive)
/// but never misses one that was.
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilter {
    bits: Vec<u8>,
    bit_count: usize,
    hash_count: usize,
    item_count: usize,
    capacity: usize,
    false_positive_rate: f64,
}

impl BloomFilter {
    /// Create a filter for about `capacity` keys at `false_positive_rate`.
    ///
    /// Rejects a zero capacity, rates outside the open interval `(0, 1)`,
    /// and sizings whose bit array cannot be addressed or allocated.
    pub fn new(capacity: usize, false_positive_rate: f64) -> TofuResult<Self> {
        if capacity == 0 {
            return Err(TofuError::InvalidArgument {
                reason: "bloom filter capacity must be non-zero",
            });
        }
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(TofuError::InvalidArgument {
                reason: "bloom filter false-positive rate must be in (0, 1)",
            });
        }

        let bit_count = optimal_bit_count(capacity, false_positive_rate).ok_or(TOO_LARGE)?;
        let byte_count = bit_count.div_ceil(8);
        let mut bits = Vec::new();
        bits.try_reserve_exact(byte_count).map_err(|_| TOO_LARGE)?;
        bits.resize(byte_count, 0);
        let hash_count = optimal_hash_count(bit_count, capacity);
        tracing::debug!(
            capacity,
            false_positive_rate,
            bit_count,
            hash_count,
            "sized bloom filter",
        );

        Ok(BloomFilter {
            bits,
            bit_count,
            hash_count,
            item_count: 0,
            capacity,
            false_positive_rate,
        })
    }

    /// Add `key` to the set.
    ///
    /// Every call counts towards [`count`](Self::count), including repeats.
    pub fn insert(&mut self, key: impl AsRef<[u8]>) -> TofuResult<()> {
        let key = non_empty(key.as_ref())?;
        for index in self.bit_indices(key) {
            self.bits[index >> 3] |= 1 << (index & 7);
        }
        self.item_count += 1;
        tracing::trace!(items = self.item_count, "bloom filter insert");
        Ok(())
    }

    /// Check whether `key` may have been inserted.
    ///
    /// `Ok(false)` is definite; `Ok(true)` may be a false positive.
    pub fn contains(&self, key: impl AsRef<[u8]>) -> TofuResult<bool> {
        let key = non_empty(key.as_ref())?;
        Ok(self
            .bit_indices(key)
            .all(|index| self.bits[index >> 3] & (1 << (index & 7)) != 0))
    }

    /// Insert the payload bytes of a tofu value.
    pub fn insert_value(&mut self, value: &TofuValue) -> TofuResult<()> {
        self.insert(value.value())
    }

    /// Check for the payload bytes of a tofu value.
    pub fn contains_value(&self, value: &TofuValue) -> TofuResult<bool> {
        self.contains(value.value())
    }

    /// Number of insert calls since creation or the last [`clear`](Self::clear).
    #[inline]
    pub fn count(&self) -> usize {
        self.item_count
    }

    /// Zero every bit and reset the item count. Sizing is unchanged.
    pub fn clear(&mut self) {
        self.bits.fill(0);
        self.item_count = 0;
    }

    /// Move the filter out, leaving an empty filter with the same sizing.
    pub fn take(&mut self) -> Self {
        let empty = BloomFilter {
            bits: vec![0; self.bits.len()],
            item_count: 0,
            ..*self
        };
        std::mem::replace(self, empty)
    }

    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    #[inline]
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// The capacity the filter was sized for.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The false-positive rate the filter was sized for.
    #[inline]
    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    /// Number of bits currently set.
    pub fn set_bits(&self) -> usize {
        self.bits.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Expected false-positive rate at the current item count,
    /// `(1 - e^(-k * n / m))^k`.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        reason = "sizing figures are far below 2^52"
    )]
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let k = self.hash_count as f64;
        let n = self.item_count as f64;
        let m = self.bit_count as f64;
        (1.0 - (-k * n / m).exp()).powi(self.hash_count as i32)
    }

    /// Counts plus the first 64 bits of the bit array.
    pub fn dump(&self) -> String {
        let shown = self.bit_count.min(DUMP_BITS);
        let prefix: String = (0..shown)
            .map(|i| {
                if self.bits[i >> 3] & (1 << (i & 7)) != 0 {
                    '1'
                } else {
                    '0'
                }
            })
            .collect();
        format!(
            "Bloom Filter:\n  Bits: {}\n  Hash functions: {}\n  Items: {}\n  Bit array (first {} bits): {}\n",
            self.bit_count, self.hash_count, self.item_count, shown, prefix,
        )
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "indices are reduced modulo bit_count, which is a usize"
    )]
    fn bit_indices(&self, key: &[u8]) -> impl Iterator<Item = usize> {
        let h1 = hash64_seed(key, SEED_PRIMARY);
        let h2 = hash64_seed(key, SEED_SECONDARY);
        let m = self.bit_count as u64;
        (0..self.hash_count as u64).map(move |i| (h1.wrapping_add(i.wrapping_mul(h2)) % m) as usize)
    }
}

fn non_empty(key: &[u8]) -> TofuResult<&[u8]> {
    if key.is_empty() {
        Err(TofuError::InvalidArgument {
            reason: "bloom filter keys must be non-empty",
        })
    } else {
        Ok(key)
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the bit count is range-checked before the cast"
)]
fn optimal_bit_count(capacity: usize, rate: f64) -> Option<usize> {
    let bits = (-(capacity as f64) * rate.ln() / (LN_2 * LN_2)).ceil();
    (bits.is_finite() && bits < usize::MAX as f64).then_some(bits as usize)
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "result is a small positive hash count"
)]
fn optimal_hash_count(bit_count: usize, capacity: usize) -> usize {
    ((bit_count as f64 / capacity as f64) * LN_2).ceil().max(1.0) as usize
}
