//! Seeded 64-bit hashing.
//!
//! FNV-1a style byte loop with extra shift/add diffusion per byte, finished
//! with a `SplitMix64` avalanche. Deterministic across runs and platforms;
//! not cryptographic.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// `SplitMix64` finalizer.
#[inline]
pub const fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    x
}

/// Hash `data` with `seed`.
///
/// Different seeds yield independent hash streams, which is what the bloom
/// filter's double hashing relies on.
pub fn hash64_seed(data: &[u8], seed: u64) -> u64 {
    let mut hash = seed ^ FNV_OFFSET;
    for &byte in data {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
        hash ^= hash >> 47;
        hash = hash.wrapping_add(hash << 13);
        hash ^= hash >> 31;
    }
    mix64(hash)
}

/// Unseeded [`hash64_seed`].
#[inline]
pub fn hash64(data: &[u8]) -> u64 {
    hash64_seed(data, 0)
}
