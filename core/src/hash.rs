//! Hash primitives shared by every object kind.
//!
//! All hashes are deterministic across processes: they are built on `FxHasher`
//! with no random state, so a value's hash depends on its contents alone.

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Mixes `hash` into `seed`. Order sensitive: `combine(combine(s, a), b)` and
/// `combine(combine(s, b), a)` generally differ.
#[inline]
pub fn hash_combine(seed: u64, hash: u64) -> u64 {
    seed ^ hash
        .wrapping_add(0x9e37_79b9_7f4a_7c15)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

pub fn hash_str(s: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(s.as_bytes());
    // Terminator keeps "ab" + "c" apart from "a" + "bc" when strings are combined.
    hasher.write_u8(0xff);
    hasher.finish()
}

pub fn hash_integer(n: i64) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_i64(n);
    hasher.finish()
}

pub fn hash_real(x: f64) -> u64 {
    // -0.0 == 0.0 and every NaN equals every other, so each class hashes alike.
    let bits = if x == 0.0 {
        0u64
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    };
    let mut hasher = FxHasher::default();
    hasher.write_u64(bits);
    hasher.finish()
}

/// Ordered hash over a sequence of element hashes, seeded with the count.
pub fn hash_ordered(count: usize, hashes: impl IntoIterator<Item = u64>) -> u64 {
    hashes
        .into_iter()
        .fold(count as u64, |seed, hash| hash_combine(seed, hash))
}

/// Ordered hash for sequential values whose length is only known after the
/// walk. The count is mixed in last.
pub fn hash_sequence(hashes: impl IntoIterator<Item = u64>) -> u64 {
    let mut count = 0u64;
    let folded = hashes.into_iter().fold(SEQUENCE_SEED, |seed, hash| {
        count += 1;
        hash_combine(seed, hash)
    });
    hash_combine(folded, count)
}

const SEQUENCE_SEED: u64 = 0x7365_7175_656e_6365;

/// Distinct salts so `:a`, `a` and `"a"` never share a hash by construction.
pub(crate) const KEYWORD_SALT: u64 = 0x6b65_7977_6f72_6421;
pub(crate) const SYMBOL_SALT: u64 = 0x7379_6d62_6f6c_2121;
