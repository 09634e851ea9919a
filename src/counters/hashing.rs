use std::hash::{BuildHasher, Hasher};

use xxhash_rust::xxh64::Xxh64Builder;

/// Hasher used by the sketches unless another `BuildHasher` is supplied.
///
/// Seeded with 0, so the same item always lands on the same register, across
/// sketches and across runs. That is what makes two sketches mergeable.
pub type DefaultHasher = Xxh64Builder;

/// Width in bits of the hash values fed to the registers.
pub const HASH_WIDTH: u32 = u64::BITS;

/// Hashes the raw bytes of `item`. No length prefix is written, unlike
/// `BuildHasher::hash_one` on a slice.
#[inline(always)]
pub fn hash_bytes<S: BuildHasher>(hasher: &S, item: &[u8]) -> u64 {
    let mut state = hasher.build_hasher();
    state.write(item);
    state.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_across_builders() {
        let a = DefaultHasher::default();
        let b = DefaultHasher::default();
        assert_eq!(hash_bytes(&a, b"10.0.0.1"), hash_bytes(&b, b"10.0.0.1"));
    }

    #[test]
    fn test_hash_spreads_similar_inputs() {
        let hasher = DefaultHasher::default();
        let h1 = hash_bytes(&hasher, b"10.0.0.1");
        let h2 = hash_bytes(&hasher, b"10.0.0.2");
        assert_ne!(h1, h2);
        // neighbouring addresses should differ in roughly half the bits
        let flipped = (h1 ^ h2).count_ones();
        assert!((16..=48).contains(&flipped), "only {flipped} bits differ");
    }

    #[test]
    fn test_hash_accepts_empty_input() {
        let hasher = DefaultHasher::default();
        assert_eq!(hash_bytes(&hasher, b""), hash_bytes(&hasher, &[]));
    }
}
