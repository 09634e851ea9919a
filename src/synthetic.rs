use std::net::Ipv4Addr;

// Odd, so multiplying by it permutes u32.
const SPREAD: u32 = 0x9E37_79B1;

/// Endless-until-exhausted stream of distinct IPv4 address strings.
///
/// The i-th address is `i * SPREAD ^ seed` in u32 arithmetic, a bijection, so
/// the first `2^32` values never repeat. Different seeds give different (but
/// overlapping) orderings of the address space.
pub struct SyntheticAddresses {
    seed: u32,
    next: u64,
}

impl SyntheticAddresses {
    pub fn new(seed: u32) -> Self {
        SyntheticAddresses { seed, next: 0 }
    }
}

impl Iterator for SyntheticAddresses {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > u32::MAX as u64 {
            return None;
        }
        let value = (self.next as u32).wrapping_mul(SPREAD) ^ self.seed;
        self.next += 1;
        Some(Ipv4Addr::from(value).to_string())
    }
}

/// `distinct` addresses, each repeated `repeats` times, with the copies spread
/// through the sequence rather than adjacent.
pub fn with_duplicates(seed: u32, distinct: usize, repeats: usize) -> Vec<String> {
    let addresses: Vec<String> = SyntheticAddresses::new(seed).take(distinct).collect();
    let mut items = Vec::with_capacity(distinct * repeats);
    for _ in 0..repeats {
        items.extend(addresses.iter().cloned());
    }
    items
}
