use crate::counters::{Counter, HLLCounter, Registers};
use crate::errors::{ConfigurationError, SketchResult};
use rayon::prelude::*;
use std::hash::BuildHasher;

// Below this a chunk is not worth a rayon task.
const MIN_CHUNK_LEN: usize = 4096;

/// Builds one sketch per chunk of `items` on the rayon pool and merges them.
///
/// Each task owns its sketch; the only combination step is the final
/// register-wise max, so the result is identical to a sequential build.
/// Returns the number of items fed alongside the sketch.
pub fn sketch_parallel<S, T>(items: &[T], precision: u8) -> SketchResult<(u64, HLLCounter<S>)>
where
    S: BuildHasher + Default + Send,
    T: AsRef<[u8]> + Sync,
{
    let empty = Registers::new(precision)?;
    let chunk_len = std::cmp::max(
        MIN_CHUNK_LEN,
        items.len().div_ceil(rayon::current_num_threads()),
    );

    items
        .par_chunks(chunk_len)
        .map(|chunk| {
            let mut counter = HLLCounter::<S>::from_registers(empty.clone());
            for item in chunk {
                counter.add(item.as_ref());
            }
            Ok::<_, ConfigurationError>((chunk.len() as u64, counter))
        })
        .try_reduce(
            || (0, HLLCounter::<S>::from_registers(empty.clone())),
            |(count_a, mut a), (count_b, b)| {
                a.merge(&b)?;
                Ok((count_a + count_b, a))
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::hashing::DefaultHasher;
    use crate::synthetic::SyntheticAddresses;

    #[test]
    fn test_parallel_matches_sequential() {
        let items: Vec<String> = SyntheticAddresses::new(7).take(50_000).collect();

        let mut sequential: HLLCounter<DefaultHasher> = HLLCounter::new(12).unwrap();
        for item in &items {
            sequential.add(item.as_bytes());
        }

        let (seen, parallel) = sketch_parallel::<DefaultHasher, _>(&items, 12).unwrap();
        assert_eq!(seen, 50_000);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_parallel_empty_input() {
        let items: Vec<&str> = Vec::new();
        let (seen, counter) = sketch_parallel::<DefaultHasher, _>(&items, 14).unwrap();
        assert_eq!(seen, 0);
        assert_eq!(counter.estimate(), 0.0);
    }

    #[test]
    fn test_parallel_rejects_bad_precision() {
        let items = ["1.1.1.1"];
        assert!(sketch_parallel::<DefaultHasher, _>(&items, 30).is_err());
    }
}
