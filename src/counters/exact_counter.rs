use crate::counters::Counter;
use std::collections::HashSet;

/// Exact distinct counter: keeps every distinct item, so memory grows with the
/// number of unique inputs.
#[derive(Default)]
pub struct ExactCounter {
    seen: HashSet<Vec<u8>>,
}

impl ExactCounter {
    pub fn new() -> Self {
        ExactCounter::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ExactCounter {
            seen: HashSet::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl Counter for ExactCounter {
    fn add(&mut self, item: &[u8]) {
        if !self.seen.contains(item) {
            self.seen.insert(item.to_vec());
        }
    }

    fn estimate(&self) -> f64 {
        self.seen.len() as f64
    }
}
