use crate::counters::Counter;
use crate::counters::estimator;
use crate::counters::hashing::{DefaultHasher, hash_bytes};
use crate::counters::registers::Registers;
use crate::errors::SketchResult;
use std::fmt;
use std::hash::BuildHasher;

/// A HyperLogLog sketch: `2^precision` registers plus the hasher that feeds them.
///
/// Two sketches can only be merged when they were built with the same
/// precision and the same (deterministic) hasher.
#[derive(Clone)]
pub struct HLLCounter<S = DefaultHasher> {
    registers: Registers,
    hasher: S,
}

impl<S: BuildHasher + Default> HLLCounter<S> {
    pub fn new(precision: u8) -> SketchResult<Self> {
        Ok(HLLCounter {
            registers: Registers::new(precision)?,
            hasher: S::default(),
        })
    }

    /// Wraps registers restored with [`Registers::from_bytes`].
    pub fn from_registers(registers: Registers) -> Self {
        HLLCounter {
            registers,
            hasher: S::default(),
        }
    }
}

impl<S: BuildHasher> Counter for HLLCounter<S> {
    fn add(&mut self, item: &[u8]) {
        let hash = hash_bytes(&self.hasher, item);
        self.registers.update(hash);
    }

    fn estimate(&self) -> f64 {
        estimator::estimate(&self.registers)
    }
}

impl<S: BuildHasher> HLLCounter<S> {
    // Some specialized high-performance methods
    #[inline(always)]
    pub fn add_u64(&mut self, item: u64) {
        let hash = hash_bytes(&self.hasher, &item.to_le_bytes());
        self.registers.update(hash);
    }

    pub fn precision(&self) -> u8 {
        self.registers.precision()
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn is_empty(&self) -> bool {
        self.registers.all_zero()
    }

    pub fn merge(&mut self, other: &HLLCounter<S>) -> SketchResult<()> {
        self.registers.merge_from(&other.registers)
    }
}

/// Sketch of the union of the inputs of `a` and `b`.
pub fn merge<S: BuildHasher + Default>(
    a: &HLLCounter<S>,
    b: &HLLCounter<S>,
) -> SketchResult<HLLCounter<S>> {
    let mut registers = a.registers.clone();
    registers.merge_from(&b.registers)?;
    Ok(HLLCounter::from_registers(registers))
}

impl<S> PartialEq for HLLCounter<S> {
    fn eq(&self, other: &Self) -> bool {
        self.registers == other.registers
    }
}

impl<S> fmt::Debug for HLLCounter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HLLCounter")
            .field("precision", &self.registers.precision())
            .field("num_registers", &self.registers.len())
            .finish()
    }
}
