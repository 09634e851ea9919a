use crate::counters::hashing::HASH_WIDTH;
use crate::errors::{ConfigurationError, SketchResult};

/// Smallest supported precision; below this the published `alpha_m` constants
/// no longer apply.
pub const MIN_PRECISION: u8 = 4;
/// Largest supported precision (256 KiB of registers).
pub const MAX_PRECISION: u8 = 18;

/// The `2^p` rank counters of a HyperLogLog sketch.
///
/// Registers only ever grow: both `update` and `merge_from` take the maximum
/// of the old and new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    precision: u8,
    values: Vec<u8>,
}

impl Registers {
    pub fn new(precision: u8) -> SketchResult<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(ConfigurationError::InvalidPrecision(precision));
        }
        Ok(Registers {
            precision,
            values: vec![u8::MIN; 1 << precision],
        })
    }

    /// Rebuilds registers from the image produced by [`Registers::as_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> SketchResult<Self> {
        let len = bytes.len();
        if !len.is_power_of_two() {
            return Err(ConfigurationError::InvalidRegisterCount(len));
        }
        let precision = len.trailing_zeros() as u8;
        let mut registers =
            Registers::new(precision).map_err(|_| ConfigurationError::InvalidRegisterCount(len))?;

        let max = registers.max_rank();
        if let Some((index, &value)) = bytes.iter().enumerate().find(|&(_, &v)| v > max) {
            return Err(ConfigurationError::RegisterOutOfRange { index, value, max });
        }
        registers.values.copy_from_slice(bytes);
        Ok(registers)
    }

    /// One byte per register, index order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.values
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True while no item has been recorded.
    pub fn all_zero(&self) -> bool {
        self.values.iter().all(|&reg| reg == 0)
    }

    pub fn get(&self, index: usize) -> u8 {
        self.values[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.values.iter().copied()
    }

    pub fn zero_count(&self) -> usize {
        self.values.iter().filter(|&&reg| reg == 0).count()
    }

    /// Largest rank a register can hold: the number of hash bits left after
    /// the index bits are taken.
    pub fn max_rank(&self) -> u8 {
        (HASH_WIDTH - self.precision as u32) as u8
    }

    #[inline(always)]
    pub fn update(&mut self, hash: u64) {
        let p = self.precision as u32;
        let index = (hash >> (HASH_WIDTH - p)) as usize;
        let remainder = hash << p;
        // an all-zero remainder reports 64 leading zeros, hence the cap
        let rank = std::cmp::min(remainder.leading_zeros() + 1, HASH_WIDTH - p) as u8;

        self.values[index] = std::cmp::max(self.values[index], rank);
    }

    pub fn merge_from(&mut self, other: &Registers) -> SketchResult<()> {
        if self.precision != other.precision {
            return Err(ConfigurationError::PrecisionMismatch {
                left: self.precision,
                right: other.precision,
            });
        }
        for (reg_self, reg_other) in self.values.iter_mut().zip(other.values.iter()) {
            *reg_self = std::cmp::max(*reg_self, *reg_other);
        }
        Ok(())
    }
}
