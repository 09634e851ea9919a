//! Bias-corrected harmonic-mean estimate over a set of registers
//! (Flajolet, Fusy, Gandouet, Meunier 2007).

use crate::counters::hashing::HASH_WIDTH;
use crate::counters::registers::Registers;

const AM_16: f64 = 0.673;
const AM_32: f64 = 0.697;
const AM_64: f64 = 0.709;

/// Bias correction constant for `num_registers` registers.
pub fn alpha(num_registers: usize) -> f64 {
    match num_registers {
        16 => AM_16,
        32 => AM_32,
        64 => AM_64,
        m => 0.7213 / (1.0 + 1.079 / m as f64),
    }
}

/// Expected relative standard error of a sketch with `2^precision` registers.
pub fn relative_standard_error(precision: u8) -> f64 {
    1.04 / ((1u64 << precision) as f64).sqrt()
}

pub fn estimate(registers: &Registers) -> f64 {
    let num_registers = registers.len() as f64;

    let numerator = alpha(registers.len()) * num_registers * num_registers;

    // every register contributes at least 2^0, so this is >= 1
    let denominator: f64 = registers.iter().map(|reg| 2f64.powi(-(reg as i32))).sum();

    let estimate = numerator / denominator;
    let two_pow_width = 2f64.powi(HASH_WIDTH as i32);

    if estimate <= 2.5 * num_registers {
        // Small range correction
        let zeros = registers.zero_count();
        if zeros > 0 {
            return num_registers * (num_registers / zeros as f64).ln();
        }
    } else if estimate > two_pow_width / 30f64 {
        return -two_pow_width * (1f64 - estimate / two_pow_width).ln();
    }

    estimate
}
