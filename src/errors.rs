use thiserror::Error;

use crate::counters::registers::{MAX_PRECISION, MIN_PRECISION};

/// Raised when a sketch is built or combined with parameters it cannot honor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "precision {0} is outside the supported range {min}..={max}",
        min = MIN_PRECISION,
        max = MAX_PRECISION
    )]
    InvalidPrecision(u8),
    #[error("cannot merge sketches with different precisions ({left} vs {right})")]
    PrecisionMismatch { left: u8, right: u8 },
    #[error("{0} registers is not a supported power of two")]
    InvalidRegisterCount(usize),
    #[error("register {index} holds {value}, above the maximum rank {max}")]
    RegisterOutOfRange { index: usize, value: u8, max: u8 },
}

pub type SketchResult<T> = Result<T, ConfigurationError>;
