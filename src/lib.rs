pub mod access_log;
pub mod comparison;
pub mod counters;
pub mod errors;
pub mod parallel_counting;
pub mod synthetic;

pub use comparison::{ComparisonReport, compare, compare_parallel};
pub use counters::Counter;
pub use counters::ExactCounter;
pub use counters::HLLCounter;
pub use counters::Registers;
pub use counters::hll_counter::merge;
pub use errors::ConfigurationError;
