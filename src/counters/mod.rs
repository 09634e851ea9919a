pub mod counter_base;
pub mod estimator;
pub mod exact_counter;
pub mod hashing;
pub mod hll_counter;
pub mod registers;

pub use counter_base::Counter;
pub use exact_counter::ExactCounter;
pub use hll_counter::HLLCounter;
pub use registers::Registers;
