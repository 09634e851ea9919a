use crate::counters::estimator::relative_standard_error;
use crate::counters::hashing::DefaultHasher;
use crate::counters::{Counter, ExactCounter, HLLCounter};
use crate::errors::SketchResult;
use crate::parallel_counting;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

pub const DEFAULT_PRECISION: u8 = 14;

/// Exact and approximate distinct counts over the same input, with timings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub precision: u8,
    pub exact_count: u64,
    pub approximate_count: f64,
    pub exact_elapsed: Duration,
    pub approximate_elapsed: Duration,
}

impl ComparisonReport {
    /// Signed error of the approximate count relative to the exact one.
    /// Zero when both counts are zero.
    pub fn relative_error(&self) -> f64 {
        if self.exact_count == 0 {
            return if self.approximate_count == 0.0 { 0.0 } else { f64::INFINITY };
        }
        (self.approximate_count - self.exact_count as f64) / self.exact_count as f64
    }

    /// Relative standard error the sketch was configured for.
    pub fn expected_error(&self) -> f64 {
        relative_standard_error(self.precision)
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Comparison:")?;
        writeln!(f, "{:>25} {:>15} {:>15}", "", "Exact Count", "HyperLogLog")?;
        writeln!(
            f,
            "{:>25} {:>15.1} {:>15.1}",
            "Unique IPs",
            self.exact_count as f64,
            self.approximate_count.round()
        )?;
        write!(
            f,
            "{:>25} {:>15.5} {:>15.5}",
            "Execution Time",
            self.exact_elapsed.as_secs_f64(),
            self.approximate_elapsed.as_secs_f64()
        )
    }
}

fn count_exact<T: AsRef<[u8]>>(items: &[T]) -> (u64, Duration) {
    let start = Instant::now();
    let mut counter = ExactCounter::new();
    for item in items {
        counter.add(item.as_ref());
    }
    (counter.len() as u64, start.elapsed())
}

fn finish(
    precision: u8,
    (exact_count, exact_elapsed): (u64, Duration),
    approximate_count: f64,
    approximate_elapsed: Duration,
) -> ComparisonReport {
    let report = ComparisonReport {
        precision,
        exact_count,
        approximate_count,
        exact_elapsed,
        approximate_elapsed,
    };
    info!(
        precision,
        exact = report.exact_count,
        approximate = report.approximate_count,
        relative_error = report.relative_error(),
        "comparison finished"
    );
    report
}

/// Counts distinct `items` exactly and with a sketch of `2^precision`
/// registers, as two independent timed passes over the input.
pub fn compare<T: AsRef<[u8]>>(items: &[T], precision: u8) -> SketchResult<ComparisonReport> {
    let mut counter: HLLCounter<DefaultHasher> = HLLCounter::new(precision)?;

    let exact = count_exact(items);

    let start = Instant::now();
    for item in items {
        counter.add(item.as_ref());
    }
    let approximate_count = counter.estimate();
    let approximate_elapsed = start.elapsed();

    Ok(finish(precision, exact, approximate_count, approximate_elapsed))
}

/// Same as [`compare`], but the sketch is built in parallel chunks and merged.
pub fn compare_parallel<T: AsRef<[u8]> + Sync>(
    items: &[T],
    precision: u8,
) -> SketchResult<ComparisonReport> {
    let exact = count_exact(items);

    let start = Instant::now();
    let (_, counter) = parallel_counting::sketch_parallel::<DefaultHasher, T>(items, precision)?;
    let approximate_count = counter.estimate();
    let approximate_elapsed = start.elapsed();

    Ok(finish(precision, exact, approximate_count, approximate_elapsed))
}
