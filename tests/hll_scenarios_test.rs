//! End-to-end accuracy and algebraic properties of the HyperLogLog sketch.

use ip_cardinality::counters::estimator::relative_standard_error;
use ip_cardinality::synthetic::{SyntheticAddresses, with_duplicates};
use ip_cardinality::{Counter, ConfigurationError, HLLCounter, compare, merge};
use proptest::prelude::*;

fn sketch_of<'a>(precision: u8, items: impl IntoIterator<Item = &'a String>) -> HLLCounter {
    let mut counter = HLLCounter::new(precision).unwrap();
    for item in items {
        counter.add(item.as_bytes());
    }
    counter
}

fn assert_within(estimate: f64, actual: f64, precision: u8, sigmas: f64) {
    let tolerance = sigmas * relative_standard_error(precision) * actual;
    assert!(
        (estimate - actual).abs() <= tolerance,
        "estimate {estimate} is more than {tolerance} away from {actual}"
    );
}

#[test]
fn test_empty_sketch_estimates_zero() {
    let counter: HLLCounter = HLLCounter::new(14).unwrap();
    assert!(counter.is_empty());
    assert_eq!(counter.estimate(), 0.0);
}

#[test]
fn test_repeated_single_address() {
    let items = vec!["1.1.1.1".to_string(); 1000];
    let report = compare(&items, 14).unwrap();

    assert_eq!(report.exact_count, 1);
    assert_within(report.approximate_count, 1.0, 14, 3.0);
    assert_eq!(report.approximate_count.round(), 1.0);
}

#[test]
fn test_ten_thousand_distinct_addresses() {
    let items: Vec<String> = SyntheticAddresses::new(0).take(10_000).collect();
    let report = compare(&items, 14).unwrap();

    assert_eq!(report.exact_count, 10_000);
    assert!(
        report.relative_error().abs() <= 0.02,
        "estimate {} off by {:.3}%",
        report.approximate_count,
        100.0 * report.relative_error()
    );
}

#[test]
fn test_merge_of_disjoint_sketches() {
    let addresses: Vec<String> = SyntheticAddresses::new(11).take(1200).collect();
    let a = sketch_of(14, &addresses[..500]);
    let b = sketch_of(14, &addresses[500..]);

    let merged = merge(&a, &b).unwrap();
    assert_within(merged.estimate(), 1200.0, 14, 3.0);
    assert_eq!(merged, sketch_of(14, &addresses));
}

#[test]
fn test_merge_rejects_different_precisions() {
    let a: HLLCounter = HLLCounter::new(12).unwrap();
    let mut b: HLLCounter = HLLCounter::new(14).unwrap();
    assert_eq!(
        b.merge(&a),
        Err(ConfigurationError::PrecisionMismatch {
            left: 14,
            right: 12
        })
    );
}

#[test]
fn test_merge_algebra() {
    let addresses: Vec<String> = SyntheticAddresses::new(2).take(3000).collect();
    let a = sketch_of(10, &addresses[..1500]);
    let b = sketch_of(10, &addresses[1000..2500]);
    let c = sketch_of(10, &addresses[2000..]);

    assert_eq!(merge(&a, &b).unwrap(), merge(&b, &a).unwrap());
    assert_eq!(
        merge(&merge(&a, &b).unwrap(), &c).unwrap(),
        merge(&a, &merge(&b, &c).unwrap()).unwrap()
    );
    assert_eq!(merge(&a, &a).unwrap(), a);
}

#[test]
fn test_accuracy_across_precisions_and_sizes() {
    for (precision, n, seed) in [(10, 2_000, 3), (12, 50_000, 4), (14, 200_000, 5)] {
        let addresses: Vec<String> = SyntheticAddresses::new(seed).take(n).collect();
        let counter = sketch_of(precision, &addresses);
        assert_within(counter.estimate(), n as f64, precision, 4.0);
    }
}

#[test]
fn test_duplicates_do_not_inflate_estimate() {
    let items = with_duplicates(9, 5000, 4);
    let report = compare(&items, 14).unwrap();
    assert_eq!(report.exact_count, 5000);

    let distinct: Vec<String> = SyntheticAddresses::new(9).take(5000).collect();
    assert_eq!(
        report.approximate_count,
        sketch_of(14, &distinct).estimate()
    );
}

#[test]
fn test_serialized_registers_merge_like_live_sketches() {
    let addresses: Vec<String> = SyntheticAddresses::new(21).take(4000).collect();
    let a = sketch_of(12, &addresses[..2000]);
    let b = sketch_of(12, &addresses[2000..]);

    let restored_b = HLLCounter::from_registers(
        ip_cardinality::Registers::from_bytes(b.registers().as_bytes()).unwrap(),
    );
    assert_eq!(merge(&a, &restored_b).unwrap(), merge(&a, &b).unwrap());
}

fn addresses_and_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::vec(any::<[u8; 4]>(), 0..400)
        .prop_map(|raw| {
            raw.into_iter()
                .map(|[a, b, c, d]| format!("{a}.{b}.{c}.{d}"))
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
}

proptest! {
    #[test]
    fn prop_order_does_not_matter((items, shuffled) in addresses_and_permutation()) {
        let report = compare(&items, 10).unwrap();
        let shuffled_report = compare(&shuffled, 10).unwrap();

        prop_assert_eq!(report.exact_count, shuffled_report.exact_count);
        prop_assert_eq!(report.approximate_count, shuffled_report.approximate_count);
        prop_assert_eq!(sketch_of(10, &items), sketch_of(10, &shuffled));
    }

    #[test]
    fn prop_update_is_idempotent((items, _) in addresses_and_permutation()) {
        let once = sketch_of(8, &items);
        let twice = sketch_of(8, items.iter().chain(items.iter()));
        prop_assert_eq!(once, twice);
    }
}
