//! Property-based tests for domain value objects and entities
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{WeatherReport, YearRange, YearStatistics};
use proptest::prelude::*;

// ============================================================================
// YearRange Property Tests
// ============================================================================

mod year_range_tests {
    use super::*;

    proptest! {
        #[test]
        fn normalized_range_is_non_decreasing(
            start in proptest::option::of(-3000i32..3000),
            end in proptest::option::of(-3000i32..3000)
        ) {
            let range = YearRange::normalize(start, end);
            prop_assert!(range.start() <= range.end());
            prop_assert!(range.start() > 0);
        }

        #[test]
        fn positive_bounds_are_kept_as_a_set(
            a in 1i32..3000,
            b in 1i32..3000
        ) {
            let range = YearRange::normalize(Some(a), Some(b));
            prop_assert_eq!(range.start(), a.min(b));
            prop_assert_eq!(range.end(), a.max(b));
        }

        #[test]
        fn non_positive_bounds_use_defaults(
            a in -3000i32..=0,
            b in -3000i32..=0
        ) {
            let range = YearRange::normalize(Some(a), Some(b));
            prop_assert_eq!((range.start(), range.end()), (1950, 2014));
        }

        #[test]
        fn len_matches_years_iterator(
            start in 1i32..2500,
            span in 0i32..200
        ) {
            let range = YearRange::new(start, start + span).unwrap();
            prop_assert_eq!(range.len(), range.years().count());
        }
    }
}

// ============================================================================
// WeatherReport Property Tests
// ============================================================================

mod weather_report_tests {
    use super::*;

    fn arb_stats() -> impl Strategy<Value = YearStatistics> {
        (1900i32..2100, proptest::collection::vec(-60i32..60, 0..10))
            .prop_map(|(year, values)| YearStatistics::from_values(year, values))
    }

    fn arb_report() -> impl Strategy<Value = WeatherReport> {
        proptest::collection::vec(arb_stats(), 0..8)
            .prop_map(|stats| stats.into_iter().collect())
    }

    proptest! {
        #[test]
        fn merge_is_commutative(a in arb_report(), b in arb_report()) {
            prop_assert_eq!(a.clone().merge(b.clone()), b.merge(a));
        }

        #[test]
        fn merge_is_associative(a in arb_report(), b in arb_report(), c in arb_report()) {
            let left = a.clone().merge(b.clone()).merge(c.clone());
            let right = a.merge(b.merge(c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn empty_is_merge_identity(a in arb_report()) {
            prop_assert_eq!(a.clone().merge(WeatherReport::new()), a);
        }

        #[test]
        fn folding_singletons_covers_range(start in 1900i32..2050, span in 0i32..40) {
            let range = YearRange::new(start, start + span).unwrap();
            let report = range
                .years()
                .rev()
                .map(|year| WeatherReport::singleton(YearStatistics::empty(year)))
                .fold(WeatherReport::new(), WeatherReport::merge);
            prop_assert!(report.covers_exactly(&range));
        }

        #[test]
        fn statistics_bounds_contain_mean(
            values in proptest::collection::vec(-100i32..100, 1..50)
        ) {
            let stats = YearStatistics::from_values(2000, values.iter().copied());
            let mean = stats.mean().unwrap();
            prop_assert!(f64::from(stats.min().unwrap()) <= mean);
            prop_assert!(mean <= f64::from(stats.max().unwrap()));
            prop_assert_eq!(stats.count(), values.len() as u64);
        }
    }
}
