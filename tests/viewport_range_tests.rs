use proptest::prelude::*;
use telechart::api::{RangeOptions, ViewportController};
use telechart::core::{ChartRole, IndexRange, range_indexes};

fn axis(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64 * 10.0).collect()
}

proptest! {
    #[test]
    fn set_range_stays_inside_domain(
        len in 2usize..500,
        min_x in -10_000.0f64..10_000.0,
        max_x in -10_000.0f64..10_000.0,
        width in 1.0f64..2_000.0,
    ) {
        let x = axis(len);
        let mut controller = ViewportController::new(ChartRole::Main, width, 16.0, &x);
        controller.set_range(&x, min_x, max_x, RangeOptions::default());

        let (from, to) = controller.range();
        let (domain_min, domain_max) = controller.domain().expect("domain");
        prop_assert!(domain_min <= from);
        prop_assert!(from <= to);
        prop_assert!(to <= domain_max);
        prop_assert!(controller.pixel_x() >= 0.0);
        prop_assert!(controller.left_padding_px() <= 16.0);
        prop_assert!(controller.right_padding_px() <= 16.0);
    }

    #[test]
    fn range_on_data_points_includes_them(
        len in 2usize..400,
        a in 0usize..400,
        b in 0usize..400,
    ) {
        let x = axis(len);
        let (i, j) = (a % len, b % len);
        let (lo, hi) = (i.min(j), i.max(j));

        let range = range_indexes(&x, x[lo], x[hi]).expect("range");
        prop_assert_eq!(range, IndexRange::new(lo, hi));
    }

    #[test]
    fn range_between_points_is_tightest_bracket(
        len in 3usize..400,
        a in 0usize..400,
        frac_a in 0.01f64..0.99,
        span in 1usize..50,
    ) {
        let x = axis(len);
        let i = a % (len - 1);
        let min_x = x[i] + 10.0 * frac_a;
        let max_x = (min_x + span as f64 * 10.0).min(x[len - 1]);

        let range = range_indexes(&x, min_x, max_x).expect("range");
        prop_assert!(x[range.lower] >= min_x || range.lower == i + 1);
        prop_assert!(range.lower == 0 || x[range.lower - 1] < min_x);
        prop_assert!(range.upper == len - 1 || x[range.upper + 1] > max_x);
        prop_assert!(range.lower <= range.upper);
    }
}

#[test]
fn inverted_bounds_are_swapped() {
    let x = axis(11);
    let mut controller = ViewportController::new(ChartRole::Main, 500.0, 0.0, &x);
    controller.set_range(&x, 80.0, 20.0, RangeOptions::default());
    assert_eq!(controller.range(), (20.0, 80.0));
    assert_eq!(controller.range_indexes(), Some(IndexRange::new(2, 8)));
}

#[test]
fn empty_axis_has_no_range() {
    let mut controller = ViewportController::new(ChartRole::Main, 500.0, 16.0, &[]);
    let change = controller.set_range(&[], 0.0, 1.0, RangeOptions::default());
    assert!(!change.range_changed);
    assert_eq!(controller.range_indexes(), None);
    assert_eq!(controller.pixel_x(), 0.0);
}

#[test]
fn padding_shrinks_away_from_edges() {
    let x = axis(101);
    let mut controller = ViewportController::new(ChartRole::Main, 500.0, 20.0, &x);

    controller.set_range(&x, 0.0, 1000.0, RangeOptions::default());
    assert_eq!(controller.left_padding_px(), 20.0);
    assert_eq!(controller.right_padding_px(), 20.0);

    controller.set_range(&x, 400.0, 600.0, RangeOptions::default());
    assert_eq!(controller.left_padding_px(), 0.0);
    assert_eq!(controller.right_padding_px(), 0.0);
    assert!((controller.pixel_x() - 200.0 / 500.0).abs() <= 1e-12);
}
