//! Index search over the ascending shared x axis.

use crate::core::IndexRange;

/// Returns `(lower, upper)` indexes bracketing `value`.
///
/// `lower` is the last index with `x <= value`, `upper` the first index with
/// `x >= value`. An exact hit returns the same index twice. Values outside the
/// axis clamp to the first or last index. Returns `None` for an empty axis or a
/// non-finite value.
#[must_use]
pub fn bracket(x_axis: &[f64], value: f64) -> Option<(usize, usize)> {
    if x_axis.is_empty() || !value.is_finite() {
        return None;
    }
    let last = x_axis.len() - 1;

    // First index whose x is >= value.
    let upper = x_axis.partition_point(|x| *x < value);
    if upper > last {
        return Some((last, last));
    }
    if x_axis[upper] == value {
        return Some((upper, upper));
    }
    if upper == 0 {
        return Some((0, 0));
    }
    Some((upper - 1, upper))
}

/// Maps an inclusive data range onto the first/last index inside it.
///
/// A boundary exactly on a data point includes that point. When the range falls
/// strictly between two neighbouring points, the surrounding pair is returned so
/// callers always get a drawable span.
#[must_use]
pub fn range_indexes(x_axis: &[f64], min_x: f64, max_x: f64) -> Option<IndexRange> {
    let (min_x, max_x) = if min_x <= max_x {
        (min_x, max_x)
    } else {
        (max_x, min_x)
    };
    let (_, first_inside) = bracket(x_axis, min_x)?;
    let (last_inside, _) = bracket(x_axis, max_x)?;

    Some(IndexRange::new(
        first_inside.min(last_inside),
        first_inside.max(last_inside),
    ))
}

#[cfg(test)]
mod tests {
    use super::{bracket, range_indexes};
    use crate::core::IndexRange;

    const AXIS: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];

    #[test]
    fn bracket_returns_same_index_on_exact_hit() {
        for (index, value) in AXIS.iter().enumerate() {
            assert_eq!(bracket(&AXIS, *value), Some((index, index)));
        }
    }

    #[test]
    fn bracket_surrounds_values_between_points() {
        assert_eq!(bracket(&AXIS, 25.0), Some((1, 2)));
        assert_eq!(bracket(&AXIS, 49.9), Some((3, 4)));
    }

    #[test]
    fn bracket_clamps_outside_values() {
        assert_eq!(bracket(&AXIS, -5.0), Some((0, 0)));
        assert_eq!(bracket(&AXIS, 500.0), Some((4, 4)));
        assert_eq!(bracket(&[], 1.0), None);
        assert_eq!(bracket(&AXIS, f64::NAN), None);
    }

    #[test]
    fn range_indexes_include_points_on_boundaries() {
        assert_eq!(range_indexes(&AXIS, 20.0, 40.0), Some(IndexRange::new(1, 3)));
        assert_eq!(range_indexes(&AXIS, 15.0, 45.0), Some(IndexRange::new(1, 3)));
    }

    #[test]
    fn range_inside_a_gap_returns_surrounding_pair() {
        assert_eq!(range_indexes(&AXIS, 21.0, 29.0), Some(IndexRange::new(1, 2)));
    }

    #[test]
    fn inverted_range_is_normalized() {
        assert_eq!(range_indexes(&AXIS, 40.0, 20.0), Some(IndexRange::new(1, 3)));
    }
}
