use serde::{Deserialize, Serialize};

use crate::core::IndexRange;

/// Minimum/maximum pair of y values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    pub min: f64,
    pub max: f64,
}

impl Extrema {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Linear scan of `values[range]`; non-finite samples are skipped.
    ///
    /// Returns `None` when the range is out of bounds or holds no finite value.
    #[must_use]
    pub fn scan(values: &[f64], range: IndexRange) -> Option<Self> {
        let window = values.get(range.lower..=range.upper)?;
        Self::of_iter(window.iter().copied())
    }

    #[must_use]
    pub fn of_iter(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |acc: Option<Self>, value| {
                Some(match acc {
                    Some(acc) => Self::new(acc.min.min(value), acc.max.max(value)),
                    None => Self::new(value, value),
                })
            })
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Widens a zero span so the pair can be used as a scale domain.
    #[must_use]
    pub fn non_degenerate(self) -> Self {
        if self.span() > 0.0 {
            return self;
        }
        let half = if self.max == 0.0 {
            1.0
        } else {
            self.max.abs() * 0.5
        };
        Self::new(self.min - half, self.max + half)
    }

    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        let tolerance = 1e-9 * self.span().abs().max(1.0);
        (self.min - other.min).abs() <= tolerance && (self.max - other.max).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::Extrema;
    use crate::core::IndexRange;

    #[test]
    fn scan_is_bounded_by_range() {
        let values = [5.0, -3.0, 8.0, 1.0, 100.0];
        assert_eq!(
            Extrema::scan(&values, IndexRange::new(1, 3)),
            Some(Extrema::new(-3.0, 8.0))
        );
        assert_eq!(Extrema::scan(&values, IndexRange::new(3, 9)), None);
    }

    #[test]
    fn scan_skips_non_finite_samples() {
        let values = [f64::NAN, 2.0, f64::INFINITY];
        assert_eq!(
            Extrema::scan(&values, IndexRange::new(0, 2)),
            Some(Extrema::new(2.0, 2.0))
        );
        assert_eq!(Extrema::of_iter([f64::NAN]), None);
    }

    #[test]
    fn degenerate_span_is_widened_around_value() {
        let widened = Extrema::new(10.0, 10.0).non_degenerate();
        assert!(widened.min < 10.0 && widened.max > 10.0);
        let zero = Extrema::new(0.0, 0.0).non_degenerate();
        assert_eq!(zero, Extrema::new(-1.0, 1.0));
    }
}
