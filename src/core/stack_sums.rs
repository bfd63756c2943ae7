//! Per-index totals of stacked series with range-maximum queries.

use crate::core::IndexRange;

/// Opacity-weighted per-index sums across stacked series.
///
/// Allocated once when a chart is stacked; [`StackSums::refresh`] rewrites the
/// totals in place whenever a series weight changes. A segment tree over the
/// totals answers "tallest stack in this index range" in `O(log n)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackSums {
    totals: Vec<f64>,
    tree: Vec<f64>,
    leaves: usize,
}

impl StackSums {
    #[must_use]
    pub fn new(len: usize) -> Self {
        let leaves = len.next_power_of_two().max(1);
        Self {
            totals: vec![0.0; len],
            tree: vec![0.0; 2 * leaves],
            leaves,
        }
    }

    /// Recomputes totals from `(values, weight)` columns.
    ///
    /// Non-finite samples count as zero.
    pub fn refresh<'a>(&mut self, columns: impl IntoIterator<Item = (&'a [f64], f64)>) {
        self.totals.iter_mut().for_each(|total| *total = 0.0);
        for (values, weight) in columns {
            if weight <= 0.0 {
                continue;
            }
            for (total, value) in self.totals.iter_mut().zip(values) {
                if value.is_finite() {
                    *total += value * weight;
                }
            }
        }
        self.rebuild_tree();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    #[must_use]
    pub fn total(&self, index: usize) -> f64 {
        self.totals.get(index).copied().unwrap_or(0.0)
    }

    /// Largest total inside `range`; `None` when the range is out of bounds.
    #[must_use]
    pub fn max_in(&self, range: IndexRange) -> Option<f64> {
        if range.upper >= self.totals.len() || range.lower > range.upper {
            return None;
        }
        let mut left = range.lower + self.leaves;
        let mut right = range.upper + self.leaves + 1;
        let mut best = f64::NEG_INFINITY;
        while left < right {
            if left & 1 == 1 {
                best = best.max(self.tree[left]);
                left += 1;
            }
            if right & 1 == 1 {
                right -= 1;
                best = best.max(self.tree[right]);
            }
            left >>= 1;
            right >>= 1;
        }
        Some(best)
    }

    fn rebuild_tree(&mut self) {
        self.tree.iter_mut().for_each(|node| *node = f64::NEG_INFINITY);
        self.tree[self.leaves..self.leaves + self.totals.len()].copy_from_slice(&self.totals);
        for node in (1..self.leaves).rev() {
            self.tree[node] = self.tree[2 * node].max(self.tree[2 * node + 1]);
        }
    }
}
