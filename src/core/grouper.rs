//! Adaptive level-of-detail selection for series rendering.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ChartRole, IndexRange};

/// Indices to touch for one frame: `start, start + step, ..., end`.
///
/// `step` is a power of two and both bounds are multiples of it, so group
/// boundaries stay fixed while the viewport scrolls by sub-step amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPlan {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl IndexPlan {
    #[must_use]
    pub const fn full_resolution(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            step: 1,
        }
    }

    /// Number of indices the plan visits.
    #[must_use]
    pub const fn point_count(self) -> usize {
        (self.end - self.start) / self.step + 1
    }

    /// Iterates the planned indices in ascending order.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (self.start..=self.end).step_by(self.step)
    }

    /// Position of `index` within the plan, if the plan visits it.
    #[must_use]
    pub const fn slot_of(self, index: usize) -> Option<usize> {
        if index < self.start || index > self.end || (index - self.start) % self.step != 0 {
            return None;
        }
        Some((index - self.start) / self.step)
    }
}

/// Tuning for [`PointGrouper`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupingTuning {
    /// Target pixel distance covered by one rendered group.
    pub grouping_pixels: f64,
    /// Spans shorter than this are always rendered at full resolution.
    pub min_grouping_span: usize,
    /// Series longer than this get a span-dependent boost below `1.0`.
    pub boost_threshold: usize,
}

impl Default for GroupingTuning {
    fn default() -> Self {
        Self {
            grouping_pixels: 3.0,
            min_grouping_span: 100,
            boost_threshold: 10_000,
        }
    }
}

const MIN_BOOST: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointGrouper {
    tuning: GroupingTuning,
}

impl PointGrouper {
    #[must_use]
    pub const fn new(tuning: GroupingTuning) -> Self {
        Self { tuning }
    }

    #[must_use]
    pub const fn tuning(&self) -> GroupingTuning {
        self.tuning
    }

    /// Chooses the index plan for the visible `range` at `pixel_x` data units
    /// per pixel.
    ///
    /// Both bounds sit on multiples of the step. When rounding the end up would
    /// run past the last point, it is rounded down instead, so up to
    /// `step - 1` trailing points are left out of a grouped plan.
    ///
    /// Returns `None` for an empty axis or a degenerate (zero or non-finite)
    /// pixel scale.
    #[must_use]
    pub fn plan(
        &self,
        x_axis: &[f64],
        range: IndexRange,
        pixel_x: f64,
        role: ChartRole,
    ) -> Option<IndexPlan> {
        if x_axis.is_empty() || !pixel_x.is_finite() || pixel_x <= 0.0 {
            return None;
        }
        let last = x_axis.len() - 1;
        let start = range.lower.min(last).saturating_sub(1);
        let end = (range.upper + 1).min(last);
        if start > end {
            return None;
        }

        let span = end - start;
        if span < self.tuning.min_grouping_span || role.is_low_resolution() {
            return Some(IndexPlan::full_resolution(start, end));
        }

        let boost = self.boost(x_axis.len(), span);
        let distance_limit = boost * self.tuning.grouping_pixels * pixel_x;
        let group_size = group_size_within(x_axis, start, end, distance_limit);
        let step = floor_power_of_two(group_size);

        let snapped_start = (start / step) * step;
        let mut snapped_end = end.div_ceil(step) * step;
        if snapped_end > last {
            snapped_end = (end / step) * step;
        }
        if snapped_end < snapped_start {
            snapped_end = snapped_start;
        }

        trace!(
            start = snapped_start,
            end = snapped_end,
            step,
            boost,
            "planned point grouping"
        );
        Some(IndexPlan {
            start: snapped_start,
            end: snapped_end,
            step,
        })
    }

    fn boost(&self, total_len: usize, span: usize) -> f64 {
        if total_len <= self.tuning.boost_threshold || total_len == 0 {
            return 1.0;
        }
        (span as f64 / total_len as f64).sqrt().clamp(MIN_BOOST, 1.0)
    }
}

/// Counts how many consecutive steps from `start` stay within `limit` data
/// units; at least one.
fn group_size_within(x_axis: &[f64], start: usize, end: usize, limit: f64) -> usize {
    let origin = x_axis[start];
    let mut size = 0;
    for index in (start + 1)..=end {
        if x_axis[index] - origin > limit {
            break;
        }
        size += 1;
    }
    size.max(1)
}

fn floor_power_of_two(value: usize) -> usize {
    if value <= 1 {
        return 1;
    }
    1 << (usize::BITS - 1 - value.leading_zeros())
}
