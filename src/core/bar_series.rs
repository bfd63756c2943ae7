use crate::core::{ChartScale, IndexPlan, SeriesSlice};
use crate::render::{Color, PathPrimitive};

/// Projects one stacked bar series as a single filled staircase polygon.
///
/// `accumulated` holds the running stack height per plan slot (index
/// `(i - plan.start) / plan.step`). Each bar spans `[base, base + y * opacity]`
/// and the returned vector is the updated running sum for the next series.
/// A missing or mismatched accumulator starts from zero.
#[must_use]
pub fn project_stacked_bars(
    series: SeriesSlice<'_>,
    plan: IndexPlan,
    scale: ChartScale,
    color: Color,
    opacity: f64,
    accumulated: Option<Vec<f64>>,
) -> (Option<PathPrimitive>, Vec<f64>) {
    let slots = plan.point_count();
    let mut accumulated = match accumulated {
        Some(values) if values.len() == slots => values,
        _ => vec![0.0; slots],
    };
    if plan.end >= series.values.len() || plan.end >= series.x_axis.len() {
        return (None, accumulated);
    }

    let mut top_edge = Vec::with_capacity(slots * 2);
    let mut bottom_edge = Vec::with_capacity(slots * 2);
    for (slot, index) in plan.indices().enumerate() {
        let value = series.values[index];
        let height = if value.is_finite() {
            value * opacity
        } else {
            0.0
        };
        let base = accumulated[slot];
        let top = base + height;
        accumulated[slot] = top;

        let left = scale.x_to_canvas(series.x_axis[index]);
        let right = left + series.bar_width_at(index, plan.step) / scale.pixel_x;
        let top_y = scale.y_to_canvas(top);
        let base_y = scale.y_to_canvas(base);
        top_edge.push((left, top_y));
        top_edge.push((right, top_y));
        bottom_edge.push((left, base_y));
        bottom_edge.push((right, base_y));
    }

    if opacity <= 0.0 || top_edge.is_empty() {
        return (None, accumulated);
    }
    top_edge.extend(bottom_edge.into_iter().rev());
    (
        Some(PathPrimitive::filled(top_edge, color.faded(opacity))),
        accumulated,
    )
}
