use crate::core::{ChartScale, IndexPlan, SeriesSlice, StackSums};
use crate::render::{Color, PathPrimitive};

/// Projects one percentage-area series as a filled band.
///
/// Each sample becomes `y * opacity / total * 100`, where `total` comes from
/// the shared [`StackSums`]. The band spans from the running percentage in
/// `accumulated` (the baseline for the first series) to the new running value,
/// which is returned for the next series.
#[must_use]
pub fn project_percentage_area(
    series: SeriesSlice<'_>,
    plan: IndexPlan,
    scale: ChartScale,
    color: Color,
    opacity: f64,
    sums: &StackSums,
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

    let mut top_edge = Vec::with_capacity(slots);
    let mut bottom_edge = Vec::with_capacity(slots);
    for (slot, index) in plan.indices().enumerate() {
        let total = sums.total(index);
        let value = series.values[index];
        let percent = if total > 0.0 && value.is_finite() {
            value * opacity / total * 100.0
        } else {
            0.0
        };
        let base = accumulated[slot];
        let top = base + percent;
        accumulated[slot] = top;

        let x = scale.x_to_canvas(series.x_axis[index]);
        top_edge.push((x, scale.y_to_canvas(top)));
        bottom_edge.push((x, scale.y_to_canvas(base)));
    }

    if opacity <= 0.0 || top_edge.len() < 2 {
        return (None, accumulated);
    }
    top_edge.extend(bottom_edge.into_iter().rev());
    (
        Some(PathPrimitive::filled(top_edge, color.faded(1.0))),
        accumulated,
    )
}

#[cfg(test)]
mod tests {
    use super::project_percentage_area;
    use crate::core::{ChartScale, IndexPlan, SeriesSlice, StackSums};
    use crate::render::Color;

    #[test]
    fn bands_fill_to_one_hundred_percent() {
        let x = [0.0, 1.0, 2.0];
        let first = [1.0, 3.0, 0.0];
        let second = [3.0, 1.0, 5.0];
        let mut sums = StackSums::new(3);
        sums.refresh([(&first[..], 1.0), (&second[..], 1.0)]);
        let scale = ChartScale::new(0.0, 0.01, 0.0, 0.0, 1.0, 100.0).expect("scale");
        let plan = IndexPlan::full_resolution(0, 2);

        let (_, acc) = project_percentage_area(
            SeriesSlice {
                x_axis: &x,
                values: &first,
            },
            plan,
            scale,
            Color::rgb(1.0, 0.0, 0.0),
            1.0,
            &sums,
            None,
        );
        assert_eq!(acc, vec![25.0, 75.0, 0.0]);

        let (path, acc) = project_percentage_area(
            SeriesSlice {
                x_axis: &x,
                values: &second,
            },
            plan,
            scale,
            Color::rgb(0.0, 0.0, 1.0),
            1.0,
            &sums,
            Some(acc),
        );
        assert_eq!(acc, vec![100.0, 100.0, 100.0]);
        let path = path.expect("path");
        assert_eq!(path.points.len(), 6);
        assert_eq!(path.points[0], (0.0, 0.0));
        assert_eq!(path.points[5], (0.0, 75.0));
    }
}
