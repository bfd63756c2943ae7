use crate::core::{ChartScale, IndexPlan, SeriesSlice};
use crate::render::{Color, PathPrimitive};

/// Projects a line series into one stroked path over the planned indices.
///
/// Only indices `plan.start, plan.start + plan.step, ..., plan.end` are read.
/// Non-finite samples are skipped. Returns `None` for a fully transparent
/// series or fewer than two drawable points.
#[must_use]
pub fn project_line_path(
    series: SeriesSlice<'_>,
    plan: IndexPlan,
    scale: ChartScale,
    color: Color,
    opacity: f64,
    line_width: f64,
) -> Option<PathPrimitive> {
    if opacity <= 0.0 || plan.end >= series.values.len() || plan.end >= series.x_axis.len() {
        return None;
    }

    let mut points = Vec::with_capacity(plan.point_count());
    for index in plan.indices() {
        let y = series.values[index];
        if !y.is_finite() {
            continue;
        }
        points.push((scale.x_to_canvas(series.x_axis[index]), scale.y_to_canvas(y)));
    }

    if points.len() < 2 {
        return None;
    }
    Some(PathPrimitive::stroked(points, color.faded(opacity), line_width))
}

#[cfg(test)]
mod tests {
    use super::project_line_path;
    use crate::core::{ChartScale, IndexPlan, SeriesSlice};
    use crate::render::Color;

    #[test]
    fn follows_plan_stride_and_scale() {
        let x: Vec<f64> = (0..9).map(f64::from).collect();
        let y: Vec<f64> = (0..9).map(|i| f64::from(i) * 10.0).collect();
        let scale = ChartScale::new(0.0, 0.125, 0.0, 0.0, 1.0, 100.0).expect("scale");
        let plan = IndexPlan {
            start: 0,
            end: 8,
            step: 4,
        };
        let path = project_line_path(
            SeriesSlice {
                x_axis: &x,
                values: &y,
            },
            plan,
            scale,
            Color::rgb(1.0, 0.0, 0.0),
            0.5,
            2.0,
        )
        .expect("path");

        assert_eq!(path.points, vec![(0.0, 100.0), (32.0, 60.0), (64.0, 20.0)]);
        let stroke = path.stroke.expect("stroke");
        assert_eq!(stroke.color.alpha, 0.5);
        assert_eq!(stroke.width, 2.0);
    }

    #[test]
    fn hidden_series_produce_nothing() {
        let x = [0.0, 1.0];
        let scale = ChartScale::new(0.0, 1.0, 0.0, 0.0, 1.0, 10.0).expect("scale");
        let path = project_line_path(
            SeriesSlice {
                x_axis: &x,
                values: &x,
            },
            IndexPlan::full_resolution(0, 1),
            scale,
            Color::rgb(0.0, 0.0, 0.0),
            0.0,
            1.0,
        );
        assert!(path.is_none());
    }
}
