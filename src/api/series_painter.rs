use crate::core::{
    ChartScale, IndexPlan, SeriesColumn, SeriesKind, SeriesSlice, StackSums,
    project_line_path, project_percentage_area, project_stacked_bars,
};
use crate::render::PathPrimitive;

/// Per-frame inputs shared by every series painted in one pass.
#[derive(Debug, Clone, Copy)]
pub struct PaintPass<'a> {
    pub x_axis: &'a [f64],
    pub plan: IndexPlan,
    pub scale: ChartScale,
    pub line_width: f64,
    pub sums: Option<&'a StackSums>,
}

/// Paints one series over `pass.plan` and threads the stacking accumulator.
///
/// Lines pass `accumulated` through untouched; bars and percentage areas
/// consume it as their base and return the new running sums. Percentage areas
/// need stacked totals and paint nothing without them.
#[must_use]
pub fn draw_by_interval(
    pass: &PaintPass<'_>,
    column: &SeriesColumn,
    opacity: f64,
    accumulated: Option<Vec<f64>>,
) -> (Option<PathPrimitive>, Option<Vec<f64>>) {
    let slice = SeriesSlice {
        x_axis: pass.x_axis,
        values: &column.values,
    };
    match column.kind {
        SeriesKind::Line => (
            project_line_path(
                slice,
                pass.plan,
                pass.scale,
                column.color,
                opacity,
                pass.line_width,
            ),
            accumulated,
        ),
        SeriesKind::Bar => {
            let (path, sums) = project_stacked_bars(
                slice,
                pass.plan,
                pass.scale,
                column.color,
                opacity,
                accumulated,
            );
            (path, Some(sums))
        }
        SeriesKind::PercentageArea => match pass.sums {
            Some(totals) => {
                let (path, sums) = project_percentage_area(
                    slice,
                    pass.plan,
                    pass.scale,
                    column.color,
                    opacity,
                    totals,
                    accumulated,
                );
                (path, Some(sums))
            }
            None => (None, accumulated),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{PaintPass, draw_by_interval};
    use crate::core::{
        ChartData, ChartFlags, ChartScale, HandleAllocator, IndexPlan, SeriesInput, SeriesKind,
        StackSums,
    };

    fn data() -> ChartData {
        ChartData::from_columns(
            vec![0.0, 1.0, 2.0, 3.0],
            vec![
                SeriesInput::new("a", SeriesKind::Bar, vec![1.0, 2.0, 3.0, 4.0]),
                SeriesInput::new("b", SeriesKind::Bar, vec![4.0, 3.0, 2.0, 1.0]),
                SeriesInput::new("c", SeriesKind::Line, vec![1.0, 1.0, 1.0, 1.0]),
            ],
            ChartFlags {
                stacked: true,
                ..ChartFlags::default()
            },
            &HandleAllocator::new(),
        )
        .expect("data")
    }

    #[test]
    fn bars_stack_and_lines_pass_accumulator_through() {
        let data = data();
        let pass = PaintPass {
            x_axis: data.x_axis(),
            plan: IndexPlan::full_resolution(0, 3),
            scale: ChartScale::new(0.0, 0.01, 0.0, 0.0, 0.1, 100.0).expect("scale"),
            line_width: 1.0,
            sums: None,
        };

        let (first, accumulated) = draw_by_interval(&pass, &data.series()[0], 1.0, None);
        assert!(first.is_some());
        let (_, accumulated) = draw_by_interval(&pass, &data.series()[1], 1.0, accumulated);
        assert_eq!(accumulated.as_deref(), Some(&[5.0, 5.0, 5.0, 5.0][..]));

        let (line, passed) = draw_by_interval(&pass, &data.series()[2], 1.0, accumulated.clone());
        assert!(line.is_some());
        assert_eq!(passed, accumulated);
    }

    #[test]
    fn percentage_area_without_totals_paints_nothing() {
        let handles = HandleAllocator::new();
        let data = ChartData::from_columns(
            vec![0.0, 1.0],
            vec![SeriesInput::new("a", SeriesKind::PercentageArea, vec![1.0, 1.0])],
            ChartFlags::default(),
            &handles,
        )
        .expect("data");
        let mut pass = PaintPass {
            x_axis: data.x_axis(),
            plan: IndexPlan::full_resolution(0, 1),
            scale: ChartScale::new(0.0, 0.01, 0.0, 0.0, 1.0, 100.0).expect("scale"),
            line_width: 1.0,
            sums: None,
        };
        let (path, accumulated) = draw_by_interval(&pass, &data.series()[0], 1.0, None);
        assert!(path.is_none());
        assert!(accumulated.is_none());

        let mut sums = StackSums::new(2);
        sums.refresh([(&data.series()[0].values[..], 1.0)]);
        pass.sums = Some(&sums);
        let (path, accumulated) = draw_by_interval(&pass, &data.series()[0], 1.0, None);
        assert!(path.is_some());
        assert_eq!(accumulated.as_deref(), Some(&[100.0, 100.0][..]));
    }
}
