use tracing::trace;

use crate::core::{ChartRole, SeriesKind};
use crate::error::ChartResult;
use crate::render::{
    CanvasLayerKind, CirclePrimitive, LinePrimitive, PathStroke, RectPrimitive, RenderFrame,
    Renderer, SurfaceFrame, SurfaceId,
};

use super::{ChartEngine, ChartView, ColorRole, DirtyFlags, ThemeTable};

const CURSOR_POINT_RADIUS_PX: f64 = 4.0;
const WINDOW_HANDLE_WIDTH_PX: f64 = 6.0;

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    /// Materializes the dirty surfaces of both views, bottom layer first, and
    /// hands them to the renderer. On a renderer error the flags are put back
    /// so the next call retries the same surfaces.
    pub(super) fn render<R: Renderer>(engine: &mut ChartEngine<R>) -> ChartResult<()> {
        let main_dirty = engine.main.take_dirty();
        let navigator_dirty = engine.navigator.take_dirty();
        if main_dirty.is_none() && navigator_dirty.is_none() {
            return Ok(());
        }

        let mut frame = RenderFrame::default();
        collect_view_layers(&mut frame, &mut engine.main, main_dirty, &engine.theme);
        if main_dirty.redraw_cursor_requested() {
            frame.push(cursor_surface(engine));
        }
        collect_view_layers(
            &mut frame,
            &mut engine.navigator,
            navigator_dirty,
            &engine.theme,
        );
        if navigator_dirty.redraw_cursor_requested() {
            frame.push(window_surface(engine));
        }

        if let Err(error) = engine.renderer.render(&frame) {
            engine.main.restore_dirty(main_dirty);
            engine.navigator.restore_dirty(navigator_dirty);
            return Err(error);
        }
        trace!(surfaces = frame.surfaces.len(), "frame rendered");
        Ok(())
    }
}

fn collect_view_layers(
    frame: &mut RenderFrame,
    view: &mut ChartView,
    dirty: DirtyFlags,
    theme: &ThemeTable,
) {
    if dirty.redraw_axis_needed() {
        frame.push(view.axis_surface(theme));
    }
    if dirty.redraw_chart_needed() {
        frame.push(view.series_surface());
    }
}

/// Main overlay: vertical cursor line plus a marker on every visible line.
fn cursor_surface<R: Renderer>(engine: &ChartEngine<R>) -> SurfaceFrame {
    let view = &engine.main;
    let mut surface = SurfaceFrame::new(
        SurfaceId::new(ChartRole::Main, CanvasLayerKind::Cursor),
        view.surface(),
    );
    let Some(index) = engine.cursor.index().filter(|_| engine.cursor.is_visible()) else {
        return surface;
    };

    let ratio = engine.config.device_pixel_ratio;
    let x = engine.cursor.canvas_x();
    surface.lines.push(LinePrimitive::new(
        x,
        0.0,
        x,
        view.bottom_line(),
        ratio,
        engine.theme.color(ColorRole::CursorLine),
    ));

    let background = engine.theme.color(ColorRole::Background);
    let columns = engine.data.series();
    for (series_index, (column, state)) in columns.iter().zip(view.series_states()).enumerate() {
        if column.kind != SeriesKind::Line || !state.visible() {
            continue;
        }
        let (Some(scale), Some(value)) = (view.series_scale(series_index), column.values.get(index))
        else {
            continue;
        };
        let y = scale.y_to_canvas(*value);
        if !y.is_finite() {
            continue;
        }
        surface.circles.push(CirclePrimitive {
            x,
            y,
            radius: CURSOR_POINT_RADIUS_PX * ratio,
            fill_color: background,
            stroke: Some(PathStroke {
                color: column.color.faded(state.opacity()),
                width: engine.config.main_line_width * ratio,
            }),
        });
    }
    surface
}

/// Navigator overlay: dimmed areas outside the window and the window frame.
fn window_surface<R: Renderer>(engine: &ChartEngine<R>) -> SurfaceFrame {
    let view = &engine.navigator;
    let mut surface = SurfaceFrame::new(
        SurfaceId::new(ChartRole::Navigator, CanvasLayerKind::Cursor),
        view.surface(),
    );
    let (from, to) = engine.window.window();
    let (Some(left), Some(right)) = (view.x_to_canvas(from), view.x_to_canvas(to)) else {
        return surface;
    };

    let ratio = engine.config.device_pixel_ratio;
    let width = f64::from(view.surface().width);
    let height = f64::from(view.surface().height);
    let left = left.clamp(0.0, width);
    let right = right.clamp(left, width);
    let mask = engine.theme.color(ColorRole::NavigatorMask);
    let frame = engine.theme.color(ColorRole::NavigatorFrame);

    if left > 0.0 {
        surface
            .rects
            .push(RectPrimitive::new(0.0, 0.0, left, height, mask));
    }
    if right < width {
        surface
            .rects
            .push(RectPrimitive::new(right, 0.0, width - right, height, mask));
    }

    let handle = (WINDOW_HANDLE_WIDTH_PX * ratio).min(right - left);
    surface
        .rects
        .push(RectPrimitive::new(left, 0.0, handle, height, frame));
    surface
        .rects
        .push(RectPrimitive::new(right - handle, 0.0, handle, height, frame));
    for y in [ratio / 2.0, height - ratio / 2.0] {
        surface
            .lines
            .push(LinePrimitive::new(left, y, right, y, ratio, frame));
    }
    surface
}
