use std::sync::Arc;

use tracing::trace;

use crate::animation::TimingFunction;
use crate::api::axis_label_format::{format_x_label, format_y_label};
use crate::api::axis_ticks::{XTickSequence, nice_y_ticks};
use crate::api::engine_config::PLOT_TOP_PADDING_EM;
use crate::api::series_painter::{PaintPass, draw_by_interval};
use crate::api::{
    AxisLabelEngine, AxisOrientation, ChartEngineConfig, ColorRole, DirtyFlags, ExtremaAnimator,
    RangeChange, RangeOptions, SeriesState, ThemeTable, ViewportController,
};
use crate::core::{
    ChartData, ChartRole, ChartScale, Extrema, HandleAllocator, IndexPlan, IndexRange,
    PointGrouper, SeriesColumn, SeriesId, SeriesKind, StackSums, Viewport,
};
use crate::render::{
    CanvasLayerKind, LinePrimitive, SurfaceFrame, SurfaceId, TextHAlign, TextPrimitive,
};

const DAY_MS: f64 = 86_400_000.0;
const LABEL_INSET_PX: f64 = 4.0;

/// Pixel geometry of one view, already multiplied by the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewGeometry {
    surface: Viewport,
    top_padding_px: f64,
    bottom_line: f64,
    line_width: f64,
    font_px: f64,
    label_min_width_px: f64,
}

impl ViewGeometry {
    fn for_role(role: ChartRole, surface: Viewport, config: &ChartEngineConfig) -> Self {
        let ratio = config.device_pixel_ratio;
        let height = f64::from(surface.height);
        match role {
            ChartRole::Main => Self {
                surface,
                top_padding_px: config.label_font_px * ratio * PLOT_TOP_PADDING_EM,
                bottom_line: height - config.x_axis_height_px * ratio,
                line_width: config.main_line_width * ratio,
                font_px: config.label_font_px * ratio,
                label_min_width_px: config.x_label_min_width_px * ratio,
            },
            ChartRole::Navigator => Self {
                surface,
                top_padding_px: 2.0 * ratio,
                bottom_line: height - 2.0 * ratio,
                line_width: config.navigator_line_width * ratio,
                font_px: config.label_font_px * ratio,
                label_min_width_px: config.x_label_min_width_px * ratio,
            },
        }
    }

    fn width(&self) -> f64 {
        f64::from(self.surface.width)
    }

    fn plot_height(&self) -> f64 {
        self.bottom_line - self.top_padding_px
    }
}

/// One of the two synchronized views over the shared dataset.
///
/// The main view carries axis labels and grouping; the navigator always spans
/// the whole domain at full resolution.
#[derive(Debug, Clone)]
pub struct ChartView {
    role: ChartRole,
    data: Arc<ChartData>,
    handles: HandleAllocator,
    geometry: ViewGeometry,
    opacity_ms: f64,
    timing: TimingFunction,
    y_tick_count: usize,
    controller: ViewportController,
    grouper: PointGrouper,
    plan: Option<IndexPlan>,
    series: Vec<SeriesState>,
    sums: Option<StackSums>,
    global: Option<Extrema>,
    extrema: ExtremaAnimator,
    x_ticks: XTickSequence,
    x_label_interval: f64,
    x_labels: Option<AxisLabelEngine>,
    y_labels: Vec<AxisLabelEngine>,
    dirty: DirtyFlags,
    axes_stale: bool,
}

impl ChartView {
    #[must_use]
    pub fn new(
        role: ChartRole,
        data: Arc<ChartData>,
        handles: HandleAllocator,
        config: &ChartEngineConfig,
    ) -> Self {
        let surface = match role {
            ChartRole::Main => config.main_viewport,
            ChartRole::Navigator => config.navigator_viewport,
        };
        let geometry = ViewGeometry::for_role(role, surface, config);
        let padding_px = match role {
            ChartRole::Main => config.padding_pixels * config.device_pixel_ratio,
            ChartRole::Navigator => 0.0,
        };
        let controller =
            ViewportController::new(role, geometry.width(), padding_px, data.x_axis());

        let series = data
            .series()
            .iter()
            .map(|column| {
                SeriesState::new(
                    column.id,
                    config.extrema_animation_ms,
                    config.timing_function,
                )
            })
            .collect();
        let needs_sums = data.is_stacked()
            || data
                .series()
                .iter()
                .any(|column| column.kind == SeriesKind::Bar);
        let sums = needs_sums.then(|| {
            let mut sums = StackSums::new(data.len());
            sums.refresh(
                data.series()
                    .iter()
                    .filter(|column| column.kind != SeriesKind::Line)
                    .map(|column| (&column.values[..], 1.0)),
            );
            sums
        });
        let global = all_series_extrema(&data, sums.as_ref());

        let label_engine = |orientation| {
            AxisLabelEngine::new(
                orientation,
                handles.clone(),
                config.label_pool_capacity,
                config.label_fade_ms,
                config.timing_function,
            )
        };
        let (x_labels, y_labels) = match role {
            ChartRole::Main => {
                let y_axes = if data.flags().y_scaled {
                    data.series().len().clamp(1, 2)
                } else {
                    1
                };
                (
                    Some(label_engine(AxisOrientation::X)),
                    (0..y_axes).map(|_| label_engine(AxisOrientation::Y)).collect(),
                )
            }
            ChartRole::Navigator => (None, Vec::new()),
        };

        Self {
            role,
            handles,
            geometry,
            opacity_ms: config.opacity_animation_ms,
            timing: config.timing_function,
            y_tick_count: config.y_tick_count,
            controller,
            grouper: PointGrouper::new(config.grouping_tuning()),
            plan: None,
            series,
            sums,
            global,
            extrema: ExtremaAnimator::new(config.extrema_animation_ms, config.timing_function),
            x_ticks: XTickSequence::default(),
            x_label_interval: 0.0,
            x_labels,
            y_labels,
            dirty: DirtyFlags::all(),
            axes_stale: true,
            data,
        }
    }

    #[must_use]
    pub fn role(&self) -> ChartRole {
        self.role
    }

    #[must_use]
    pub fn surface(&self) -> Viewport {
        self.geometry.surface
    }

    #[must_use]
    pub fn bottom_line(&self) -> f64 {
        self.geometry.bottom_line
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.controller.range()
    }

    #[must_use]
    pub fn range_indexes(&self) -> Option<IndexRange> {
        self.controller.range_indexes()
    }

    #[must_use]
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.controller.domain()
    }

    #[must_use]
    pub fn pixel_x(&self) -> f64 {
        self.controller.pixel_x()
    }

    #[must_use]
    pub fn left_padding_px(&self) -> f64 {
        self.controller.left_padding_px()
    }

    #[must_use]
    pub fn plan(&self) -> Option<IndexPlan> {
        self.plan
    }

    #[must_use]
    pub fn is_range_animating(&self) -> bool {
        self.controller.is_animating()
    }

    /// Extrema over the whole x domain of every series, hidden ones included.
    #[must_use]
    pub fn global_extrema(&self) -> Option<Extrema> {
        self.global
    }

    /// Chart-level extrema animator (target and lagged current values).
    #[must_use]
    pub fn extrema(&self) -> &ExtremaAnimator {
        &self.extrema
    }

    #[must_use]
    pub fn series_state(&self, id: SeriesId) -> Option<&SeriesState> {
        self.series.iter().find(|state| state.id() == id)
    }

    #[must_use]
    pub fn series_states(&self) -> &[SeriesState] {
        &self.series
    }

    #[must_use]
    pub fn x_labels(&self) -> Option<&AxisLabelEngine> {
        self.x_labels.as_ref()
    }

    #[must_use]
    pub fn y_labels(&self) -> &[AxisLabelEngine] {
        &self.y_labels
    }

    #[must_use]
    pub fn pending_dirty(&self) -> DirtyFlags {
        self.dirty
    }

    pub fn request_all(&mut self) {
        self.dirty.request_all();
    }

    pub fn request_cursor(&mut self) {
        self.dirty.request_cursor();
    }

    /// Returns the pending repaint flags and clears them.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        self.dirty.take()
    }

    /// Puts back flags of a frame that failed to render.
    pub fn restore_dirty(&mut self, flags: DirtyFlags) {
        for layer in [
            CanvasLayerKind::Series,
            CanvasLayerKind::Axis,
            CanvasLayerKind::Cursor,
        ] {
            if flags.is_set(layer) {
                self.dirty.request(layer);
            }
        }
    }

    /// Horizontal data-to-canvas mapping; needs no extrema.
    #[must_use]
    pub fn x_to_canvas(&self, x: f64) -> Option<f64> {
        let pixel_x = self.controller.pixel_x();
        if pixel_x <= 0.0 {
            return None;
        }
        let (min_x, _) = self.controller.range();
        Some(self.controller.left_padding_px() + (x - min_x) / pixel_x)
    }

    #[must_use]
    pub fn canvas_to_x(&self, canvas_x: f64) -> Option<f64> {
        let pixel_x = self.controller.pixel_x();
        if pixel_x <= 0.0 {
            return None;
        }
        let (min_x, _) = self.controller.range();
        Some(min_x + (canvas_x - self.controller.left_padding_px()) * pixel_x)
    }

    /// Data-to-canvas mapping from the animated chart extrema.
    #[must_use]
    pub fn scale(&self) -> Option<ChartScale> {
        self.scale_for(self.extrema.scale_extrema()?)
    }

    /// Mapping of one series; its own extrema when series scale independently.
    #[must_use]
    pub fn series_scale(&self, index: usize) -> Option<ChartScale> {
        if self.data.flags().y_scaled {
            let own = self.series.get(index)?.extrema().scale_extrema()?;
            return self.scale_for(own);
        }
        self.scale()
    }

    fn scale_for(&self, extrema: Extrema) -> Option<ChartScale> {
        let plot_height = self.geometry.plot_height();
        if plot_height <= 0.0 {
            return None;
        }
        let (min_x, _) = self.controller.range();
        ChartScale::new(
            min_x,
            self.controller.pixel_x(),
            self.controller.left_padding_px(),
            extrema.min,
            extrema.span() / plot_height,
            self.geometry.bottom_line,
        )
    }

    /// Sets the visible range immediately.
    pub fn set_range(&mut self, min_x: f64, max_x: f64, options: RangeOptions) -> RangeChange {
        let change = self
            .controller
            .set_range(self.data.x_axis(), min_x, max_x, options);
        self.apply_range_change(change);
        change
    }

    pub fn animate_range_to(&mut self, min_x: f64, max_x: f64, duration_ms: f64) {
        self.controller
            .animate_range_to(&self.handles, min_x, max_x, duration_ms, self.timing);
    }

    pub fn stop_range_animation(&mut self) {
        self.controller.stop_animation();
    }

    /// Applies a new surface size, keeping the current range.
    pub fn resize(&mut self, surface: Viewport, config: &ChartEngineConfig) {
        self.geometry = ViewGeometry::for_role(self.role, surface, config);
        let change = self
            .controller
            .resize(self.data.x_axis(), self.geometry.width());
        self.apply_range_change(change);
        self.replan();
        self.x_ticks.reset();
        self.axes_stale = true;
        self.dirty.request_all();
    }

    /// Starts an opacity transition; returns `false` for an unknown series or
    /// an unchanged visibility.
    pub fn set_series_visible(&mut self, id: SeriesId, visible: bool) -> bool {
        let Some(state) = self.series.iter_mut().find(|state| state.id() == id) else {
            return false;
        };
        if !state.set_visible(&self.handles, visible, self.opacity_ms, self.timing) {
            return false;
        }
        self.refresh_extrema();
        self.dirty.request_chart();
        true
    }

    /// Advances every animation of the view by `delta_ms`.
    pub fn tick(&mut self, delta_ms: f64) {
        let change = self.controller.tick(self.data.x_axis(), delta_ms);
        self.apply_range_change(change);

        let mut fading = false;
        let mut own_scale_moved = false;
        for state in &mut self.series {
            let (opacity_moved, scale_moved) = state.tick(delta_ms);
            fading |= opacity_moved;
            own_scale_moved |= scale_moved;
        }
        if fading {
            self.refresh_sums();
            self.refresh_extrema();
            self.dirty.request_chart();
        }

        if self.extrema.tick(delta_ms) || own_scale_moved {
            self.dirty.request_chart();
            self.dirty.request_axis();
        }

        if self.axes_stale {
            self.recompute_axes();
            self.axes_stale = false;
        }
        let mut labels_moved = false;
        if let Some(engine) = self.x_labels.as_mut() {
            labels_moved |= engine.tick(delta_ms);
        }
        for engine in &mut self.y_labels {
            labels_moved |= engine.tick(delta_ms);
        }
        if labels_moved {
            self.dirty.request_axis();
        }
    }

    fn apply_range_change(&mut self, change: RangeChange) {
        if !change.range_changed && !change.indexes_changed {
            return;
        }
        self.replan();
        if change.extremes_stale {
            self.refresh_extrema();
        }
        self.axes_stale = true;
        self.dirty.request_chart();
        self.dirty.request_axis();
    }

    fn replan(&mut self) {
        self.plan = self.controller.range_indexes().and_then(|range| {
            self.grouper.plan(
                self.data.x_axis(),
                range,
                self.controller.pixel_x(),
                self.role,
            )
        });
    }

    fn refresh_sums(&mut self) {
        let Some(sums) = self.sums.as_mut() else {
            return;
        };
        sums.refresh(
            self.data
                .series()
                .iter()
                .zip(&self.series)
                .filter(|(column, _)| column.kind != SeriesKind::Line)
                .map(|(column, state)| (&column.values[..], state.opacity())),
        );
    }

    /// Recomputes every series' local extrema and retargets the chart scale.
    fn refresh_extrema(&mut self) {
        let Some(range) = self.controller.range_indexes() else {
            return;
        };

        #[cfg(feature = "parallel-projection")]
        let locals: Vec<Option<Extrema>> = {
            use rayon::prelude::*;
            self.data
                .series()
                .par_iter()
                .map(|column| column.local_extrema(range))
                .collect()
        };
        #[cfg(not(feature = "parallel-projection"))]
        let locals: Vec<Option<Extrema>> = self
            .data
            .series()
            .iter()
            .map(|column| column.local_extrema(range))
            .collect();

        for (state, local) in self.series.iter_mut().zip(locals) {
            state.set_local(local);
        }

        let mut moved = false;
        let target = self
            .chart_target_extrema(range)
            .or_else(|| self.global.filter(|_| self.extrema.target().is_none()));
        if let Some(target) = target {
            moved |= self.extrema.set_target(&self.handles, target);
        }
        if self.data.flags().y_scaled {
            for state in &mut self.series {
                if state.visible() {
                    moved |= state.retarget_own_scale(&self.handles);
                }
            }
        }
        if moved {
            trace!(role = ?self.role, target = ?self.extrema.target(), "extrema retargeted");
            self.axes_stale = true;
            self.dirty.request_chart();
            self.dirty.request_axis();
        }
    }

    /// Chart-level target extrema; `None` keeps the previous scale, which
    /// happens when every series is hidden.
    fn chart_target_extrema(&self, range: IndexRange) -> Option<Extrema> {
        if shows_percentages(&self.data) {
            return Some(Extrema::new(0.0, 100.0));
        }

        let mut target = self
            .sums
            .as_ref()
            .filter(|_| self.series.iter().any(SeriesState::visible))
            .and_then(|sums| sums.max_in(range))
            .map(|max| Extrema::new(0.0, max.max(0.0)));
        for (column, state) in self.data.series().iter().zip(&self.series) {
            if column.kind != SeriesKind::Line || !state.visible() {
                continue;
            }
            if let Some(local) = state.local_extrema() {
                target = Some(match target {
                    Some(acc) => acc.union(local),
                    None => local,
                });
            }
        }
        target
    }

    fn recompute_axes(&mut self) {
        if self.role != ChartRole::Main {
            return;
        }
        self.recompute_x_axis();
        self.recompute_y_axes();
    }

    fn recompute_x_axis(&mut self) {
        let Some(engine) = self.x_labels.as_mut() else {
            return;
        };
        let x_axis = self.data.x_axis();
        let pixel_x = self.controller.pixel_x();
        let (min_x, max_x) = self.controller.range();
        let left = min_x - self.controller.left_padding_px() * pixel_x;
        let right = max_x + self.controller.right_padding_px() * pixel_x;
        let base_interval = match x_axis {
            [first, second, ..] => second - first,
            _ => max_x - min_x,
        };
        let initial_anchor = self
            .controller
            .range_indexes()
            .map_or(max_x, |range| x_axis[range.upper]);

        let values = self.x_ticks.compute(
            left,
            right,
            pixel_x,
            self.geometry.label_min_width_px,
            base_interval,
            initial_anchor,
        );
        let interval = self.x_ticks.interval().unwrap_or(0.0);
        engine.update_values(&values, interval, |value| format_x_label(value, interval));
        if (interval >= DAY_MS) != (self.x_label_interval >= DAY_MS) {
            engine.relabel(|value| format_x_label(value, interval));
        }
        self.x_label_interval = interval;
    }

    fn recompute_y_axes(&mut self) {
        let y_scaled = self.data.flags().y_scaled;
        for (index, engine) in self.y_labels.iter_mut().enumerate() {
            let target = if y_scaled {
                self.series
                    .get(index)
                    .and_then(|state| state.extrema().target())
            } else {
                self.extrema.target()
            };
            let (values, step) = target
                .map(|target| nice_y_ticks(target, self.y_tick_count))
                .unwrap_or_default();
            engine.update_values(&values, step, |value| format_y_label(value, step));
        }
    }

    /// Series layer: every series painted over the current plan.
    #[must_use]
    pub fn series_surface(&self) -> SurfaceFrame {
        let mut surface = SurfaceFrame::new(
            SurfaceId::new(self.role, CanvasLayerKind::Series),
            self.geometry.surface,
        );
        let Some(plan) = self.plan else {
            return surface;
        };

        let mut accumulated = None;
        for (index, (column, state)) in self.data.series().iter().zip(&self.series).enumerate() {
            let Some(scale) = self.series_scale(index) else {
                continue;
            };
            let pass = PaintPass {
                x_axis: self.data.x_axis(),
                plan,
                scale,
                line_width: self.geometry.line_width,
                sums: self.sums.as_ref(),
            };
            let (path, next) = draw_by_interval(&pass, column, state.opacity(), accumulated);
            accumulated = next;
            if let Some(path) = path {
                surface.paths.push(path);
            }
        }
        surface
    }

    /// Axis layer: background, grid lines and fading tick labels.
    pub fn axis_surface(&mut self, theme: &ThemeTable) -> SurfaceFrame {
        let mut surface = SurfaceFrame::new(
            SurfaceId::new(self.role, CanvasLayerKind::Axis),
            self.geometry.surface,
        )
        .with_clear_color(theme.color(ColorRole::Background));
        if self.role != ChartRole::Main {
            return surface;
        }

        let width = self.geometry.width();
        let grid = theme.color(ColorRole::GridLine);
        let text = theme.color(ColorRole::AxisText);
        let y_scaled = self.data.flags().y_scaled;

        for (axis_index, engine) in self.y_labels.iter().enumerate() {
            let Some(scale) = (if y_scaled {
                self.series_scale(axis_index)
            } else {
                self.scale()
            }) else {
                continue;
            };
            let (label_color, align, label_x) = match (y_scaled, axis_index) {
                (true, 0) => (
                    self.data.series()[0].color,
                    TextHAlign::Left,
                    LABEL_INSET_PX,
                ),
                (true, _) => (
                    self.data.series()[axis_index].color,
                    TextHAlign::Right,
                    width - LABEL_INSET_PX,
                ),
                (false, _) => (text, TextHAlign::Left, LABEL_INSET_PX),
            };
            for element in engine.elements() {
                let y = scale.y_to_canvas(element.value());
                if !(0.0..=self.geometry.bottom_line).contains(&y) || element.opacity() <= 0.0 {
                    continue;
                }
                if axis_index == 0 {
                    surface.lines.push(LinePrimitive::new(
                        0.0,
                        y,
                        width,
                        y,
                        1.0,
                        grid.faded(element.opacity()),
                    ));
                }
                surface.texts.push(TextPrimitive::new(
                    element.label(),
                    label_x,
                    y - self.geometry.font_px - LABEL_INSET_PX,
                    self.geometry.font_px,
                    label_color.faded(element.opacity()),
                    align,
                ));
            }
        }

        if let Some(engine) = self.x_labels.as_ref() {
            for element in engine.elements() {
                let Some(x) = self.x_to_canvas(element.value()) else {
                    continue;
                };
                if !(0.0..=width).contains(&x) || element.opacity() <= 0.0 {
                    continue;
                }
                surface.texts.push(TextPrimitive::new(
                    element.label(),
                    x,
                    self.geometry.bottom_line + LABEL_INSET_PX,
                    self.geometry.font_px,
                    text.faded(element.opacity()),
                    TextHAlign::Center,
                ));
            }
        }

        if let Some(engine) = self.x_labels.as_mut() {
            engine.mark_drawn();
        }
        for engine in &mut self.y_labels {
            engine.mark_drawn();
        }
        surface
    }
}

fn shows_percentages(data: &ChartData) -> bool {
    data.flags().percentage
        || data
            .series()
            .iter()
            .any(|column| column.kind == SeriesKind::PercentageArea)
}

/// Union of every line's extrema and the full-opacity stack totals.
fn all_series_extrema(data: &ChartData, sums: Option<&StackSums>) -> Option<Extrema> {
    if shows_percentages(data) {
        return Some(Extrema::new(0.0, 100.0));
    }
    let stacked = sums
        .zip(data.len().checked_sub(1))
        .and_then(|(sums, last)| sums.max_in(IndexRange::new(0, last)))
        .map(|max| Extrema::new(0.0, max.max(0.0)));
    data.series()
        .iter()
        .filter(|column| column.kind == SeriesKind::Line)
        .filter_map(SeriesColumn::global_extrema)
        .fold(stacked, |acc, global| Some(acc.map_or(global, |acc| acc.union(global))))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::ChartView;
    use crate::api::{ChartEngineConfig, RangeOptions};
    use crate::core::{
        ChartData, ChartFlags, ChartRole, Extrema, HandleAllocator, SeriesInput, SeriesKind,
        Viewport,
    };

    fn config() -> ChartEngineConfig {
        ChartEngineConfig::new(Viewport::new(500, 300), Viewport::new(500, 60))
    }

    fn line_data(handles: &HandleAllocator) -> Arc<ChartData> {
        let x: Vec<f64> = (0..1000).map(f64::from).collect();
        let a: Vec<f64> = (0..1000).map(|i| f64::from(i % 50)).collect();
        let b: Vec<f64> = (0..1000).map(|i| 100.0 + f64::from(i % 7)).collect();
        Arc::new(
            ChartData::from_columns(
                x,
                vec![
                    SeriesInput::new("a", SeriesKind::Line, a),
                    SeriesInput::new("b", SeriesKind::Line, b),
                ],
                ChartFlags::default(),
                handles,
            )
            .expect("data"),
        )
    }

    #[test]
    fn full_range_on_500px_groups_points() {
        let handles = HandleAllocator::new();
        let mut view = ChartView::new(ChartRole::Main, line_data(&handles), handles, &config());
        view.set_range(0.0, 999.0, RangeOptions::default());
        let plan = view.plan().expect("plan");
        assert!(plan.step >= 2);
        assert_eq!((plan.end - plan.start) % plan.step, 0);
    }

    #[test]
    fn navigator_never_groups() {
        let handles = HandleAllocator::new();
        let mut view =
            ChartView::new(ChartRole::Navigator, line_data(&handles), handles, &config());
        view.set_range(0.0, 999.0, RangeOptions::default());
        assert_eq!(view.plan().expect("plan").step, 1);
    }

    #[test]
    fn hiding_a_series_rescales_to_the_rest() {
        let handles = HandleAllocator::new();
        let data = line_data(&handles);
        let b = data.series()[1].id;
        let mut view = ChartView::new(ChartRole::Main, data, handles, &config());
        view.set_range(0.0, 999.0, RangeOptions::default());
        assert_eq!(view.extrema().target(), Some(Extrema::new(0.0, 106.0)));

        view.set_series_visible(b, false);
        assert_eq!(view.extrema().target(), Some(Extrema::new(0.0, 49.0)));
        for _ in 0..30 {
            view.tick(16.0);
        }
        assert_eq!(view.extrema().current(), Some(Extrema::new(0.0, 49.0)));
    }

    #[test]
    fn global_extrema_ignore_visibility_and_range() {
        let handles = HandleAllocator::new();
        let data = line_data(&handles);
        let b = data.series()[1].id;
        let mut view = ChartView::new(ChartRole::Main, data, handles, &config());
        assert_eq!(view.global_extrema(), Some(Extrema::new(0.0, 106.0)));

        view.set_range(0.0, 20.0, RangeOptions::default());
        view.set_series_visible(b, false);
        let local = view.extrema().target().expect("target");
        assert!(local.max <= 49.0);
        assert_eq!(view.global_extrema(), Some(Extrema::new(0.0, 106.0)));
    }

    #[test]
    fn zero_span_range_yields_no_plan_or_ticks() {
        let handles = HandleAllocator::new();
        let mut view = ChartView::new(ChartRole::Main, line_data(&handles), handles, &config());
        view.set_range(10.0, 10.0, RangeOptions::default());
        view.tick(0.0);
        assert!(view.plan().is_none());
        assert!(view.x_labels().expect("x labels").shown_values().is_empty());
        assert!(view.series_surface().paths.is_empty());
    }
}
