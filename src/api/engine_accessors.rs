use crate::core::{ChartData, Extrema, IndexPlan, IndexRange, SeriesId, Viewport};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::{ChartEngine, ChartEngineConfig, ChartView, CursorEvent, ThemeChange, ThemeTable};

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.config
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeTable {
        &self.theme
    }

    /// Queues a theme; every surface repaints on the next tick.
    pub fn set_theme(&mut self, theme: ThemeTable) {
        self.channels.theme.send(ThemeChange { theme });
    }

    /// Applies new surface sizes to both views and hides the cursor.
    pub fn resize(
        &mut self,
        main_viewport: Viewport,
        navigator_viewport: Viewport,
    ) -> ChartResult<()> {
        let mut config = self.config;
        config.main_viewport = main_viewport;
        config.navigator_viewport = navigator_viewport;
        config.validate()?;

        self.config = config;
        self.main.resize(main_viewport, &config);
        self.navigator.resize(navigator_viewport, &config);
        if self.cursor.on_pointer_leave(true).hidden {
            self.channels.cursor_events.send(CursorEvent::Hidden);
        }
        Ok(())
    }

    #[must_use]
    pub fn main_view(&self) -> &ChartView {
        &self.main
    }

    #[must_use]
    pub fn navigator_view(&self) -> &ChartView {
        &self.navigator
    }

    #[must_use]
    pub fn main_range(&self) -> (f64, f64) {
        self.main.range()
    }

    #[must_use]
    pub fn main_range_indexes(&self) -> Option<IndexRange> {
        self.main.range_indexes()
    }

    #[must_use]
    pub fn main_pixel_x(&self) -> f64 {
        self.main.pixel_x()
    }

    #[must_use]
    pub fn main_plan(&self) -> Option<IndexPlan> {
        self.main.plan()
    }

    /// Animated (current) y extrema of the main chart.
    #[must_use]
    pub fn main_extrema(&self) -> Option<Extrema> {
        self.main.extrema().current()
    }

    #[must_use]
    pub fn main_target_extrema(&self) -> Option<Extrema> {
        self.main.extrema().target()
    }

    /// Y extrema of every series over the whole x domain.
    #[must_use]
    pub fn global_extrema(&self) -> Option<Extrema> {
        self.main.global_extrema()
    }

    #[must_use]
    pub fn is_main_range_animating(&self) -> bool {
        self.main.is_range_animating()
    }

    #[must_use]
    pub fn navigator_window(&self) -> (f64, f64) {
        self.window.window()
    }

    #[must_use]
    pub fn series_visible(&self, series: SeriesId) -> Option<bool> {
        self.main.series_state(series).map(|state| state.visible())
    }

    #[must_use]
    pub fn series_opacity(&self, series: SeriesId) -> Option<f64> {
        self.main.series_state(series).map(|state| state.opacity())
    }

    #[must_use]
    pub fn navigator_series_opacity(&self, series: SeriesId) -> Option<f64> {
        self.navigator
            .series_state(series)
            .map(|state| state.opacity())
    }

    /// X tick values currently shown or fading in.
    #[must_use]
    pub fn x_axis_values(&self) -> Vec<f64> {
        self.main
            .x_labels()
            .map(|labels| labels.shown_values())
            .unwrap_or_default()
    }

    /// Y tick values of the first (left) axis.
    #[must_use]
    pub fn y_axis_values(&self) -> Vec<f64> {
        self.main
            .y_labels()
            .first()
            .map(|labels| labels.shown_values())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn cursor_index(&self) -> Option<usize> {
        self.cursor.index()
    }

    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.cursor.is_visible()
    }

    #[must_use]
    pub fn cursor_canvas_x(&self) -> f64 {
        self.cursor.canvas_x()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
