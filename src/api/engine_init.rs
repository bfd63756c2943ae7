use std::sync::Arc;

use tracing::debug;

use crate::core::{ChartData, ChartRole, HandleAllocator};
use crate::error::ChartResult;
use crate::interaction::CursorTracker;
use crate::render::Renderer;

use super::{
    ChartEngine, ChartEngineConfig, ChartView, NavigatorWindow, RangeOptions, ThemeTable,
    engine::EngineChannels,
};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine over `data`.
    ///
    /// The navigator spans the whole domain and the main chart starts on the
    /// last `initial_range_ratio` of it. Animation and axis-element ids come
    /// from an allocator owned by this engine.
    pub fn new(renderer: R, data: ChartData, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;

        let data = Arc::new(data);
        let handles = HandleAllocator::new();
        let main = ChartView::new(ChartRole::Main, Arc::clone(&data), handles.clone(), &config);
        let navigator = ChartView::new(
            ChartRole::Navigator,
            Arc::clone(&data),
            handles.clone(),
            &config,
        );
        let window = NavigatorWindow::new(data.x_bounds(), min_span(data.x_axis()));
        let cursor = CursorTracker::new(
            handles.next_animation(),
            config.cursor_exit_delay_ms,
            config.cursor_playback,
        );

        let mut engine = Self {
            renderer,
            config,
            data,
            handles,
            theme: ThemeTable::new(),
            main,
            navigator,
            window,
            cursor,
            channels: EngineChannels::default(),
        };

        if let Some((domain_min, domain_max)) = engine.data.x_bounds() {
            engine
                .navigator
                .set_range(domain_min, domain_max, RangeOptions::default());
            let from = domain_max - (domain_max - domain_min) * engine.config.initial_range_ratio;
            let (from, to) = engine.window.set(from, domain_max);
            engine.main.set_range(from, to, RangeOptions::default());
        }
        engine.tick(0.0);

        debug!(
            points = engine.data.len(),
            series = engine.data.series().len(),
            range = ?engine.main.range(),
            "chart engine initialized"
        );
        Ok(engine)
    }
}

/// Narrowest main range: two average data intervals.
pub(super) fn min_span(x_axis: &[f64]) -> f64 {
    match (x_axis.first(), x_axis.last()) {
        (Some(first), Some(last)) if x_axis.len() > 1 => {
            2.0 * (last - first) / (x_axis.len() - 1) as f64
        }
        _ => 0.0,
    }
}
