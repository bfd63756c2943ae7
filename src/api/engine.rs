use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{
    Channel, ChartEngineConfig, ChartView, CursorEvent, NavigatorWindow, RangeOptions, RangeSync,
    ThemeChange, ThemeTable, VisibilitySync,
};
use crate::core::{ChartData, HandleAllocator, SeriesId};
use crate::error::{ChartError, ChartResult};
use crate::interaction::CursorTracker;
use crate::render::Renderer;

use super::render_coordinator::RenderCoordinator;

/// Message queues between the engine's components, drained at the start of
/// every tick in send order.
#[derive(Debug, Default)]
pub(super) struct EngineChannels {
    pub(super) to_main: Channel<RangeSync>,
    pub(super) to_navigator: Channel<RangeSync>,
    pub(super) visibility: Channel<VisibilitySync>,
    pub(super) theme: Channel<ThemeChange>,
    pub(super) cursor_events: Channel<CursorEvent>,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the main chart and navigator views over one shared
/// dataset, relays range and visibility changes between them, and hands
/// the dirty surfaces of each frame to the renderer.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartEngineConfig,
    pub(super) data: Arc<ChartData>,
    pub(super) handles: HandleAllocator,
    pub(super) theme: ThemeTable,
    pub(super) main: ChartView,
    pub(super) navigator: ChartView,
    pub(super) window: NavigatorWindow,
    pub(super) cursor: CursorTracker,
    pub(super) channels: EngineChannels,
}

impl<R: Renderer> ChartEngine<R> {
    /// Advances every animation by `delta_ms` after delivering queued
    /// messages. Nothing is drawn; call [`Self::render`] afterwards.
    pub fn tick(&mut self, delta_ms: f64) {
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        self.deliver_messages();

        if self.window.tick(delta_ms) {
            self.navigator.request_cursor();
        }
        self.main.tick(delta_ms);
        self.navigator.tick(delta_ms);
        self.tick_cursor(delta_ms);
    }

    /// Builds the dirty surfaces and passes them to the renderer. Skips the
    /// renderer entirely when nothing changed since the last frame.
    pub fn render(&mut self) -> ChartResult<()> {
        RenderCoordinator::render(self)
    }

    /// Flips a series' visibility on the main chart; the navigator mirrors it
    /// on the next tick. Returns the new visibility.
    pub fn toggle_series_visibility(&mut self, series: SeriesId) -> ChartResult<bool> {
        let visible = self
            .main
            .series_state(series)
            .map(|state| !state.visible())
            .ok_or_else(|| unknown_series(series))?;
        self.set_series_visibility(series, visible)?;
        Ok(visible)
    }

    pub fn set_series_visibility(&mut self, series: SeriesId, visible: bool) -> ChartResult<()> {
        if self.main.series_state(series).is_none() {
            return Err(unknown_series(series));
        }
        if self.main.set_series_visible(series, visible) {
            self.channels
                .visibility
                .send(VisibilitySync { series, visible });
        }
        Ok(())
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn deliver_messages(&mut self) {
        for ThemeChange { theme } in self.channels.theme.drain() {
            self.theme = theme;
            self.main.request_all();
            self.navigator.request_all();
            debug!("theme applied");
        }

        for message in self.channels.to_main.drain() {
            match message {
                RangeSync::Changed { min, max } => {
                    self.main.stop_range_animation();
                    self.main.set_range(min, max, RangeOptions::default());
                }
                RangeSync::Animate { min, max } => {
                    self.main
                        .animate_range_to(min, max, self.config.range_animation_ms);
                }
            }
        }

        for VisibilitySync { series, visible } in self.channels.visibility.drain() {
            if self.navigator.series_state(series).is_none() {
                warn!(series = series.raw(), "visibility sync for unknown series ignored");
                continue;
            }
            self.navigator.set_series_visible(series, visible);
        }

        for message in self.channels.to_navigator.drain() {
            match message {
                RangeSync::Changed { min, max } => {
                    self.window.set(min, max);
                }
                RangeSync::Animate { min, max } => {
                    self.window.animate_to(
                        &self.handles,
                        min,
                        max,
                        self.config.range_animation_ms,
                        self.config.timing_function,
                    );
                }
            }
            self.navigator.request_cursor();
        }
    }
}

fn unknown_series(series: SeriesId) -> ChartError {
    ChartError::UnknownSeries {
        handle: series.raw(),
    }
}
