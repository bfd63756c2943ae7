use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::engine_init::min_span;
use super::{ChartEngine, RangeOptions, RangeSync};

impl<R: Renderer> ChartEngine<R> {
    /// Drags the navigator window; the main chart follows on the next tick.
    pub fn navigator_set_window(&mut self, min_x: f64, max_x: f64) -> ChartResult<()> {
        validate_bounds(min_x, max_x)?;
        let (min, max) = self.window.set(min_x, max_x);
        self.navigator.request_cursor();
        self.channels.to_main.send(RangeSync::Changed { min, max });
        Ok(())
    }

    /// Glides the navigator window and the main chart towards a new range.
    pub fn navigator_animate_window(&mut self, min_x: f64, max_x: f64) -> ChartResult<()> {
        validate_bounds(min_x, max_x)?;
        let (min, max) = self.window.animate_to(
            &self.handles,
            min_x,
            max_x,
            self.config.range_animation_ms,
            self.config.timing_function,
        );
        self.channels.to_main.send(RangeSync::Animate { min, max });
        Ok(())
    }

    /// Shifts the main range by `delta_px * pixel_x` data units; positive
    /// deltas move towards later data. The span is kept at domain edges.
    pub fn pan_main_by_pixels(&mut self, delta_px: f64) -> ChartResult<()> {
        if !delta_px.is_finite() {
            return Err(ChartError::invalid("pan delta must be finite"));
        }
        let Some(domain) = self.main.domain() else {
            return Ok(());
        };
        let pixel_x = self.main.pixel_x();
        if pixel_x <= 0.0 || delta_px == 0.0 {
            return Ok(());
        }

        let (min_x, max_x) = self.main.range();
        let span = max_x - min_x;
        let from = shift_into_domain(min_x + delta_px * pixel_x, span, domain);
        self.apply_main_range(from, from + span);
        Ok(())
    }

    /// Zooms the main range around the canvas x `anchor_px`; factors above
    /// `1` zoom in. The span never drops below two data intervals.
    pub fn zoom_main_at(&mut self, anchor_px: f64, factor: f64) -> ChartResult<()> {
        if !anchor_px.is_finite() {
            return Err(ChartError::invalid("zoom anchor must be finite"));
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::invalid("zoom factor must be finite and > 0"));
        }
        let Some((domain_min, domain_max)) = self.main.domain() else {
            return Ok(());
        };

        let (min_x, max_x) = self.main.range();
        let span = max_x - min_x;
        let anchor = self
            .main
            .canvas_to_x(anchor_px)
            .map_or((min_x + max_x) / 2.0, |anchor| anchor.clamp(min_x, max_x));
        let domain_span = domain_max - domain_min;
        let target_span =
            (span / factor).clamp(min_span(self.data.x_axis()).min(domain_span), domain_span);
        let anchor_ratio = if span > 0.0 {
            (anchor - min_x) / span
        } else {
            0.5
        };

        let from = shift_into_domain(
            anchor - anchor_ratio * target_span,
            target_span,
            (domain_min, domain_max),
        );
        self.apply_main_range(from, from + target_span);
        Ok(())
    }

    fn apply_main_range(&mut self, min_x: f64, max_x: f64) {
        self.main.stop_range_animation();
        self.main.set_range(min_x, max_x, RangeOptions::default());
        let (min, max) = self.main.range();
        self.channels.to_navigator.send(RangeSync::Changed { min, max });
        debug!(min, max, "main range moved by user");
    }
}

fn validate_bounds(min_x: f64, max_x: f64) -> ChartResult<()> {
    if !min_x.is_finite() || !max_x.is_finite() {
        return Err(ChartError::invalid("window bounds must be finite"));
    }
    Ok(())
}

fn shift_into_domain(from: f64, span: f64, (domain_min, domain_max): (f64, f64)) -> f64 {
    from.clamp(domain_min, (domain_max - span).max(domain_min))
}
