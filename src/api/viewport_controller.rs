use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::animation::{Animatable, RequestPolicy, SlotDecision, TimingFunction, TweenSlot};
use crate::core::{ChartRole, HandleAllocator, IndexRange, range_indexes};

/// Options of [`ViewportController::set_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeOptions {
    /// Leave extrema untouched even when the index bounds change.
    pub skip_extremes: bool,
    /// Keep the edge padding of the previous call instead of re-deriving it.
    pub preserve_padding: bool,
}

impl RangeOptions {
    #[must_use]
    pub const fn animation_step() -> Self {
        Self {
            skip_extremes: false,
            preserve_padding: true,
        }
    }
}

/// What a range update changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeChange {
    pub range_changed: bool,
    pub indexes_changed: bool,
    /// Extrema must be recomputed by the owner.
    pub extremes_stale: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeKey {
    From,
    To,
}

/// Transient `{from, to}` pair a range tween interpolates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RangeWindow {
    pub from: f64,
    pub to: f64,
}

impl Animatable<RangeKey> for RangeWindow {
    fn get(&self, key: RangeKey) -> f64 {
        match key {
            RangeKey::From => self.from,
            RangeKey::To => self.to,
        }
    }

    fn set(&mut self, key: RangeKey, value: f64) {
        match key {
            RangeKey::From => self.from = value,
            RangeKey::To => self.to = value,
        }
    }
}

/// Visible data range of one view plus its derived index bounds and scales.
///
/// `range()` is always clamped into the data domain. Edge padding is kept in
/// pixels: it grows as the range approaches a domain edge, so a point on the
/// edge never sits on the canvas border, and it shrinks progressively as the
/// range moves away instead of jumping.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    role: ChartRole,
    width_px: f64,
    padding_px: f64,
    domain: Option<(f64, f64)>,
    range: (f64, f64),
    indexes: Option<IndexRange>,
    left_padding_px: f64,
    right_padding_px: f64,
    pixel_x: f64,
    window: RangeWindow,
    range_tween: TweenSlot<RangeKey>,
}

impl ViewportController {
    #[must_use]
    pub fn new(role: ChartRole, width_px: f64, padding_px: f64, x_axis: &[f64]) -> Self {
        let domain = match (x_axis.first(), x_axis.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        };
        let range = domain.unwrap_or((0.0, 0.0));
        Self {
            role,
            width_px: width_px.max(0.0),
            padding_px: padding_px.max(0.0),
            domain,
            range,
            indexes: None,
            left_padding_px: 0.0,
            right_padding_px: 0.0,
            pixel_x: 0.0,
            window: RangeWindow {
                from: range.0,
                to: range.1,
            },
            range_tween: TweenSlot::default(),
        }
    }

    #[must_use]
    pub fn role(&self) -> ChartRole {
        self.role
    }

    /// Clamped, unpadded `[min_x, max_x]`.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Tightest index bracket of the range; `None` for an empty axis.
    #[must_use]
    pub fn range_indexes(&self) -> Option<IndexRange> {
        self.indexes
    }

    #[must_use]
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    /// Data units per horizontal pixel; `0` for a zero-span range.
    #[must_use]
    pub fn pixel_x(&self) -> f64 {
        self.pixel_x
    }

    #[must_use]
    pub fn left_padding_px(&self) -> f64 {
        self.left_padding_px
    }

    #[must_use]
    pub fn right_padding_px(&self) -> f64 {
        self.right_padding_px
    }

    #[must_use]
    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.range_tween.is_active()
    }

    /// End of the running range animation, if any.
    #[must_use]
    pub fn animation_target(&self) -> Option<(f64, f64)> {
        let tween = self.range_tween.tween()?;
        Some((
            tween.end_value(RangeKey::From)?,
            tween.end_value(RangeKey::To)?,
        ))
    }

    /// Resizes the drawable width and re-derives scales for the current range.
    pub fn resize(&mut self, x_axis: &[f64], width_px: f64) -> RangeChange {
        self.width_px = width_px.max(0.0);
        let (min_x, max_x) = self.range;
        self.set_range(x_axis, min_x, max_x, RangeOptions::default())
    }

    /// Clamps, pads and publishes a new range.
    ///
    /// Inverted bounds are swapped and non-finite requests are ignored.
    pub fn set_range(
        &mut self,
        x_axis: &[f64],
        min_x: f64,
        max_x: f64,
        options: RangeOptions,
    ) -> RangeChange {
        let Some((domain_min, domain_max)) = self.domain else {
            return RangeChange::default();
        };
        if !min_x.is_finite() || !max_x.is_finite() {
            return RangeChange::default();
        }

        let (min_x, max_x) = if min_x <= max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        let min_x = min_x.clamp(domain_min, domain_max);
        let max_x = max_x.clamp(domain_min, domain_max);
        let span = max_x - min_x;

        if !options.preserve_padding {
            let (left, right) = self.edge_padding(min_x, max_x);
            self.left_padding_px = left;
            self.right_padding_px = right;
        }
        let inner_width = self.width_px - self.left_padding_px - self.right_padding_px;
        self.pixel_x = if span <= 0.0 || self.width_px <= 0.0 {
            0.0
        } else if inner_width > 0.0 {
            span / inner_width
        } else {
            span / self.width_px
        };

        let range_changed = self.range != (min_x, max_x);
        self.range = (min_x, max_x);
        self.window = RangeWindow {
            from: min_x,
            to: max_x,
        };

        let indexes = range_indexes(x_axis, min_x, max_x);
        let indexes_changed = indexes != self.indexes;
        self.indexes = indexes;
        trace!(
            role = ?self.role,
            min_x,
            max_x,
            pixel_x = self.pixel_x,
            indexes_changed,
            "range updated"
        );
        RangeChange {
            range_changed,
            indexes_changed,
            extremes_stale: indexes_changed && !options.skip_extremes,
        }
    }

    /// Starts or retargets the range animation.
    ///
    /// A running animation is patched, so successive requests (for example a
    /// navigator click followed by another) glide from wherever the range is.
    pub fn animate_range_to(
        &mut self,
        handles: &HandleAllocator,
        min_x: f64,
        max_x: f64,
        duration_ms: f64,
        timing: TimingFunction,
    ) {
        if !min_x.is_finite() || !max_x.is_finite() {
            return;
        }
        let (min_x, max_x) = if min_x <= max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };
        self.window = RangeWindow {
            from: self.range.0,
            to: self.range.1,
        };
        let decision = self.range_tween.request(
            handles,
            &self.window,
            &[(RangeKey::From, min_x), (RangeKey::To, max_x)],
            duration_ms,
            timing,
            RequestPolicy::Patch,
        );
        debug!(
            role = ?self.role,
            min_x,
            max_x,
            patched = decision == SlotDecision::Patched,
            "range animation requested"
        );
    }

    /// Cancels a running range animation, leaving the range where it is.
    pub fn stop_animation(&mut self) {
        self.range_tween.cancel();
    }

    /// Advances the range animation and applies the interpolated range.
    pub fn tick(&mut self, x_axis: &[f64], delta_ms: f64) -> RangeChange {
        if self.range_tween.tick(delta_ms, &mut self.window).is_none() {
            return RangeChange::default();
        }
        let RangeWindow { from, to } = self.window;
        self.set_range(x_axis, from, to, RangeOptions::animation_step())
    }

    /// Left/right padding in pixels for a range; full padding on a domain edge,
    /// none once the range is one padding width away from it.
    fn edge_padding(&self, min_x: f64, max_x: f64) -> (f64, f64) {
        let Some((domain_min, domain_max)) = self.domain else {
            return (0.0, 0.0);
        };
        let span = max_x - min_x;
        if span <= 0.0 || self.width_px <= 0.0 || self.padding_px <= 0.0 {
            return (0.0, 0.0);
        }
        let padding_data = self.padding_px * span / self.width_px;
        let share = |distance: f64| 1.0 - (distance / padding_data).clamp(0.0, 1.0);
        (
            self.padding_px * share(min_x - domain_min),
            self.padding_px * share(domain_max - max_x),
        )
    }
}
