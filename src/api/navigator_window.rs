use tracing::debug;

use crate::animation::{RequestPolicy, TimingFunction, TweenSlot};
use crate::api::viewport_controller::{RangeKey, RangeWindow};
use crate::core::HandleAllocator;

/// Selection window of the navigator strip, in data units.
///
/// Dragging sets it directly; clicking glides it with a tween. The window is
/// kept inside the domain and never narrower than `min_span`.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorWindow {
    domain: Option<(f64, f64)>,
    min_span: f64,
    window: RangeWindow,
    tween: TweenSlot<RangeKey>,
}

impl NavigatorWindow {
    #[must_use]
    pub fn new(domain: Option<(f64, f64)>, min_span: f64) -> Self {
        let (from, to) = domain.unwrap_or((0.0, 0.0));
        Self {
            domain,
            min_span: min_span.max(0.0),
            window: RangeWindow { from, to },
            tween: TweenSlot::default(),
        }
    }

    /// Current `[min, max]` of the window.
    #[must_use]
    pub fn window(&self) -> (f64, f64) {
        (self.window.from, self.window.to)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_active()
    }

    /// Places the window at once, cancelling any glide. Returns the clamped
    /// window actually applied.
    pub fn set(&mut self, min_x: f64, max_x: f64) -> (f64, f64) {
        self.tween.cancel();
        let (from, to) = self.normalize(min_x, max_x);
        self.window = RangeWindow { from, to };
        (from, to)
    }

    /// Glides the window towards `[min_x, max_x]`; a running glide is patched
    /// so it continues from where it is. Returns the clamped target.
    pub fn animate_to(
        &mut self,
        handles: &HandleAllocator,
        min_x: f64,
        max_x: f64,
        duration_ms: f64,
        timing: TimingFunction,
    ) -> (f64, f64) {
        let (from, to) = self.normalize(min_x, max_x);
        let decision = self.tween.request(
            handles,
            &self.window,
            &[(RangeKey::From, from), (RangeKey::To, to)],
            duration_ms,
            timing,
            RequestPolicy::Patch,
        );
        debug!(from, to, ?decision, "navigator window animation requested");
        (from, to)
    }

    /// Advances the glide; returns `true` when the window moved.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        self.tween.tick(delta_ms, &mut self.window).is_some()
    }

    /// Swaps inverted bounds, widens to `min_span` around the center and
    /// shifts the window back into the domain keeping its span.
    fn normalize(&self, min_x: f64, max_x: f64) -> (f64, f64) {
        let Some((domain_min, domain_max)) = self.domain else {
            return (0.0, 0.0);
        };
        if !min_x.is_finite() || !max_x.is_finite() {
            return self.window();
        }
        let (mut from, mut to) = if min_x <= max_x {
            (min_x, max_x)
        } else {
            (max_x, min_x)
        };

        let domain_span = domain_max - domain_min;
        let span = (to - from).max(self.min_span).min(domain_span);
        let center = (from + to) / 2.0;
        from = center - span / 2.0;
        to = center + span / 2.0;

        if from < domain_min {
            from = domain_min;
            to = domain_min + span;
        }
        if to > domain_max {
            to = domain_max;
            from = domain_max - span;
        }
        (from, to)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::NavigatorWindow;
    use crate::animation::TimingFunction;
    use crate::core::HandleAllocator;

    #[test]
    fn dragging_past_an_edge_keeps_span() {
        let mut window = NavigatorWindow::new(Some((0.0, 100.0)), 2.0);
        assert_eq!(window.set(90.0, 120.0), (70.0, 100.0));
        assert_eq!(window.set(-5.0, 5.0), (0.0, 10.0));
        assert_eq!(window.set(30.0, 20.0), (20.0, 30.0));
    }

    #[test]
    fn narrow_windows_widen_to_min_span() {
        let mut window = NavigatorWindow::new(Some((0.0, 100.0)), 2.0);
        let (from, to) = window.set(50.0, 50.0);
        assert_relative_eq!(from, 49.0);
        assert_relative_eq!(to, 51.0);
    }

    #[test]
    fn glide_follows_the_timing_function() {
        let handles = HandleAllocator::new();
        let mut window = NavigatorWindow::new(Some((0.0, 1.0)), 0.0);
        window.set(0.2, 0.3);
        window.animate_to(&handles, 0.6, 0.9, 300.0, TimingFunction::EaseInOutQuad);

        window.tick(75.0);
        let (from, to) = window.window();
        assert_relative_eq!(from, 0.2 + 0.4 * 0.125, epsilon = 1e-9);
        assert_relative_eq!(to, 0.3 + 0.6 * 0.125, epsilon = 1e-9);

        window.tick(75.0);
        let (from, to) = window.window();
        assert_relative_eq!(from, 0.4, epsilon = 1e-9);
        assert_relative_eq!(to, 0.6, epsilon = 1e-9);

        window.tick(150.0);
        assert_eq!(window.window(), (0.6, 0.9));
        assert!(!window.is_animating());
    }
}
