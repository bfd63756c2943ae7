use tracing::trace;

use crate::animation::{Animatable, RequestPolicy, TimingFunction, TweenSlot};
use crate::core::{Extrema, HandleAllocator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExtremaKey {
    Min,
    Max,
}

impl Animatable<ExtremaKey> for Extrema {
    fn get(&self, key: ExtremaKey) -> f64 {
        match key {
            ExtremaKey::Min => self.min,
            ExtremaKey::Max => self.max,
        }
    }

    fn set(&mut self, key: ExtremaKey, value: f64) {
        match key {
            ExtremaKey::Min => self.min = value,
            ExtremaKey::Max => self.max = value,
        }
    }
}

/// Whether the visible y span is growing or shrinking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremaDirection {
    Expanding,
    Contracting,
}

/// Target extrema plus the lagged "current" extrema used for scaling.
///
/// The first target snaps. Later targets animate; a retarget in the same
/// direction retargets the running tween without postponing its end, a flipped
/// direction restarts it so the scale never overshoots and oscillates back.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremaAnimator {
    current: Option<Extrema>,
    target: Option<Extrema>,
    direction: Option<ExtremaDirection>,
    tween: TweenSlot<ExtremaKey>,
    duration_ms: f64,
    timing: TimingFunction,
}

impl ExtremaAnimator {
    #[must_use]
    pub fn new(duration_ms: f64, timing: TimingFunction) -> Self {
        Self {
            current: None,
            target: None,
            direction: None,
            tween: TweenSlot::default(),
            duration_ms,
            timing,
        }
    }

    /// Animated extrema; `None` before the first target.
    #[must_use]
    pub fn current(&self) -> Option<Extrema> {
        self.current
    }

    #[must_use]
    pub fn target(&self) -> Option<Extrema> {
        self.target
    }

    #[must_use]
    pub fn direction(&self) -> Option<ExtremaDirection> {
        self.direction
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_active()
    }

    /// Current extrema widened to a usable scale domain.
    #[must_use]
    pub fn scale_extrema(&self) -> Option<Extrema> {
        self.current.map(Extrema::non_degenerate)
    }

    /// Sets a new target; returns `true` when it differs from the previous one.
    pub fn set_target(&mut self, handles: &HandleAllocator, target: Extrema) -> bool {
        if !target.min.is_finite() || !target.max.is_finite() {
            return false;
        }
        let Some(current) = self.current else {
            self.current = Some(target);
            self.target = Some(target);
            return true;
        };
        if self.target.is_some_and(|previous| previous.approx_eq(target)) {
            return false;
        }

        let direction = if target.span() >= current.span() {
            ExtremaDirection::Expanding
        } else {
            ExtremaDirection::Contracting
        };
        let policy = if self.direction == Some(direction) {
            RequestPolicy::Retarget
        } else {
            RequestPolicy::Replace
        };
        let decision = self.tween.request(
            handles,
            &current,
            &[(ExtremaKey::Min, target.min), (ExtremaKey::Max, target.max)],
            self.duration_ms,
            self.timing,
            policy,
        );
        trace!(
            min = target.min,
            max = target.max,
            ?direction,
            ?decision,
            "extrema retargeted"
        );
        self.direction = Some(direction);
        self.target = Some(target);
        true
    }

    /// Jumps to the target, cancelling any animation.
    pub fn snap(&mut self) {
        self.tween.cancel();
        self.current = self.target;
        self.direction = None;
    }

    /// Advances the animation; returns `true` when the current extrema moved.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        let Some(status) = self.tween.tick(delta_ms, current) else {
            return false;
        };
        if status.is_terminal() {
            self.direction = None;
        }
        true
    }
}
