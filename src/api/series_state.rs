use tracing::debug;

use crate::animation::{Animatable, RequestPolicy, TimingFunction, TweenSlot};
use crate::api::ExtremaAnimator;
use crate::core::{Extrema, HandleAllocator, SeriesId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpacityKey;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Appearance {
    opacity: f64,
}

impl Animatable<OpacityKey> for Appearance {
    fn get(&self, _key: OpacityKey) -> f64 {
        self.opacity
    }

    fn set(&mut self, _key: OpacityKey, value: f64) {
        self.opacity = value.clamp(0.0, 1.0);
    }
}

/// Mutable per-view state of one series: visibility, animated opacity and
/// extrema over the current index range.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesState {
    id: SeriesId,
    visible: bool,
    appearance: Appearance,
    fade: TweenSlot<OpacityKey>,
    local: Option<Extrema>,
    /// Own animated scale, used when series are scaled independently.
    extrema: ExtremaAnimator,
}

impl SeriesState {
    #[must_use]
    pub fn new(id: SeriesId, extrema_ms: f64, timing: TimingFunction) -> Self {
        Self {
            id,
            visible: true,
            appearance: Appearance { opacity: 1.0 },
            fade: TweenSlot::default(),
            local: None,
            extrema: ExtremaAnimator::new(extrema_ms, timing),
        }
    }

    #[must_use]
    pub fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.appearance.opacity
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        self.fade.is_active()
    }

    /// Extrema over the last computed index range.
    #[must_use]
    pub fn local_extrema(&self) -> Option<Extrema> {
        self.local
    }

    #[must_use]
    pub fn extrema(&self) -> &ExtremaAnimator {
        &self.extrema
    }

    /// Starts an opacity transition towards the new visibility.
    ///
    /// Returns `false` when the series already has that visibility.
    pub fn set_visible(
        &mut self,
        handles: &HandleAllocator,
        visible: bool,
        duration_ms: f64,
        timing: TimingFunction,
    ) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        let target = if visible { 1.0 } else { 0.0 };
        self.fade.request(
            handles,
            &self.appearance,
            &[(OpacityKey, target)],
            duration_ms,
            timing,
            RequestPolicy::Replace,
        );
        debug!(series = self.id.raw(), visible, "series visibility changed");
        true
    }

    /// Stores local extrema computed over the current range. Hidden series
    /// keep theirs too, so toggling visibility back restores the same values.
    pub(crate) fn set_local(&mut self, local: Option<Extrema>) {
        self.local = local;
    }

    /// Retargets the series' own scale to its local extrema.
    pub fn retarget_own_scale(&mut self, handles: &HandleAllocator) -> bool {
        match self.local {
            Some(local) => self.extrema.set_target(handles, local),
            None => false,
        }
    }

    /// Advances opacity and own-scale animations; returns `(opacity_moved,
    /// scale_moved)`.
    pub fn tick(&mut self, delta_ms: f64) -> (bool, bool) {
        let opacity_moved = self.fade.tick(delta_ms, &mut self.appearance).is_some();
        let scale_moved = self.extrema.tick(delta_ms);
        (opacity_moved, scale_moved)
    }
}
