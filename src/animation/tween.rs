use smallvec::SmallVec;
use tracing::trace;

use crate::animation::TimingFunction;
use crate::core::{AnimationId, HandleAllocator};

/// Object whose numeric properties a [`Tween`] drives.
pub trait Animatable<K> {
    fn get(&self, key: K) -> f64;
    fn set(&mut self, key: K, value: f64);
}

/// Lifecycle of an animation instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
    Cancelled,
}

impl AnimationStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TweenProperty<K> {
    key: K,
    start: f64,
    end: f64,
}

/// Fixed-duration interpolation of one or more properties through a timing
/// curve.
///
/// Times are milliseconds. Once terminal, the tween releases its properties and
/// every further call is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<K> {
    id: AnimationId,
    properties: SmallVec<[TweenProperty<K>; 2]>,
    elapsed_ms: f64,
    duration_ms: f64,
    timing: TimingFunction,
    status: AnimationStatus,
}

impl<K: Copy + Eq + std::fmt::Debug> Tween<K> {
    /// Starts interpolating each `(key, end)` from the target's current value.
    pub fn start(
        id: AnimationId,
        target: &impl Animatable<K>,
        ends: &[(K, f64)],
        duration_ms: f64,
        timing: TimingFunction,
    ) -> Self {
        let properties = ends
            .iter()
            .map(|&(key, end)| TweenProperty {
                key,
                start: target.get(key),
                end,
            })
            .collect();
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        trace!(id = id.raw(), duration_ms, ?timing, "tween started");
        Self {
            id,
            properties,
            elapsed_ms: 0.0,
            duration_ms,
            timing,
            status: AnimationStatus::Running,
        }
    }

    #[must_use]
    pub fn id(&self) -> AnimationId {
        self.id
    }

    #[must_use]
    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == AnimationStatus::Running
    }

    #[must_use]
    pub fn timing(&self) -> TimingFunction {
        self.timing
    }

    /// Linear progress clamped to `0..=1`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Interpolated value of `key` at the current progress.
    #[must_use]
    pub fn value(&self, key: K) -> Option<f64> {
        let eased = self.timing.apply(self.progress());
        self.property(key)
            .map(|property| interpolate(property.start, property.end, eased))
    }

    /// Requested end value of `key`.
    #[must_use]
    pub fn end_value(&self, key: K) -> Option<f64> {
        self.property(key).map(|property| property.end)
    }

    /// Advances by `delta_ms` and writes interpolated values into `target`.
    ///
    /// Reaching the duration finishes the tween with exact end values.
    pub fn tick(&mut self, delta_ms: f64, target: &mut impl Animatable<K>) -> AnimationStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.elapsed_ms += delta_ms;
        }
        if self.elapsed_ms >= self.duration_ms {
            return self.finish(target);
        }

        let eased = self.timing.apply(self.progress());
        for property in &self.properties {
            target.set(
                property.key,
                interpolate(property.start, property.end, eased),
            );
        }
        AnimationStatus::Running
    }

    /// Jumps to the end: every property is set to exactly its end value.
    pub fn finish(&mut self, target: &mut impl Animatable<K>) -> AnimationStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        for property in &self.properties {
            target.set(property.key, property.end);
        }
        self.elapsed_ms = self.duration_ms;
        self.release(AnimationStatus::Finished)
    }

    /// Stops without touching the target further.
    pub fn cancel(&mut self) -> AnimationStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        self.release(AnimationStatus::Cancelled)
    }

    /// Retargets a running tween.
    ///
    /// Every property restarts from the target's current value towards its new
    /// end, with the full duration ahead, so the motion stays continuous.
    /// Keys not yet animated are added.
    pub fn patch(&mut self, target: &impl Animatable<K>, ends: &[(K, f64)]) {
        if self.status.is_terminal() {
            return;
        }
        for &(key, end) in ends {
            let start = target.get(key);
            match self.properties.iter_mut().find(|property| property.key == key) {
                Some(property) => {
                    property.start = start;
                    property.end = end;
                }
                None => self.properties.push(TweenProperty { key, start, end }),
            }
        }
        for property in &mut self.properties {
            if !ends.iter().any(|(key, _)| *key == property.key) {
                property.start = target.get(property.key);
            }
        }
        self.elapsed_ms = 0.0;
        trace!(id = self.id.raw(), "tween patched");
    }

    /// Retargets a running tween while keeping its schedule.
    ///
    /// Each start is rebased so the curve passes through the target's current
    /// value at the current progress, which keeps the motion continuous and
    /// lands on the new ends when the original duration runs out. Repeated
    /// retargets therefore never postpone the end. Falls back to
    /// [`Tween::patch`] when no eased progress is left to rebase onto.
    pub fn retarget(&mut self, target: &impl Animatable<K>, ends: &[(K, f64)]) {
        if self.status.is_terminal() {
            return;
        }
        let eased = self.timing.apply(self.progress());
        let remaining = 1.0 - eased;
        if remaining <= REBASE_EPSILON {
            self.patch(target, ends);
            return;
        }
        for &(key, end) in ends {
            let start = (target.get(key) - end * eased) / remaining;
            match self.properties.iter_mut().find(|property| property.key == key) {
                Some(property) => {
                    property.start = start;
                    property.end = end;
                }
                None => self.properties.push(TweenProperty { key, start, end }),
            }
        }
        trace!(id = self.id.raw(), elapsed_ms = self.elapsed_ms, "tween retargeted");
    }

    fn property(&self, key: K) -> Option<&TweenProperty<K>> {
        self.properties.iter().find(|property| property.key == key)
    }

    fn release(&mut self, status: AnimationStatus) -> AnimationStatus {
        self.status = status;
        self.properties.clear();
        trace!(id = self.id.raw(), ?status, "tween released");
        status
    }
}

const REBASE_EPSILON: f64 = 1e-9;

fn interpolate(start: f64, end: f64, eased: f64) -> f64 {
    if eased >= 1.0 {
        return end;
    }
    start + (end - start) * eased
}

/// How a new request for a concern treats an in-flight tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPolicy {
    /// Retarget the running tween, restarting its duration.
    Patch,
    /// Retarget the running tween on its original schedule.
    Retarget,
    /// Cancel the running tween and start a fresh one.
    Replace,
}

/// Outcome of [`TweenSlot::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDecision {
    Started,
    Patched,
    Replaced,
}

/// Holder guaranteeing at most one tween per logical concern.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSlot<K> {
    active: Option<Tween<K>>,
}

impl<K> Default for TweenSlot<K> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: Copy + Eq + std::fmt::Debug> TweenSlot<K> {
    /// Starts, patches or replaces the concern's tween.
    pub fn request(
        &mut self,
        handles: &HandleAllocator,
        target: &impl Animatable<K>,
        ends: &[(K, f64)],
        duration_ms: f64,
        timing: TimingFunction,
        policy: RequestPolicy,
    ) -> SlotDecision {
        match (&mut self.active, policy) {
            (Some(tween), RequestPolicy::Patch) if tween.timing() == timing => {
                tween.patch(target, ends);
                SlotDecision::Patched
            }
            (Some(tween), RequestPolicy::Retarget) if tween.timing() == timing => {
                tween.retarget(target, ends);
                SlotDecision::Patched
            }
            (Some(tween), _) => {
                tween.cancel();
                self.active = Some(Tween::start(
                    handles.next_animation(),
                    target,
                    ends,
                    duration_ms,
                    timing,
                ));
                SlotDecision::Replaced
            }
            (None, _) => {
                self.active = Some(Tween::start(
                    handles.next_animation(),
                    target,
                    ends,
                    duration_ms,
                    timing,
                ));
                SlotDecision::Started
            }
        }
    }

    /// Advances the active tween; terminal tweens are dropped.
    ///
    /// Returns `None` when no tween was active.
    pub fn tick(
        &mut self,
        delta_ms: f64,
        target: &mut impl Animatable<K>,
    ) -> Option<AnimationStatus> {
        let tween = self.active.as_mut()?;
        let status = tween.tick(delta_ms, target);
        if status.is_terminal() {
            self.active = None;
        }
        Some(status)
    }

    pub fn finish(&mut self, target: &mut impl Animatable<K>) -> Option<AnimationStatus> {
        let mut tween = self.active.take()?;
        Some(tween.finish(target))
    }

    pub fn cancel(&mut self) -> Option<AnimationStatus> {
        let mut tween = self.active.take()?;
        Some(tween.cancel())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn tween(&self) -> Option<&Tween<K>> {
        self.active.as_ref()
    }
}
