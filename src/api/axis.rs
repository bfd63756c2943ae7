use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::animation::{Animatable, RequestPolicy, TimingFunction, TweenSlot};
use crate::core::{AxisElementId, HandleAllocator};

/// Which axis a label engine serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisOrientation {
    X,
    Y,
}

/// Lifecycle of a pooled label element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisElementState {
    /// Parked in the pool, not attached to a value.
    Pending,
    /// Fading in or fully shown.
    Showing,
    /// Fading out; returned to the pool once transparent.
    Hiding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LabelOpacity;

#[derive(Debug, Clone, Copy, PartialEq)]
struct LabelAppearance {
    opacity: f64,
}

impl Animatable<LabelOpacity> for LabelAppearance {
    fn get(&self, _key: LabelOpacity) -> f64 {
        self.opacity
    }

    fn set(&mut self, _key: LabelOpacity, value: f64) {
        self.opacity = value.clamp(0.0, 1.0);
    }
}

/// One tick label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisElement {
    id: AxisElementId,
    value: f64,
    state: AxisElementState,
    label: String,
    appearance: LabelAppearance,
    fade: TweenSlot<LabelOpacity>,
}

impl AxisElement {
    fn new(id: AxisElementId) -> Self {
        Self {
            id,
            value: 0.0,
            state: AxisElementState::Pending,
            label: String::new(),
            appearance: LabelAppearance { opacity: 0.0 },
            fade: TweenSlot::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> AxisElementId {
        self.id
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn state(&self) -> AxisElementState {
        self.state
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.appearance.opacity
    }

    fn fade_to(
        &mut self,
        handles: &HandleAllocator,
        target: f64,
        duration_ms: f64,
        timing: TimingFunction,
    ) {
        self.fade.request(
            handles,
            &self.appearance,
            &[(LabelOpacity, target)],
            duration_ms,
            timing,
            RequestPolicy::Replace,
        );
    }

    fn park(&mut self) {
        self.fade.cancel();
        self.state = AxisElementState::Pending;
        self.label.clear();
        self.appearance.opacity = 0.0;
    }
}

/// Values of `left` missing from `right`, in `left` order.
#[must_use]
pub fn array_diff(left: &[f64], right: &[f64]) -> Vec<f64> {
    left.iter()
        .copied()
        .filter(|value| !right.iter().any(|other| same_tick(*value, *other)))
        .collect()
}

fn same_tick(left: f64, right: f64) -> bool {
    (left - right).abs() <= 1e-9 * left.abs().max(right.abs()).max(1.0)
}

/// Outcome of one [`AxisLabelEngine::update_values`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisDiff {
    pub entered: usize,
    pub revived: usize,
    pub left: usize,
    pub dropped: usize,
}

/// Animated tick labels of one axis backed by a bounded element pool.
///
/// New values fade in on a pooled element, removed values fade out and only
/// go back to the pool once transparent. A value that returns while its
/// element is still fading out is revived in place instead of flashing.
#[derive(Debug, Clone)]
pub struct AxisLabelEngine {
    orientation: AxisOrientation,
    handles: HandleAllocator,
    capacity: usize,
    fade_ms: f64,
    timing: TimingFunction,
    active: Vec<AxisElement>,
    pool: Vec<AxisElement>,
    allocated: usize,
    step: f64,
    redraw_needed: bool,
}

impl AxisLabelEngine {
    #[must_use]
    pub fn new(
        orientation: AxisOrientation,
        handles: HandleAllocator,
        capacity: usize,
        fade_ms: f64,
        timing: TimingFunction,
    ) -> Self {
        Self {
            orientation,
            handles,
            capacity,
            fade_ms,
            timing,
            active: Vec::new(),
            pool: Vec::new(),
            allocated: 0,
            step: 0.0,
            redraw_needed: true,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> AxisOrientation {
        self.orientation
    }

    /// Attached elements in ascending value order, fading ones included.
    #[must_use]
    pub fn elements(&self) -> &[AxisElement] {
        &self.active
    }

    /// Values currently shown or fading in.
    #[must_use]
    pub fn shown_values(&self) -> Vec<f64> {
        self.active
            .iter()
            .filter(|element| element.state == AxisElementState::Showing)
            .map(AxisElement::value)
            .collect()
    }

    /// Tick spacing of the last update, in data units.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    #[must_use]
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.iter().any(|element| element.fade.is_active())
    }

    #[must_use]
    pub fn redraw_needed(&self) -> bool {
        self.redraw_needed
    }

    pub fn mark_drawn(&mut self) {
        self.redraw_needed = false;
    }

    pub fn request_redraw(&mut self) {
        self.redraw_needed = true;
    }

    /// Diffs `values` against the shown set and starts fades accordingly.
    pub fn update_values(
        &mut self,
        values: &[f64],
        step: f64,
        format: impl Fn(f64) -> String,
    ) -> AxisDiff {
        self.step = step;
        let shown = self.shown_values();
        let entering = array_diff(values, &shown);
        let leaving = array_diff(&shown, values);
        let mut diff = AxisDiff::default();

        for value in leaving {
            if let Some(element) = self.active.iter_mut().find(|element| {
                element.state == AxisElementState::Showing && same_tick(element.value, value)
            }) {
                element.state = AxisElementState::Hiding;
                element.fade_to(&self.handles, 0.0, self.fade_ms, self.timing);
                diff.left += 1;
            }
        }

        for value in entering {
            if let Some(element) = self.active.iter_mut().find(|element| {
                element.state == AxisElementState::Hiding && same_tick(element.value, value)
            }) {
                element.state = AxisElementState::Showing;
                element.label = format(value);
                element.fade_to(&self.handles, 1.0, self.fade_ms, self.timing);
                diff.revived += 1;
                continue;
            }

            let Some(mut element) = self.acquire() else {
                warn!(
                    orientation = ?self.orientation,
                    capacity = self.capacity,
                    value,
                    "axis label pool exhausted; dropping tick"
                );
                diff.dropped += 1;
                continue;
            };
            element.value = value;
            element.label = format(value);
            element.state = AxisElementState::Showing;
            element.appearance.opacity = 0.0;
            element.fade_to(&self.handles, 1.0, self.fade_ms, self.timing);
            self.active.push(element);
            diff.entered += 1;
        }

        if diff != AxisDiff::default() {
            self.active.sort_by_key(|element| OrderedFloat(element.value));
            self.redraw_needed = true;
            trace!(orientation = ?self.orientation, ?diff, "axis values updated");
        }
        diff
    }

    /// Relabels every attached element, e.g. after the label format changed.
    pub fn relabel(&mut self, format: impl Fn(f64) -> String) {
        for element in &mut self.active {
            element.label = format(element.value);
        }
        self.redraw_needed = true;
    }

    /// Advances fades and returns finished fade-outs to the pool.
    ///
    /// Returns `true` while anything visible changed.
    pub fn tick(&mut self, delta_ms: f64) -> bool {
        let mut changed = false;
        for element in &mut self.active {
            if element
                .fade
                .tick(delta_ms, &mut element.appearance)
                .is_some()
            {
                changed = true;
            }
        }

        let mut index = 0;
        while index < self.active.len() {
            let element = &self.active[index];
            if element.state == AxisElementState::Hiding && !element.fade.is_active() {
                let mut element = self.active.remove(index);
                element.park();
                self.pool.push(element);
                changed = true;
            } else {
                index += 1;
            }
        }

        if changed {
            self.redraw_needed = true;
        }
        changed
    }

    fn acquire(&mut self) -> Option<AxisElement> {
        if let Some(element) = self.pool.pop() {
            return Some(element);
        }
        if self.allocated >= self.capacity {
            return None;
        }
        self.allocated += 1;
        Some(AxisElement::new(self.handles.next_axis_element()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{AxisElementState, AxisLabelEngine, AxisOrientation, array_diff};
    use crate::animation::TimingFunction;
    use crate::core::HandleAllocator;

    fn engine(capacity: usize) -> AxisLabelEngine {
        AxisLabelEngine::new(
            AxisOrientation::Y,
            HandleAllocator::new(),
            capacity,
            100.0,
            TimingFunction::Linear,
        )
    }

    fn label(value: f64) -> String {
        format!("{value}")
    }

    #[test]
    fn array_diff_is_directional() {
        assert_eq!(array_diff(&[1.0, 2.0, 3.0], &[2.0]), vec![1.0, 3.0]);
        assert!(array_diff(&[2.0], &[1.0, 2.0, 3.0]).is_empty());
    }

    #[test]
    fn entering_values_fade_in() {
        let mut axis = engine(8);
        let diff = axis.update_values(&[0.0, 10.0], 10.0, label);
        assert_eq!(diff.entered, 2);
        assert_eq!(axis.elements()[1].label(), "10");
        assert_eq!(axis.elements()[0].opacity(), 0.0);

        axis.tick(50.0);
        assert_relative_eq!(axis.elements()[0].opacity(), 0.5);
        axis.tick(50.0);
        assert_eq!(axis.elements()[0].opacity(), 1.0);
        assert!(!axis.is_animating());
    }

    #[test]
    fn leaving_values_return_to_pool_after_fade_out() {
        let mut axis = engine(8);
        axis.update_values(&[0.0, 10.0], 10.0, label);
        axis.tick(100.0);

        let diff = axis.update_values(&[0.0], 10.0, label);
        assert_eq!(diff.left, 1);
        assert_eq!(axis.elements()[1].state(), AxisElementState::Hiding);
        assert_eq!(axis.pooled(), 0);

        axis.tick(100.0);
        assert_eq!(axis.elements().len(), 1);
        assert_eq!(axis.pooled(), 1);

        axis.update_values(&[0.0, 20.0], 10.0, label);
        assert_eq!(axis.allocated(), 2);
        assert_eq!(axis.pooled(), 0);
    }

    #[test]
    fn reappearing_value_revives_fading_element() {
        let mut axis = engine(8);
        axis.update_values(&[5.0], 5.0, label);
        axis.tick(100.0);
        axis.update_values(&[], 5.0, label);
        axis.tick(40.0);
        let id = axis.elements()[0].id();

        let diff = axis.update_values(&[5.0], 5.0, label);
        assert_eq!(diff.revived, 1);
        assert_eq!(diff.entered, 0);
        assert_eq!(axis.elements()[0].id(), id);
        assert_eq!(axis.elements()[0].state(), AxisElementState::Showing);
        // Fade-in resumes from the partially faded opacity.
        assert_relative_eq!(axis.elements()[0].opacity(), 0.6);
    }

    #[test]
    fn exhausted_pool_drops_ticks() {
        let mut axis = engine(2);
        let diff = axis.update_values(&[1.0, 2.0, 3.0], 1.0, label);
        assert_eq!(diff.entered, 2);
        assert_eq!(diff.dropped, 1);
        assert_eq!(axis.elements().len(), 2);
        assert_eq!(axis.allocated(), 2);
    }
}
