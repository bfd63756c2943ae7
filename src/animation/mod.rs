//! Reusable animation primitives driven by explicit millisecond ticks.

mod easing;
mod playback;
mod tween;

pub use easing::TimingFunction;
pub use playback::{PlaybackTuning, TransitionPlayback};
pub use tween::{Animatable, AnimationStatus, RequestPolicy, SlotDecision, Tween, TweenSlot};
