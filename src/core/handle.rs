use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

macro_rules! opaque_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

opaque_handle!(
    /// Handle of one input series within a chart instance.
    SeriesId
);
opaque_handle!(
    /// Handle of one animation instance (tween or playback).
    AnimationId
);
opaque_handle!(
    /// Handle of one pooled axis label element.
    AxisElementId
);

#[derive(Debug, Default)]
struct Counters {
    series: AtomicU32,
    animations: AtomicU32,
    axis_elements: AtomicU32,
}

/// Chart-scoped id source.
///
/// Clones share the same counters, so every component of one chart draws ids
/// from a single sequence per handle kind while separate charts never collide
/// on shared state.
#[derive(Debug, Clone, Default)]
pub struct HandleAllocator {
    counters: Arc<Counters>,
}

impl HandleAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_series(&self) -> SeriesId {
        SeriesId(self.counters.series.fetch_add(1, Ordering::Relaxed))
    }

    pub fn next_animation(&self) -> AnimationId {
        AnimationId(self.counters.animations.fetch_add(1, Ordering::Relaxed))
    }

    pub fn next_axis_element(&self) -> AxisElementId {
        AxisElementId(self.counters.axis_elements.fetch_add(1, Ordering::Relaxed))
    }
}
