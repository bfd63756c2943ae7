//! Pointer-to-index tracking for the main chart cursor.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::animation::{AnimationStatus, PlaybackTuning, TransitionPlayback};
use crate::core::{AnimationId, IndexRange, bracket};

/// Position of the host canvas inside the page, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasOffset {
    pub left: f64,
    pub top: f64,
}

/// Converts page coordinates into device-pixel canvas coordinates.
#[must_use]
pub fn page_to_canvas(
    page_x: f64,
    page_y: f64,
    offset: CanvasOffset,
    device_pixel_ratio: f64,
) -> (f64, f64) {
    (
        (page_x - offset.left) * device_pixel_ratio,
        (page_y - offset.top) * device_pixel_ratio,
    )
}

/// Index of the data point nearest to `cursor_x`.
///
/// The two bracketing indexes compete on data distance; an exact tie goes to
/// the lower index. When the winner lies outside `visible`, the other bracket
/// index is used if it is visible. When neither is visible, the lower index is
/// returned.
#[must_use]
pub fn locate(x_axis: &[f64], cursor_x: f64, visible: IndexRange) -> Option<usize> {
    let (lower, upper) = bracket(x_axis, cursor_x)?;
    if lower == upper {
        return Some(lower);
    }

    let lower_distance = cursor_x - x_axis[lower];
    let upper_distance = x_axis[upper] - cursor_x;
    let (nearer, other) = if upper_distance < lower_distance {
        (upper, lower)
    } else {
        (lower, upper)
    };

    if visible.contains(nearer) {
        Some(nearer)
    } else if visible.contains(other) {
        Some(other)
    } else {
        Some(lower)
    }
}

/// Cursor visibility state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CursorVisibility {
    Outside,
    Inside,
    /// Pointer left; the cursor hides once the delay runs out.
    Leaving { remaining_ms: f64 },
}

/// What a tracker update changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorUpdate {
    pub shown: bool,
    pub hidden: bool,
    pub index_changed: bool,
    pub moved: bool,
}

impl CursorUpdate {
    #[must_use]
    pub const fn needs_redraw(self) -> bool {
        self.shown || self.hidden || self.index_changed || self.moved
    }
}

/// Tracks the highlighted index and smoothly follows its canvas position.
///
/// Entering is immediate; leaving is debounced by `exit_delay_ms` unless
/// forced, so a pointer briefly crossing the edge keeps the tooltip up.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorTracker {
    visibility: CursorVisibility,
    index: Option<usize>,
    exit_delay_ms: f64,
    follower: TransitionPlayback,
}

impl CursorTracker {
    #[must_use]
    pub fn new(id: AnimationId, exit_delay_ms: f64, tuning: PlaybackTuning) -> Self {
        Self {
            visibility: CursorVisibility::Outside,
            index: None,
            exit_delay_ms: exit_delay_ms.max(0.0),
            follower: TransitionPlayback::new(id, 0.0, tuning),
        }
    }

    #[must_use]
    pub fn visibility(&self) -> CursorVisibility {
        self.visibility
    }

    /// Whether the cursor is drawn (inside, or leaving but not yet hidden).
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self.visibility, CursorVisibility::Outside)
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Smoothed canvas x of the cursor line.
    #[must_use]
    pub fn canvas_x(&self) -> f64 {
        self.follower.position()
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.follower.is_running()
    }

    /// Pointer moved over the plot and resolved to `index` at `target_x`.
    pub fn on_pointer_move(&mut self, index: usize, target_x: f64) -> CursorUpdate {
        let mut update = CursorUpdate::default();
        match self.visibility {
            CursorVisibility::Outside => {
                update.shown = true;
                self.follower.jump_to(target_x);
            }
            CursorVisibility::Leaving { .. } | CursorVisibility::Inside => {
                self.follower.set_target(target_x);
            }
        }
        self.visibility = CursorVisibility::Inside;
        update.index_changed = self.index != Some(index);
        self.index = Some(index);
        update.moved = update.shown || self.follower.is_running();
        update
    }

    /// Re-aims the follower after the scale changed under a still cursor.
    pub fn retarget(&mut self, target_x: f64) {
        if self.is_visible() {
            self.follower.set_target(target_x);
        }
    }

    /// Pointer left the plot. `force` hides immediately (resize, explicit
    /// toggle); otherwise hiding waits for the exit delay.
    pub fn on_pointer_leave(&mut self, force: bool) -> CursorUpdate {
        match self.visibility {
            CursorVisibility::Outside => CursorUpdate::default(),
            _ if force || self.exit_delay_ms <= 0.0 => self.hide(),
            CursorVisibility::Inside => {
                self.visibility = CursorVisibility::Leaving {
                    remaining_ms: self.exit_delay_ms,
                };
                CursorUpdate::default()
            }
            CursorVisibility::Leaving { .. } => CursorUpdate::default(),
        }
    }

    /// Advances the exit delay and the follower.
    pub fn tick(&mut self, delta_ms: f64) -> CursorUpdate {
        let mut update = CursorUpdate::default();
        if let CursorVisibility::Leaving { remaining_ms } = self.visibility {
            let remaining_ms = remaining_ms - delta_ms.max(0.0);
            if remaining_ms <= 0.0 {
                return self.hide();
            }
            self.visibility = CursorVisibility::Leaving { remaining_ms };
        }
        if self.follower.is_running() {
            let status = self.follower.tick(delta_ms);
            update.moved = true;
            if status == AnimationStatus::Finished {
                trace!(x = self.follower.position(), "cursor settled");
            }
        }
        update
    }

    fn hide(&mut self) -> CursorUpdate {
        self.visibility = CursorVisibility::Outside;
        self.index = None;
        self.follower.cancel();
        CursorUpdate {
            hidden: true,
            ..CursorUpdate::default()
        }
    }
}
