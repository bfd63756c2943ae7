use serde::{Deserialize, Serialize};

use crate::render::CanvasLayerKind;

/// Coalesced repaint requests of one view, checked once per tick.
///
/// Mutations only set bits; the frame builder reads and clears them, so any
/// number of changes within a tick cost a single repaint per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirtyFlags {
    bits: u8,
}

impl DirtyFlags {
    const CHART: u8 = 1 << 0;
    const AXIS: u8 = 1 << 1;
    const CURSOR: u8 = 1 << 2;

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::CHART | Self::AXIS | Self::CURSOR,
        }
    }

    const fn bit(layer: CanvasLayerKind) -> u8 {
        match layer {
            CanvasLayerKind::Series => Self::CHART,
            CanvasLayerKind::Axis => Self::AXIS,
            CanvasLayerKind::Cursor => Self::CURSOR,
        }
    }

    pub fn request(&mut self, layer: CanvasLayerKind) {
        self.bits |= Self::bit(layer);
    }

    pub fn request_chart(&mut self) {
        self.bits |= Self::CHART;
    }

    pub fn request_axis(&mut self) {
        self.bits |= Self::AXIS;
    }

    pub fn request_cursor(&mut self) {
        self.bits |= Self::CURSOR;
    }

    pub fn request_all(&mut self) {
        *self = Self::all();
    }

    #[must_use]
    pub const fn redraw_chart_needed(self) -> bool {
        self.bits & Self::CHART != 0
    }

    #[must_use]
    pub const fn redraw_axis_needed(self) -> bool {
        self.bits & Self::AXIS != 0
    }

    #[must_use]
    pub const fn redraw_cursor_requested(self) -> bool {
        self.bits & Self::CURSOR != 0
    }

    #[must_use]
    pub const fn is_set(self, layer: CanvasLayerKind) -> bool {
        self.bits & Self::bit(layer) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    /// Returns the pending flags and clears them.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
