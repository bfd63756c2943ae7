use serde::{Deserialize, Serialize};

use crate::core::ChartRole;

/// Drawing layers each view keeps as separate surfaces.
///
/// Splitting them lets a cursor move repaint only the overlay while series
/// paths stay untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Series,
    Axis,
    Cursor,
}

/// One drawing surface owned by the host: a layer of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId {
    pub role: ChartRole,
    pub layer: CanvasLayerKind,
}

impl SurfaceId {
    #[must_use]
    pub const fn new(role: ChartRole, layer: CanvasLayerKind) -> Self {
        Self { role, layer }
    }

    /// Surfaces in back-to-front paint order, main view first.
    #[must_use]
    pub const fn canonical_order() -> [Self; 6] {
        [
            Self::new(ChartRole::Main, CanvasLayerKind::Axis),
            Self::new(ChartRole::Main, CanvasLayerKind::Series),
            Self::new(ChartRole::Main, CanvasLayerKind::Cursor),
            Self::new(ChartRole::Navigator, CanvasLayerKind::Axis),
            Self::new(ChartRole::Navigator, CanvasLayerKind::Series),
            Self::new(ChartRole::Navigator, CanvasLayerKind::Cursor),
        ]
    }
}
