mod frame;
mod layer_stack;
mod null_renderer;
mod primitives;

pub use frame::{RenderFrame, SurfaceFrame};
pub use layer_stack::{CanvasLayerKind, SurfaceId};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, PathStroke, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` holding
/// only the dirty surfaces, so drawing code remains isolated from viewport,
/// animation and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
