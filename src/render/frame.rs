use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, SurfaceId,
    TextPrimitive,
};

/// Primitives for one surface, replacing its previous content.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceFrame {
    pub surface: SurfaceId,
    pub viewport: Viewport,
    /// Color the surface is cleared to before painting; `None` clears to
    /// transparent.
    pub clear_color: Option<Color>,
    pub paths: Vec<PathPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl SurfaceFrame {
    #[must_use]
    pub fn new(surface: SurfaceId, viewport: Viewport) -> Self {
        Self {
            surface,
            viewport,
            clear_color: None,
            paths: Vec::new(),
            rects: Vec::new(),
            lines: Vec::new(),
            circles: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = Some(color);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if let Some(color) = self.clear_color {
            color.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.paths.len()
            + self.rects.len()
            + self.lines.len()
            + self.circles.len()
            + self.texts.len()
    }
}

/// Backend-agnostic scene for one tick: only the surfaces that need a repaint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderFrame {
    pub surfaces: Vec<SurfaceFrame>,
}

impl RenderFrame {
    pub fn push(&mut self, surface: SurfaceFrame) {
        self.surfaces.push(surface);
    }

    #[must_use]
    pub fn surface(&self, id: SurfaceId) -> Option<&SurfaceFrame> {
        self.surfaces.iter().find(|surface| surface.surface == id)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for surface in &self.surfaces {
            surface.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
