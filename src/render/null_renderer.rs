use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, SurfaceId};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_surfaces: Vec<SurfaceId>,
    pub last_path_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_surfaces = frame.surfaces.iter().map(|surface| surface.surface).collect();
        self.last_path_count = frame.surfaces.iter().map(|surface| surface.paths.len()).sum();
        self.last_text_count = frame.surfaces.iter().map(|surface| surface.texts.len()).sum();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
