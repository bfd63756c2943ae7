use std::collections::HashMap;
use std::f64::consts::TAU;

use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, SurfaceFrame, SurfaceId, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub surfaces_painted: usize,
    pub paths_drawn: usize,
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Keeps one offscreen image surface per chart layer; a frame repaints only the
/// surfaces it lists and leaves the rest untouched. Hosts composite the
/// surfaces in `SurfaceId::canonical_order`.
#[derive(Debug, Default)]
pub struct CairoRenderer {
    surfaces: HashMap<SurfaceId, ImageSurface>,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self, id: SurfaceId) -> Option<&ImageSurface> {
        self.surfaces.get(&id)
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn surface_for(&mut self, frame: &SurfaceFrame) -> ChartResult<ImageSurface> {
        let width = i32::try_from(frame.viewport.width)
            .map_err(|_| ChartError::invalid("surface width exceeds cairo limits"))?;
        let height = i32::try_from(frame.viewport.height)
            .map_err(|_| ChartError::invalid("surface height exceeds cairo limits"))?;

        if let Some(existing) = self.surfaces.get(&frame.surface) {
            if existing.width() == width && existing.height() == height {
                return Ok(existing.clone());
            }
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        self.surfaces.insert(frame.surface, surface.clone());
        Ok(surface)
    }

    fn paint_surface(
        context: &Context,
        frame: &SurfaceFrame,
        stats: &mut CairoRenderStats,
    ) -> ChartResult<()> {
        context.set_operator(Operator::Source);
        apply_color(context, frame.clear_color.unwrap_or(Color::rgba(0.0, 0.0, 0.0, 0.0)));
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(Operator::Over);

        for rect in &frame.rects {
            apply_color(context, rect.fill_color);
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for path in &frame.paths {
            let mut points = path.points.iter();
            let Some(&(x, y)) = points.next() else {
                continue;
            };
            context.new_path();
            context.move_to(x, y);
            for &(x, y) in points {
                context.line_to(x, y);
            }
            if let Some(fill) = path.fill {
                context.close_path();
                apply_color(context, fill);
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill path", err))?;
            }
            if let Some(stroke) = path.stroke {
                apply_color(context, stroke.color);
                context.set_line_width(stroke.width);
                context.set_line_join(cairo::LineJoin::Round);
                context
                    .stroke_preserve()
                    .map_err(|err| map_backend_error("failed to stroke path", err))?;
            }
            context.new_path();
            stats.paths_drawn += 1;
        }

        for circle in &frame.circles {
            context.new_path();
            context.arc(circle.x, circle.y, circle.radius, 0.0, TAU);
            apply_color(context, circle.fill_color);
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            if let Some(stroke) = circle.stroke {
                apply_color(context, stroke.color);
                context.set_line_width(stroke.width);
                context
                    .stroke_preserve()
                    .map_err(|err| map_backend_error("failed to stroke circle", err))?;
            }
            context.new_path();
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut stats = CairoRenderStats::default();
        for surface_frame in &frame.surfaces {
            let surface = self.surface_for(surface_frame)?;
            let context = Context::new(&surface)
                .map_err(|err| map_backend_error("failed to create cairo context", err))?;
            Self::paint_surface(&context, surface_frame, &mut stats)?;
            stats.surfaces_painted += 1;
        }
        self.last_stats = stats;
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
