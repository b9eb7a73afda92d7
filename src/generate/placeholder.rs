use vello_cpu::kurbo::{Affine, Shape as _, Stroke};

use crate::{
    foundation::{
        core::{Point, RasterImage, Rect, Rgba8},
        error::InkResult,
    },
    generate::backend::{GenerateParams, PanelGenerator},
    render::composite::composite_flatten,
    text::{
        font::{FontMetric as _, FontSource, GlyphPass},
        wrap::wrap,
    },
};

pub const PLACEHOLDER_BACKGROUND: Rgba8 = Rgba8::opaque(245, 245, 245);
pub const PLACEHOLDER_FRAME: Rgba8 = Rgba8::opaque(60, 60, 60);
const PLACEHOLDER_INK: Rgba8 = Rgba8::opaque(20, 20, 20);
const PLACEHOLDER_TEXT_PX: f32 = 16.0;
const PLACEHOLDER_MARGIN_PX: f64 = 20.0;
const PLACEHOLDER_FRAME_INSET_PX: f64 = 40.0;
const PLACEHOLDER_FRAME_PX: f64 = 3.0;
/// Prompt characters echoed onto the placeholder.
pub const PLACEHOLDER_PROMPT_CHARS: usize = 400;

/// Offline generator: a flat card showing the prompt and a frame where the art would go.
///
/// Output depends only on the prompt and the requested size.
#[derive(Clone, Debug, Default)]
pub struct PlaceholderGenerator {
    font: FontSource,
}

impl PlaceholderGenerator {
    pub fn new(font: FontSource) -> Self {
        Self { font }
    }

    /// Rectangle outlined in the lower part of the card, or `None` on tiny canvases.
    pub fn frame_rect(width: u32, height: u32) -> Option<Rect> {
        let (w, h) = (f64::from(width), f64::from(height));
        let r = Rect::new(
            PLACEHOLDER_FRAME_INSET_PX,
            (h * 0.6).floor(),
            w - PLACEHOLDER_FRAME_INSET_PX,
            h - PLACEHOLDER_FRAME_INSET_PX,
        );
        (r.width() > 0.0 && r.height() > 0.0).then_some(r)
    }
}

impl PanelGenerator for PlaceholderGenerator {
    /// Sizes above 65535 px per side, or zero, fail with
    /// [`InkError::Validation`](crate::InkError::Validation).
    #[tracing::instrument(skip(self, prompt), fields(variant = params.variant))]
    fn generate(&self, prompt: &str, params: &GenerateParams) -> InkResult<RasterImage> {
        let canvas = params.canvas()?;
        let (w, h) = canvas.as_u16()?;
        let mut face = self.font.typeface(PLACEHOLDER_TEXT_PX)?;

        let echoed: String = prompt.chars().take(PLACEHOLDER_PROMPT_CHARS).collect();
        let max_width = (f64::from(canvas.width) - 2.0 * PLACEHOLDER_MARGIN_PX).max(0.0) as f32;
        let mut lines = vec!["MOCK".to_string()];
        lines.extend(wrap(&echoed, &mut face, max_width));

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(PLACEHOLDER_INK.to_cpu());
        let line_height = f64::from(face.line_height());
        for (i, line) in lines.iter().enumerate() {
            let origin = Point::new(
                PLACEHOLDER_MARGIN_PX,
                PLACEHOLDER_MARGIN_PX + i as f64 * line_height,
            );
            face.draw_line(&mut ctx, line, origin, GlyphPass::Fill)?;
        }

        if let Some(frame) = Self::frame_rect(canvas.width, canvas.height) {
            ctx.set_transform(Affine::IDENTITY);
            ctx.set_stroke(Stroke::new(PLACEHOLDER_FRAME_PX));
            ctx.set_paint(PLACEHOLDER_FRAME.to_cpu());
            let frame = vello_cpu::kurbo::Rect::new(frame.x0, frame.y0, frame.x1, frame.y1);
            ctx.stroke_path(&frame.to_path(0.1));
        }
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        let card = RasterImage::from_pixel(
            canvas.width,
            canvas.height,
            PLACEHOLDER_BACKGROUND.to_pixel(),
        );
        composite_flatten(&card, layer.data_as_u8_slice())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/placeholder.rs"]
mod tests;
