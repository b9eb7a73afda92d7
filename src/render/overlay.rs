use vello_cpu::kurbo::{RoundedRect, Shape as _, Stroke};

use crate::{
    foundation::{
        core::{Canvas, Point, RasterImage, Rect, Rgba8, Slot},
        error::InkResult,
    },
    layout::slots::SlotAllocator,
    render::composite::composite_flatten,
    scene::model::{BubbleStyle, DialogueTurn},
    text::{
        font::{
            DEFAULT_MIN_SIZE_PX, FontMetric, FontSource, GlyphPass, Typeface, font_size_for_width,
        },
        wrap::{block_width, wrap},
    },
};

/// Space between the text block and the glass box edge.
pub const GLASS_MARGIN_PX: f64 = 12.0;
pub const GLASS_RADIUS_PX: f64 = 18.0;
pub const GLASS_BORDER_PX: f64 = 3.0;
/// Glass box fill alpha (about 67% opaque).
pub const GLASS_FILL_ALPHA: u8 = 170;

const LIGHT: Rgba8 = Rgba8::opaque(255, 255, 255);
const DARK: Rgba8 = Rgba8::opaque(0, 0, 0);

/// Placement of one dialogue turn.
#[derive(Clone, Debug, PartialEq)]
pub struct BubbleLayout {
    /// Position among the non-blank turns; drives slot rotation.
    pub turn_index: usize,
    pub slot: Slot,
    pub lines: Vec<String>,
    pub line_height: f64,
    /// Tight bounds of the wrapped text block.
    pub text_bounds: Rect,
}

impl BubbleLayout {
    /// Top-left corner of line `i`.
    pub fn line_origin(&self, i: usize) -> Point {
        Point::new(self.slot.x, self.slot.y + i as f64 * self.line_height)
    }

    /// Glass box outline: text bounds grown by [`GLASS_MARGIN_PX`].
    pub fn glass_rect(&self) -> Rect {
        self.text_bounds.inflate(GLASS_MARGIN_PX, GLASS_MARGIN_PX)
    }
}

/// Wrap and place every non-blank turn for a canvas, using an already sized face.
pub fn plan_bubbles<F: FontMetric + ?Sized>(
    canvas: Canvas,
    dialogue: &[DialogueTurn],
    face: &mut F,
) -> Vec<BubbleLayout> {
    let line_height = face.line_height();
    let slots = SlotAllocator::new(canvas, line_height);

    dialogue
        .iter()
        .filter(|t| !t.is_blank())
        .enumerate()
        .map(|(turn_index, turn)| {
            let slot = slots.allocate(turn_index);
            let lines = wrap(&turn.display_text(), &mut *face, slot.width as f32);
            let width = f64::from(block_width(&lines, &mut *face));
            let height = lines.len() as f64 * f64::from(line_height);
            tracing::debug!(
                turn_index,
                lines = lines.len(),
                slot_x = slot.x,
                slot_y = slot.y,
                "placed dialogue turn"
            );
            BubbleLayout {
                turn_index,
                slot,
                lines,
                line_height: f64::from(line_height),
                text_bounds: Rect::new(slot.x, slot.y, slot.x + width, slot.y + height),
            }
        })
        .collect()
}

/// Draws dialogue onto a transparent layer and flattens it over panel artwork.
#[derive(Clone, Debug)]
pub struct OverlayRenderer {
    font: FontSource,
    min_size_px: f32,
}

impl OverlayRenderer {
    pub fn new(font: FontSource) -> Self {
        Self {
            font,
            min_size_px: DEFAULT_MIN_SIZE_PX,
        }
    }

    pub fn with_min_size(mut self, min_size_px: f32) -> Self {
        self.min_size_px = min_size_px;
        self
    }

    pub fn font(&self) -> &FontSource {
        &self.font
    }

    /// Sized face used for an image of `width` pixels.
    pub fn typeface_for_width(&self, width: u32) -> InkResult<Typeface> {
        self.font.typeface(font_size_for_width(width, self.min_size_px))
    }

    /// Letter `dialogue` onto a copy of `image`.
    ///
    /// With no visible dialogue the result is a byte-identical copy. Otherwise the output is
    /// fully opaque; pixels no bubble touches keep their color.
    ///
    /// The raster backend addresses surfaces with 16-bit coordinates, so images wider or taller
    /// than 65535 px fail with [`InkError::Validation`](crate::InkError::Validation) when there is
    /// dialogue to draw.
    pub fn render(
        &self,
        image: &RasterImage,
        dialogue: &[DialogueTurn],
        style: BubbleStyle,
    ) -> InkResult<RasterImage> {
        if dialogue.iter().all(DialogueTurn::is_blank) {
            return Ok(image.clone());
        }

        let canvas = Canvas::of(image);
        let (w, h) = canvas.as_u16()?;
        let mut face = self.typeface_for_width(canvas.width)?;
        let bubbles = plan_bubbles(canvas, dialogue, &mut face);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for bubble in &bubbles {
            match style {
                BubbleStyle::Outline => draw_outline(&mut ctx, &mut face, bubble)?,
                BubbleStyle::Glass => draw_glass(&mut ctx, &mut face, bubble)?,
            }
        }
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        composite_flatten(image, layer.data_as_u8_slice())
    }
}

/// Outline stroke width for a face size.
pub fn outline_stroke_px(size_px: f32) -> f32 {
    (size_px * 0.12).max(2.0)
}

fn draw_outline(
    ctx: &mut vello_cpu::RenderContext,
    face: &mut Typeface,
    bubble: &BubbleLayout,
) -> InkResult<()> {
    let stroke = GlyphPass::Stroke(outline_stroke_px(face.size_px()));
    ctx.set_paint(DARK.to_cpu());
    for (i, line) in bubble.lines.iter().enumerate() {
        face.draw_line(ctx, line, bubble.line_origin(i), stroke)?;
    }
    ctx.set_paint(LIGHT.to_cpu());
    for (i, line) in bubble.lines.iter().enumerate() {
        face.draw_line(ctx, line, bubble.line_origin(i), GlyphPass::Fill)?;
    }
    Ok(())
}

fn draw_glass(
    ctx: &mut vello_cpu::RenderContext,
    face: &mut Typeface,
    bubble: &BubbleLayout,
) -> InkResult<()> {
    let r = bubble.glass_rect();
    let shape = RoundedRect::new(r.x0, r.y0, r.x1, r.y1, GLASS_RADIUS_PX).to_path(0.1);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(LIGHT.with_alpha(GLASS_FILL_ALPHA).to_cpu());
    ctx.fill_path(&shape);
    ctx.set_stroke(Stroke::new(GLASS_BORDER_PX));
    ctx.set_paint(DARK.to_cpu());
    ctx.stroke_path(&shape);

    for (i, line) in bubble.lines.iter().enumerate() {
        face.draw_line(ctx, line, bubble.line_origin(i), GlyphPass::Fill)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
