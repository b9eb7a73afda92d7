use crate::{
    foundation::{core::RasterImage, error::InkResult},
    render::overlay::OverlayRenderer,
    scene::model::{BubbleStyle, Panel},
    text::font::FontSource,
};

/// Letters a whole panel: wrap, place and draw every dialogue turn.
///
/// Holds no state between calls, so one compositor can be shared by parallel workers.
#[derive(Clone, Debug)]
pub struct BubbleCompositor {
    style: BubbleStyle,
    renderer: OverlayRenderer,
}

impl BubbleCompositor {
    pub fn new(style: BubbleStyle, font: FontSource) -> Self {
        Self {
            style,
            renderer: OverlayRenderer::new(font),
        }
    }

    pub fn with_min_font_size(mut self, min_size_px: f32) -> Self {
        self.renderer = self.renderer.with_min_size(min_size_px);
        self
    }

    pub fn style(&self) -> BubbleStyle {
        self.style
    }

    pub fn renderer(&self) -> &OverlayRenderer {
        &self.renderer
    }

    #[tracing::instrument(skip(self, panel), fields(panel = %panel.id, style = %self.style))]
    pub fn composite(&self, panel: &Panel) -> InkResult<RasterImage> {
        self.renderer.render(&panel.artwork, &panel.dialogue, self.style)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/bubble.rs"]
mod tests;
