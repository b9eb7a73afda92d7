//! Fixed three-slot page layout.
//!
//! ```text
//! +-----------+-----------+
//! |           |     1     |
//! |     0     +-----------+
//! |           |     2     |
//! +-----------+-----------+
//! ```
//!
//! Slots are separated by a gutter and keep their proportions whatever the canvas size.

use image::imageops::FilterType;

use crate::foundation::{
    core::{Canvas, PixelRect, RasterImage, Rgba8},
    error::{InkError, InkResult},
};

/// Number of panels a page holds.
pub const PAGE_CAPACITY: usize = 3;
pub const DEFAULT_PAGE_SIZE: Canvas = Canvas {
    width: 1536,
    height: 1024,
};
pub const DEFAULT_GUTTER_PX: u32 = 2;
pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::opaque(250, 250, 250);

/// Page canvas geometry and fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLayout {
    pub canvas: Canvas,
    pub gutter_px: u32,
    pub background: Rgba8,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageLayout {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            gutter_px: DEFAULT_GUTTER_PX,
            background: DEFAULT_BACKGROUND,
        }
    }

    pub fn with_gutter(mut self, gutter_px: u32) -> Self {
        self.gutter_px = gutter_px;
        self
    }

    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    /// Destination rectangles in placement order: left, top-right, bottom-right.
    pub fn slots(&self) -> [PixelRect; PAGE_CAPACITY] {
        let Canvas { width: w, height: h } = self.canvas;
        let g = self.gutter_px;
        let (mid_x, mid_y) = (w / 2, h / 2);
        [
            PixelRect::from_corners(0, 0, mid_x.saturating_sub(g), h),
            PixelRect::from_corners(
                mid_x.saturating_add(g),
                0,
                w.saturating_sub(g),
                mid_y.saturating_sub(g),
            ),
            PixelRect::from_corners(
                mid_x.saturating_add(g),
                mid_y.saturating_add(g),
                w.saturating_sub(g),
                h.saturating_sub(g),
            ),
        ]
    }

    pub fn validate(&self) -> InkResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if self.slots().iter().any(|s| s.is_empty()) {
            return Err(InkError::validation(format!(
                "gutter of {}px leaves no room on a {}x{} page",
                self.gutter_px, self.canvas.width, self.canvas.height
            )));
        }
        Ok(())
    }
}

/// Result of composing one page.
#[derive(Clone, Debug)]
pub struct PageComposition {
    pub image: RasterImage,
    /// Images placed, in slot order.
    pub placed: usize,
    /// Images beyond [`PAGE_CAPACITY`] that were ignored.
    pub dropped: usize,
}

/// Arranges finished panel images onto a page canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageCompositor {
    layout: PageLayout,
}

impl PageCompositor {
    pub fn new(layout: PageLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Compose up to [`PAGE_CAPACITY`] images onto a fresh canvas.
    ///
    /// Each image is stretched to exactly fill its slot (aspect ratio is not kept). Unused slots
    /// show the background. This is a hard capacity limit: images past the third are not
    /// placed, and their count is returned in [`PageComposition::dropped`] and logged.
    #[tracing::instrument(skip(self, images), fields(images = images.len()))]
    pub fn compose(&self, images: &[RasterImage]) -> InkResult<PageComposition> {
        self.layout.validate()?;
        let Canvas { width, height } = self.layout.canvas;
        let mut page = RasterImage::from_pixel(width, height, self.layout.background.to_pixel());

        let slots = self.layout.slots();
        let placed = images.len().min(slots.len());
        let dropped = images.len() - placed;
        if dropped > 0 {
            tracing::warn!(
                dropped,
                capacity = PAGE_CAPACITY,
                "page capacity exceeded; extra images ignored"
            );
        }

        for (img, slot) in images.iter().zip(slots.iter()) {
            paste_opaque(&mut page, &fit_to_slot(img, *slot), *slot);
        }

        Ok(PageComposition {
            image: page,
            placed,
            dropped,
        })
    }
}

/// Compose `images` onto a page of `page_size` with the default gutter and background.
pub fn compose_page(images: &[RasterImage], page_size: Canvas) -> InkResult<PageComposition> {
    PageCompositor::new(PageLayout::new(page_size)).compose(images)
}

fn fit_to_slot(img: &RasterImage, slot: PixelRect) -> RasterImage {
    if img.dimensions() == (slot.width, slot.height) {
        return img.clone();
    }
    image::imageops::resize(img, slot.width, slot.height, FilterType::CatmullRom)
}

/// Copy `src` onto `page` at the slot origin, discarding source alpha.
fn paste_opaque(page: &mut RasterImage, src: &RasterImage, slot: PixelRect) {
    for (x, y, px) in src.enumerate_pixels() {
        let [r, g, b, _] = px.0;
        page.put_pixel(slot.x + x, slot.y + y, image::Rgba([r, g, b, 255]));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/compose.rs"]
mod tests;
