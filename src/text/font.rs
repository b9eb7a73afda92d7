use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use vello_cpu::kurbo::{Affine, BezPath, Stroke};

use crate::foundation::{
    core::Point,
    error::{InkError, InkResult},
};

/// Smallest font size used for dialogue, whatever the panel width.
pub const DEFAULT_MIN_SIZE_PX: f32 = 18.0;

/// Panel width is divided by this to derive the dialogue font size.
pub const WIDTH_TO_SIZE_DIVISOR: f32 = 36.0;

/// Font file looked up when no explicit path is configured.
pub const PREFERRED_FONT_FILE: &str = "DejaVuSans.ttf";

const PREFERRED_FONT_DIRS: &[&str] = &[
    ".",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/dejavu",
    "/usr/local/share/fonts",
    "/Library/Fonts",
];

/// Text measurement used by line wrapping and bubble layout.
///
/// Shaping backends keep mutable caches, so measuring takes `&mut self`.
pub trait FontMetric {
    /// Advance width of `text` in pixels when laid out on a single line.
    fn measure(&mut self, text: &str) -> f32;

    /// Distance between consecutive baselines in pixels.
    fn line_height(&self) -> f32;
}

/// Dialogue font size for an image of the given width.
pub fn font_size_for_width(width: u32, min_size_px: f32) -> f32 {
    (width as f32 / WIDTH_TO_SIZE_DIVISOR).max(min_size_px)
}

/// Loaded TrueType/OpenType font data.
///
/// The font is registered once; faces clone the registered shaping context, which shares the
/// font blob instead of copying it.
pub struct TrueTypeFont {
    blob: vello_cpu::peniko::Blob<u8>,
    family: String,
    origin: Option<PathBuf>,
    font_ctx: parley::FontContext,
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("bytes_len", &self.blob.len())
            .field("family", &self.family)
            .field("origin", &self.origin)
            .finish()
    }
}

/// Font provider handed explicitly to every renderer.
///
/// Cheap to clone and shareable across worker threads; each render builds its own
/// [`Typeface`] from it.
#[derive(Clone, Debug, Default)]
pub enum FontSource {
    /// A scalable font loaded from bytes.
    TrueType(Arc<TrueTypeFont>),
    /// The 8x8 bitmap font compiled into the crate.
    #[default]
    Builtin,
}

impl FontSource {
    pub fn builtin() -> Self {
        Self::Builtin
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Family name of the loaded font, or `None` for the built-in font.
    pub fn family(&self) -> Option<&str> {
        match self {
            Self::TrueType(f) => Some(f.family.as_str()),
            Self::Builtin => None,
        }
    }

    /// Register raw font bytes, failing with [`InkError::FontUnavailable`] when they hold no
    /// usable family.
    pub fn from_bytes(bytes: Vec<u8>) -> InkResult<Self> {
        Self::from_parts(bytes, None)
    }

    /// Load a font file, failing with [`InkError::FontUnavailable`] on any problem.
    pub fn from_path(path: &Path) -> InkResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| InkError::font_unavailable(format!("{e:#}")))?;
        Self::from_parts(bytes, Some(path.to_path_buf()))
    }

    /// Load the preferred font, falling back to the built-in font.
    ///
    /// With `path == None` the preferred font file is searched in the working directory and the
    /// usual system font directories. Fallback is logged at warn level so degraded typography
    /// is visible to callers.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let result = match path {
            Some(p) => Self::from_path(p),
            None => find_preferred_font()
                .ok_or_else(|| {
                    InkError::font_unavailable(format!(
                        "'{PREFERRED_FONT_FILE}' not found in font search path"
                    ))
                })
                .and_then(|p| Self::from_path(&p)),
        };

        match result {
            Ok(source) => {
                tracing::debug!(family = source.family(), "loaded dialogue font");
                source
            }
            Err(err) => {
                tracing::warn!(error = %err, "falling back to built-in bitmap font");
                Self::Builtin
            }
        }
    }

    /// Build a sized typeface for one render.
    pub fn typeface(&self, size_px: f32) -> InkResult<Typeface> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(InkError::validation("font size must be finite and > 0"));
        }
        match self {
            Self::TrueType(font) => Ok(Typeface::TrueType(TrueTypeFace::new(font, size_px)?)),
            Self::Builtin => Ok(Typeface::Builtin(BuiltinFace::new(size_px))),
        }
    }

    fn from_parts(bytes: Vec<u8>, origin: Option<PathBuf>) -> InkResult<Self> {
        let blob = vello_cpu::peniko::Blob::from(bytes);
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &blob)?;
        Ok(Self::TrueType(Arc::new(TrueTypeFont {
            blob,
            family,
            origin,
            font_ctx,
        })))
    }
}

pub(crate) fn find_preferred_font() -> Option<PathBuf> {
    PREFERRED_FONT_DIRS
        .iter()
        .map(|dir| Path::new(dir).join(PREFERRED_FONT_FILE))
        .find(|p| p.is_file())
}

fn register_family(
    font_ctx: &mut parley::FontContext,
    blob: &vello_cpu::peniko::Blob<u8>,
) -> InkResult<String> {
    let families = font_ctx.collection.register_fonts(blob.clone(), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| InkError::font_unavailable("no font families registered from font bytes"))?;
    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| InkError::font_unavailable("registered font family has no name"))
}

/// How glyphs are painted by [`Typeface::draw_line`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GlyphPass {
    Fill,
    /// Stroke glyph outlines with the given line width in pixels.
    Stroke(f32),
}

/// A font at a fixed pixel size, ready to measure and draw.
pub enum Typeface {
    TrueType(TrueTypeFace),
    Builtin(BuiltinFace),
}

impl Typeface {
    pub fn size_px(&self) -> f32 {
        match self {
            Self::TrueType(f) => f.size_px,
            Self::Builtin(f) => f.size_px,
        }
    }

    /// Draw one line of text with its line box's top-left corner at `origin`, using the paint
    /// currently set on `ctx`.
    pub(crate) fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        pass: GlyphPass,
    ) -> InkResult<()> {
        match self {
            Self::TrueType(f) => f.draw_line(ctx, text, origin, pass),
            Self::Builtin(f) => {
                f.draw_line(ctx, text, origin, pass);
                Ok(())
            }
        }
    }
}

impl FontMetric for Typeface {
    fn measure(&mut self, text: &str) -> f32 {
        match self {
            Self::TrueType(f) => f.measure(text),
            Self::Builtin(f) => f.measure(text),
        }
    }

    fn line_height(&self) -> f32 {
        match self {
            Self::TrueType(f) => f.line_height(),
            Self::Builtin(f) => f.line_height(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct InkBrush;

/// Parley-shaped face backed by a [`TrueTypeFont`].
pub struct TrueTypeFace {
    font: vello_cpu::peniko::FontData,
    family: String,
    size_px: f32,
    line_height: f32,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<InkBrush>,
}

impl TrueTypeFace {
    fn new(font: &TrueTypeFont, size_px: f32) -> InkResult<Self> {
        let mut face = Self {
            font: vello_cpu::peniko::FontData::new(font.blob.clone(), 0),
            family: font.family.clone(),
            size_px,
            line_height: size_px,
            font_ctx: font.font_ctx.clone(),
            layout_ctx: parley::LayoutContext::new(),
        };
        let probe = face.layout("Ag");
        face.line_height = probe.height().max(size_px);
        Ok(face)
    }

    fn layout(&mut self, text: &str) -> parley::Layout<InkBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));

        let mut layout: parley::Layout<InkBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    fn measure(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text).width()
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        pass: GlyphPass,
    ) -> InkResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self.layout(text);
        ctx.set_transform(Affine::translate((origin.x, origin.y)));
        if let GlyphPass::Stroke(width) = pass {
            ctx.set_stroke(Stroke::new(f64::from(width)));
        }

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                // Line-relative pen position plus the run's baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                let builder = ctx
                    .glyph_run(&self.font)
                    .font_size(run.run().font_size());
                match pass {
                    GlyphPass::Fill => builder.fill_glyphs(glyphs),
                    GlyphPass::Stroke(_) => builder.stroke_glyphs(glyphs),
                }
            }
        }
        ctx.set_transform(Affine::IDENTITY);
        Ok(())
    }
}

/// Glyph cell edge of the built-in font, in font units.
const BUILTIN_CELL: usize = 8;
/// Built-in line height in cells (glyph rows plus leading).
const BUILTIN_LINE_CELLS: f32 = 10.0;

/// Fixed-advance face rendering `font8x8` glyphs as scaled pixel blocks.
///
/// Characters outside ASCII render as `?`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuiltinFace {
    size_px: f32,
    cell_px: f32,
}

impl BuiltinFace {
    pub fn new(size_px: f32) -> Self {
        Self {
            size_px,
            cell_px: size_px / BUILTIN_CELL as f32,
        }
    }

    /// Horizontal advance of every character.
    pub fn advance_px(&self) -> f32 {
        self.cell_px * BUILTIN_CELL as f32
    }

    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance_px()
    }

    fn line_height(&self) -> f32 {
        self.cell_px * BUILTIN_LINE_CELLS
    }

    /// Glyph coverage of `text` as a union of rectangles, line box origin at `(0, 0)`.
    pub(crate) fn glyph_path(&self, text: &str) -> BezPath {
        let cell = f64::from(self.cell_px);
        // One empty row above the glyphs, one below as leading.
        let top = cell;
        let mut path = BezPath::new();

        for (col, ch) in text.chars().enumerate() {
            let x0 = col as f64 * f64::from(self.advance_px());
            for (row, bits) in glyph_for_char(ch).iter().enumerate() {
                let y = top + row as f64 * cell;
                let mut bit = 0usize;
                while bit < BUILTIN_CELL {
                    if (bits >> bit) & 1 == 0 {
                        bit += 1;
                        continue;
                    }
                    let start = bit;
                    while bit < BUILTIN_CELL && (bits >> bit) & 1 == 1 {
                        bit += 1;
                    }
                    let xa = x0 + start as f64 * cell;
                    let xb = x0 + bit as f64 * cell;
                    path.move_to((xa, y));
                    path.line_to((xb, y));
                    path.line_to((xb, y + cell));
                    path.line_to((xa, y + cell));
                    path.close_path();
                }
            }
        }
        path
    }

    fn draw_line(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        pass: GlyphPass,
    ) {
        if text.is_empty() {
            return;
        }
        let path = self.glyph_path(text);
        match pass {
            GlyphPass::Fill => {
                ctx.set_transform(Affine::translate((origin.x, origin.y)));
                ctx.fill_path(&path);
            }
            GlyphPass::Stroke(width) => {
                // Pixel blocks have no outline worth stroking; dilate by filling shifted copies.
                let r = f64::from(width / 2.0).max(1.0);
                for (dx, dy) in [
                    (-r, 0.0),
                    (r, 0.0),
                    (0.0, -r),
                    (0.0, r),
                    (-r, -r),
                    (r, -r),
                    (-r, r),
                    (r, r),
                ] {
                    ctx.set_transform(Affine::translate((origin.x + dx, origin.y + dy)));
                    ctx.fill_path(&path);
                }
            }
        }
        ctx.set_transform(Affine::IDENTITY);
    }
}

fn glyph_for_char(ch: char) -> [u8; 8] {
    use font8x8::legacy::BASIC_LEGACY;

    let index = ch as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
