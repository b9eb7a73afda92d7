//! inkpanel letters generated comic panels and lays them out on pages.
//!
//! The pipeline is stage-oriented and fully synchronous:
//!
//! - Letter a [`Panel`]'s dialogue with a [`BubbleCompositor`] (outline or glass bubbles)
//! - Arrange up to three finished panels on a page with a [`PageCompositor`]
//! - Or drive a whole [`Scene`] through a [`SceneRunner`], writing into an [`ArtifactSink`]
//!
//! Text falls back to a built-in bitmap font when no TrueType font can be loaded, so every
//! stage works offline and renders deterministically.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod layout;
pub(crate) mod text;

/// Artifact sinks.
pub mod encode;
/// Panel artwork generation and variant selection.
pub mod generate;
/// Page composition.
pub mod page;
/// Dialogue overlay rendering.
pub mod render;
/// Scene and run configuration models.
pub mod scene;
/// Whole-scene runs.
pub mod session;

pub use crate::foundation::core::{Canvas, PixelRect, Point, RasterImage, Rect, Rgba8, Slot};
pub use crate::foundation::error::{InkError, InkResult};

pub use crate::encode::sink::{
    ArtifactSink, InMemorySink, PngDirSink, page_file_name, panel_file_name,
};
pub use crate::generate::backend::{GenerateParams, PanelGenerator};
pub use crate::generate::placeholder::PlaceholderGenerator;
pub use crate::generate::scoring::{FirstVariant, VariantScorer, select_best};
pub use crate::layout::slots::{Corner, SlotAllocator, allocate};
pub use crate::page::compose::{
    DEFAULT_BACKGROUND, DEFAULT_GUTTER_PX, DEFAULT_PAGE_SIZE, PAGE_CAPACITY, PageComposition,
    PageCompositor, PageLayout, compose_page,
};
pub use crate::render::bubble::BubbleCompositor;
pub use crate::render::overlay::{BubbleLayout, OverlayRenderer, plan_bubbles};
pub use crate::scene::config::{FontConfig, PageConfig, PanelConfig, RunConfig};
pub use crate::scene::model::{BubbleStyle, DialogueTurn, Panel, Scene, ScenePanel};
pub use crate::session::runner::{RunReport, SceneRunner};
pub use crate::text::font::{
    BuiltinFace, DEFAULT_MIN_SIZE_PX, FontMetric, FontSource, GlyphPass, TrueTypeFace,
    TrueTypeFont, Typeface, font_size_for_width,
};
pub use crate::text::wrap::{block_width, wrap};
