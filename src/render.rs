//! Dialogue lettering.
//!
//! Bubbles are drawn onto a transparent layer with `vello_cpu` and flattened over the artwork.

/// Per-panel lettering entry point.
pub mod bubble;
/// Premultiplied compositing helpers.
pub mod composite;
/// Bubble layout and drawing.
pub mod overlay;
