use crate::foundation::{
    core::{Canvas, RasterImage},
    error::InkResult,
};

/// Request shape handed to a [`PanelGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerateParams {
    pub width: u32,
    pub height: u32,
    /// Zero-based attempt number when several variants are requested.
    pub variant: u32,
}

impl GenerateParams {
    pub fn new(canvas: Canvas, variant: u32) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            variant,
        }
    }

    pub fn canvas(&self) -> InkResult<Canvas> {
        Canvas::new(self.width, self.height)
    }
}

/// Produces panel artwork from a prompt.
///
/// Implementations are shared across worker threads; a call must not depend on the order of
/// other calls.
pub trait PanelGenerator: Send + Sync {
    fn generate(&self, prompt: &str, params: &GenerateParams) -> InkResult<RasterImage>;
}
