use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{core::RasterImage, error::InkResult};

/// File name of one panel artifact. `variant` is zero-based; the `_vKK` suffix only appears
/// when more than one variant is rendered.
pub fn panel_file_name(index: usize, id: &str, variant: u32, variants: u32) -> String {
    if variants > 1 {
        format!("panel_{:03}_{id}_v{:02}.png", index + 1, variant + 1)
    } else {
        format!("panel_{:03}_{id}.png", index + 1)
    }
}

/// File name of one page artifact, `index` zero-based.
pub fn page_file_name(index: usize) -> String {
    format!("page_{:03}.png", index + 1)
}

/// Receives finished artifacts of a scene run.
///
/// Ordering contract: panels arrive in scene order with their variants in order, and every
/// panel is written before the first page.
pub trait ArtifactSink: Send {
    fn write_panel(&mut self, name: &str, image: &RasterImage) -> InkResult<()>;
    fn write_page(&mut self, name: &str, image: &RasterImage) -> InkResult<()>;
}

/// Writes PNG files under `root/panels` and `root/pages`.
#[derive(Clone, Debug)]
pub struct PngDirSink {
    root: PathBuf,
}

impl PngDirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn panels_dir(&self) -> PathBuf {
        self.root.join("panels")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.root.join("pages")
    }

    fn write(dir: &Path, name: &str, image: &RasterImage) -> InkResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(name);
        image
            .save_with_format(&path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "wrote artifact");
        Ok(path)
    }
}

impl ArtifactSink for PngDirSink {
    fn write_panel(&mut self, name: &str, image: &RasterImage) -> InkResult<()> {
        Self::write(&self.panels_dir(), name, image).map(drop)
    }

    fn write_page(&mut self, name: &str, image: &RasterImage) -> InkResult<()> {
        Self::write(&self.pages_dir(), name, image).map(drop)
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub(crate) panels: Vec<(String, RasterImage)>,
    pub(crate) pages: Vec<(String, RasterImage)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panels in the order they were written.
    pub fn panels(&self) -> &[(String, RasterImage)] {
        &self.panels
    }

    pub fn pages(&self) -> &[(String, RasterImage)] {
        &self.pages
    }
}

impl ArtifactSink for InMemorySink {
    fn write_panel(&mut self, name: &str, image: &RasterImage) -> InkResult<()> {
        self.panels.push((name.to_string(), image.clone()));
        Ok(())
    }

    fn write_page(&mut self, name: &str, image: &RasterImage) -> InkResult<()> {
        self.pages.push((name.to_string(), image.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
