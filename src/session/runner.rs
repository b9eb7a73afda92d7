use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    encode::sink::{ArtifactSink, page_file_name, panel_file_name},
    foundation::{
        core::RasterImage,
        error::{InkError, InkResult},
    },
    generate::{
        backend::{GenerateParams, PanelGenerator},
        placeholder::PlaceholderGenerator,
        scoring::{FirstVariant, VariantScorer, select_best},
    },
    page::compose::{PAGE_CAPACITY, PageCompositor},
    render::bubble::BubbleCompositor,
    scene::{
        config::RunConfig,
        model::{Panel, Scene, ScenePanel},
    },
    text::font::FontSource,
};

/// Artifact names written by [`SceneRunner::run`], in write order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub panels: Vec<String>,
    pub pages: Vec<String>,
    /// Panel images left off a page. Pages are filled in capacity-sized chunks, so this stays
    /// zero unless a compositor reports otherwise.
    pub dropped: usize,
}

/// Lettered variants of one scene panel.
struct RenderedPanel {
    id: String,
    variants: Vec<RasterImage>,
    best: usize,
}

/// Drives a whole scene: generate, letter, pick, write panels, then compose pages.
pub struct SceneRunner {
    config: RunConfig,
    generator: Box<dyn PanelGenerator>,
    scorer: Box<dyn VariantScorer>,
    bubbles: BubbleCompositor,
    pages: PageCompositor,
}

impl SceneRunner {
    /// Runner with the configured font, the placeholder generator and first-variant selection.
    pub fn new(config: RunConfig) -> InkResult<Self> {
        let font = config.load_font();
        Self::with_font(config, font)
    }

    pub fn with_font(config: RunConfig, font: FontSource) -> InkResult<Self> {
        config.validate()?;
        let bubbles = BubbleCompositor::new(config.bubble_style, font.clone())
            .with_min_font_size(config.font.min_size_px);
        let pages = PageCompositor::new(config.page_layout());
        Ok(Self {
            generator: Box::new(PlaceholderGenerator::new(font)),
            scorer: Box::new(FirstVariant),
            bubbles,
            pages,
            config,
        })
    }

    pub fn with_generator(mut self, generator: impl PanelGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    pub fn with_scorer(mut self, scorer: impl VariantScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Render every panel in parallel, then write panels and pages to `sink` in scene order.
    ///
    /// Nothing is written if any panel fails; the first failure in scene order is returned.
    #[tracing::instrument(skip(self, scene, sink), fields(panels = scene.panels.len()))]
    pub fn run(&self, scene: &Scene, sink: &mut dyn ArtifactSink) -> InkResult<RunReport> {
        scene.validate()?;
        let pool = build_thread_pool(self.config.threads)?;
        let rendered: Vec<InkResult<RenderedPanel>> = pool.install(|| {
            scene
                .panels
                .par_iter()
                .map(|panel| self.render_panel(panel))
                .collect()
        });
        let rendered = rendered.into_iter().collect::<InkResult<Vec<_>>>()?;

        let mut report = RunReport::default();
        for (index, panel) in rendered.iter().enumerate() {
            let count = panel.variants.len() as u32;
            for (variant, image) in (0u32..).zip(&panel.variants) {
                let name = panel_file_name(index, &panel.id, variant, count);
                sink.write_panel(&name, image)?;
                report.panels.push(name);
            }
        }

        let finished: Vec<RasterImage> = rendered
            .into_iter()
            .map(|mut p| p.variants.swap_remove(p.best))
            .collect();
        for (index, chunk) in finished.chunks(PAGE_CAPACITY).enumerate() {
            let page = self.pages.compose(chunk)?;
            report.dropped += page.dropped;
            let name = page_file_name(index);
            sink.write_page(&name, &page.image)?;
            report.pages.push(name);
        }

        tracing::info!(
            panels = report.panels.len(),
            pages = report.pages.len(),
            "scene complete"
        );
        Ok(report)
    }

    #[tracing::instrument(skip(self, panel), fields(panel = %panel.id))]
    fn render_panel(&self, panel: &ScenePanel) -> InkResult<RenderedPanel> {
        let raw = match &panel.artwork {
            Some(path) => {
                let img = image::open(path)
                    .with_context(|| format!("load artwork '{}'", path.display()))?;
                vec![img.to_rgba8()]
            }
            None => (0..self.config.panel.variants)
                .map(|variant| {
                    let params = GenerateParams::new(self.config.panel_canvas(), variant);
                    self.generator.generate(&panel.prompt, &params)
                })
                .collect::<InkResult<Vec<_>>>()?,
        };

        let variants = raw
            .into_iter()
            .map(|art| {
                self.bubbles
                    .composite(&Panel::new(panel.id.clone(), art, panel.dialogue.clone()))
            })
            .collect::<InkResult<Vec<_>>>()?;
        let best = select_best(&variants, self.scorer.as_ref())
            .ok_or_else(|| InkError::render(format!("panel '{}' has no variants", panel.id)))?;
        tracing::debug!(variants = variants.len(), best, "panel lettered");

        Ok(RenderedPanel {
            id: panel.id.clone(),
            variants,
            best,
        })
    }
}

fn build_thread_pool(threads: Option<usize>) -> InkResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(InkError::configuration("threads must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| InkError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/runner.rs"]
mod tests;
