use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Canvas, Rgba8},
        error::{InkError, InkResult},
    },
    page::compose::{DEFAULT_BACKGROUND, DEFAULT_GUTTER_PX, DEFAULT_PAGE_SIZE, PageLayout},
    scene::model::BubbleStyle,
    text::font::{DEFAULT_MIN_SIZE_PX, FontSource},
};

/// Everything a scene run needs besides the scene itself.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    pub bubble_style: BubbleStyle,
    pub font: FontConfig,
    pub page: PageConfig,
    pub panel: PanelConfig,
    /// Worker threads for panel rendering; `None` uses rayon's default.
    pub threads: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Preferred font file. Unset searches for the default font.
    pub path: Option<PathBuf>,
    pub min_size_px: f32,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub width: u32,
    pub height: u32,
    pub gutter_px: u32,
    pub background: [u8; 3],
}

/// Generation parameters passed through to the panel generator.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub width: u32,
    pub height: u32,
    /// Render attempts per panel; every attempt is written, the best one goes on the page.
    pub variants: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            min_size_px: DEFAULT_MIN_SIZE_PX,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_PAGE_SIZE.width,
            height: DEFAULT_PAGE_SIZE.height,
            gutter_px: DEFAULT_GUTTER_PX,
            background: [
                DEFAULT_BACKGROUND.r,
                DEFAULT_BACKGROUND.g,
                DEFAULT_BACKGROUND.b,
            ],
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 832,
            height: 1152,
            variants: 1,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bubble_style: BubbleStyle::default(),
            font: FontConfig::default(),
            page: PageConfig::default(),
            panel: PanelConfig::default(),
            threads: None,
        }
    }
}

/// On-disk shape; the style stays a string so unknown values surface as configuration errors.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct RunConfigDef {
    bubble_style: Option<String>,
    font: FontConfig,
    page: PageConfig,
    panel: PanelConfig,
    threads: Option<usize>,
}

impl RunConfig {
    pub fn from_json_str(s: &str) -> InkResult<Self> {
        let def: RunConfigDef =
            serde_json::from_str(s).map_err(|e| InkError::serde(format!("config json: {e}")))?;
        let bubble_style = match def.bubble_style.as_deref() {
            Some(s) => s.parse()?,
            None => BubbleStyle::default(),
        };
        let cfg = Self {
            bubble_style,
            font: def.font,
            page: def.page,
            panel: def.panel,
            threads: def.threads,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> InkResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> InkResult<()> {
        if !self.font.min_size_px.is_finite() || self.font.min_size_px <= 0.0 {
            return Err(InkError::configuration(
                "font.min_size_px must be finite and > 0",
            ));
        }
        Canvas::new(self.panel.width, self.panel.height)
            .map_err(|_| InkError::configuration("panel width/height must be > 0"))?;
        if self.panel.variants == 0 {
            return Err(InkError::configuration("panel.variants must be >= 1"));
        }
        if self.threads == Some(0) {
            return Err(InkError::configuration("threads must be >= 1 when set"));
        }
        self.page_layout()
            .validate()
            .map_err(|e| InkError::configuration(format!("page: {e}")))
    }

    pub fn page_layout(&self) -> PageLayout {
        let [r, g, b] = self.page.background;
        PageLayout::new(Canvas {
            width: self.page.width,
            height: self.page.height,
        })
        .with_gutter(self.page.gutter_px)
        .with_background(Rgba8::opaque(r, g, b))
    }

    pub fn panel_canvas(&self) -> Canvas {
        Canvas {
            width: self.panel.width,
            height: self.panel.height,
        }
    }

    /// Resolve the configured font, falling back to the built-in one.
    pub fn load_font(&self) -> FontSource {
        FontSource::load_or_builtin(self.font.path.as_deref())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
