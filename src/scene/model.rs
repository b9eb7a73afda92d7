use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    core::RasterImage,
    error::{InkError, InkResult},
};

/// One line of dialogue, optionally attributed to a speaker.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DialogueTurn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    pub text: String,
}

impl DialogueTurn {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            speaker: None,
            text: text.into(),
        }
    }

    pub fn spoken(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker.into()),
            text: text.into(),
        }
    }

    /// Turns without visible text are skipped before layout and take no slot.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Text as drawn in the bubble: `"speaker: text"`, or just `text` without a speaker.
    pub fn display_text(&self) -> String {
        match self.speaker.as_deref().map(str::trim) {
            Some(speaker) if !speaker.is_empty() => format!("{speaker}: {}", self.text),
            _ => self.text.clone(),
        }
    }
}

/// Rendering style shared by every bubble in a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BubbleStyle {
    /// Light text with a dark stroke and no background.
    #[default]
    Outline,
    /// Dark text on a translucent rounded box.
    Glass,
}

impl BubbleStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Glass => "glass",
        }
    }
}

impl std::fmt::Display for BubbleStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BubbleStyle {
    type Err = InkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outline" => Ok(Self::Outline),
            "glass" => Ok(Self::Glass),
            other => Err(InkError::configuration(format!(
                "unknown bubble style '{other}' (expected 'outline' or 'glass')"
            ))),
        }
    }
}

/// A comic frame: artwork plus the dialogue lettered onto it.
#[derive(Clone, Debug)]
pub struct Panel {
    pub id: String,
    pub artwork: RasterImage,
    pub dialogue: Vec<DialogueTurn>,
}

impl Panel {
    pub fn new(id: impl Into<String>, artwork: RasterImage, dialogue: Vec<DialogueTurn>) -> Self {
        Self {
            id: id.into(),
            artwork,
            dialogue,
        }
    }
}

/// Scene description: panels in reading order.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub panels: Vec<ScenePanel>,
}

/// Panel entry of a [`Scene`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScenePanel {
    pub id: String,
    /// Prompt handed to the panel generator.
    #[serde(default)]
    pub prompt: String,
    /// Pre-rendered artwork, relative to the scene file. Skips generation when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork: Option<PathBuf>,
    #[serde(default)]
    pub dialogue: Vec<DialogueTurn>,
}

impl Scene {
    pub fn from_json_str(s: &str) -> InkResult<Self> {
        let scene: Self =
            serde_json::from_str(s).map_err(|e| InkError::serde(format!("scene json: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene file; relative `artwork` paths are resolved against its directory.
    pub fn from_path(path: &Path) -> InkResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        let mut scene = Self::from_json_str(&text)?;
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        for panel in &mut scene.panels {
            if let Some(art) = panel.artwork.as_mut()
                && art.is_relative()
            {
                *art = root.join(&*art);
            }
        }
        Ok(scene)
    }

    pub fn validate(&self) -> InkResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        for panel in &self.panels {
            validate_panel_id(&panel.id)?;
            if !seen.insert(panel.id.as_str()) {
                return Err(InkError::validation(format!(
                    "duplicate panel id '{}'",
                    panel.id
                )));
            }
        }
        Ok(())
    }
}

/// Panel ids become part of artifact file names.
pub fn validate_panel_id(id: &str) -> InkResult<()> {
    if id.trim().is_empty() {
        return Err(InkError::validation("panel id must be non-empty"));
    }
    if id
        .chars()
        .any(|c| matches!(c, '/' | '\\' | ':') || c.is_control())
        || id == "."
        || id == ".."
    {
        return Err(InkError::validation(format!(
            "panel id '{id}' must be usable as a file name"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
