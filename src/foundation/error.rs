/// Convenience result type used across inkpanel.
pub type InkResult<T> = Result<T, InkError>;

/// Top-level error taxonomy used by lettering and compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum InkError {
    /// Invalid or unsupported configuration value (unknown bubble style, bad page size, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid geometry or input data handed to the engine.
    #[error("validation error: {0}")]
    Validation(String),

    /// A preferred font resource could not be loaded.
    ///
    /// Font providers recover from this by falling back to the built-in font; it only escapes
    /// when a caller explicitly asks for a strict load.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// Errors raised while rasterizing or compositing.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InkError {
    /// Build an [`InkError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build an [`InkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`InkError::FontUnavailable`] value.
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build an [`InkError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`InkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
