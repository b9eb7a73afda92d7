//! Artifact sinks.
//!
//! Sinks receive finished panels and pages in scene order from `SceneRunner::run`.

/// Artifact sink trait, naming helpers and built-in sinks.
pub mod sink;
