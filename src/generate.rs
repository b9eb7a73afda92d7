//! Panel artwork sources and variant ranking.

/// Generator trait and request parameters.
pub mod backend;
/// Offline placeholder generator.
pub mod placeholder;
/// Variant scoring and selection.
pub mod scoring;
