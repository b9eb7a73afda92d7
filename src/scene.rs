/// Run configuration.
pub mod config;
/// Dialogue, panel and scene models.
pub mod model;
