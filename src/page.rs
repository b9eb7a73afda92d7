/// Three-slot page compositor.
pub mod compose;
