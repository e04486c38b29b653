//! Rendering composite entities into primitives

pub mod arrows;
pub mod mleader;

pub use mleader::{virtual_entities, RenderEngine, StyleOverride};
