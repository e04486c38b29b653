//! Core value types shared across the document model

mod bounds;
mod color;
mod handle;
mod line_weight;
mod vector;

pub use bounds::BoundingBox;
pub use color::{
    decode_raw_color, encode_aci_color, encode_by_block_color, encode_rgb_color,
    encode_window_bg_color, raw_color_to_entity_color, Color, RawColorType, BYBLOCK, BYLAYER,
};
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::{Vector2, Vector3};

/// Transparency of an entity (0 = opaque, 90 = 90% transparent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transparency {
    /// Use the layer's transparency
    #[default]
    ByLayer,
    /// Use the block's transparency
    ByBlock,
    /// Explicit transparency percentage (0-90)
    Value(u8),
}
