//! Color representation for CAD entities
//!
//! Two encodings exist side by side: the classic AutoCAD Color Index (ACI)
//! plus the by-layer/by-block markers, and the 32-bit "raw color" integers
//! used inside MULTILEADER data, which carry a type byte in bits 24-31.

use std::fmt;

/// Represents an entity color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Color by layer (index 256)
    #[default]
    ByLayer,
    /// Color by block (index 0)
    ByBlock,
    /// AutoCAD Color Index (1-255)
    Index(u8),
    /// True color with RGB values
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Create a color from an AutoCAD Color Index
    pub fn from_index(index: i16) -> Self {
        match index {
            0 => Color::ByBlock,
            256 => Color::ByLayer,
            1..=255 => Color::Index(index as u8),
            _ => Color::Index(7), // default to white
        }
    }

    /// Create a true color from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Get the color index (if applicable)
    pub fn index(&self) -> Option<u16> {
        match self {
            Color::ByBlock => Some(0),
            Color::Index(i) => Some(*i as u16),
            Color::ByLayer => Some(256),
            Color::Rgb { .. } => None,
        }
    }

    /// Get RGB values (if applicable)
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Rgb { r, g, b } => Some((*r, *g, *b)),
            _ => None,
        }
    }

    pub const RED: Color = Color::Index(1);
    pub const YELLOW: Color = Color::Index(2);
    pub const GREEN: Color = Color::Index(3);
    pub const CYAN: Color = Color::Index(4);
    pub const BLUE: Color = Color::Index(5);
    pub const MAGENTA: Color = Color::Index(6);
    pub const WHITE: Color = Color::Index(7);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::ByLayer => write!(f, "ByLayer"),
            Color::ByBlock => write!(f, "ByBlock"),
            Color::Index(i) => write!(f, "Index({})", i),
            Color::Rgb { r, g, b } => write!(f, "RGB({}, {}, {})", r, g, b),
        }
    }
}

// ============================================================================
// Raw color integers
// ============================================================================

/// Type byte of a 32-bit raw color value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawColorType {
    /// Color inherited from the layer
    ByLayer,
    /// Color inherited from the block
    ByBlock,
    /// 24-bit true color
    Rgb,
    /// AutoCAD Color Index
    Aci,
    /// Window background color; not a valid entity color
    WindowBackground,
}

const COLOR_TYPE_BY_LAYER: u32 = 0xC0;
const COLOR_TYPE_BY_BLOCK: u32 = 0xC1;
const COLOR_TYPE_RGB: u32 = 0xC2;
const COLOR_TYPE_ACI: u32 = 0xC3;
const COLOR_TYPE_WINDOW_BG: u32 = 0xC8;

/// ACI value for "by block"
pub const BYBLOCK: i16 = 0;
/// ACI value for "by layer"
pub const BYLAYER: i16 = 256;

/// Decode a raw color integer into its type and payload
///
/// Unknown type bytes are treated as ACI values, which matches how CAD
/// applications tolerate garbage in these fields.
pub fn decode_raw_color(raw: i32) -> (RawColorType, i32) {
    let flags = ((raw as u32) >> 24) & 0xFF;
    match flags {
        COLOR_TYPE_BY_LAYER => (RawColorType::ByLayer, BYLAYER as i32),
        COLOR_TYPE_BY_BLOCK => (RawColorType::ByBlock, BYBLOCK as i32),
        COLOR_TYPE_RGB => (RawColorType::Rgb, raw & 0xFFFFFF),
        COLOR_TYPE_WINDOW_BG => (RawColorType::WindowBackground, 0),
        _ => (RawColorType::Aci, raw & 0xFF),
    }
}

/// Encode an ACI raw color value (type byte 0xC3)
pub fn encode_aci_color(aci: i16) -> i32 {
    ((COLOR_TYPE_ACI << 24) as i32) | (aci as i32 & 0xFF)
}

/// Encode an RGB raw color value (type byte 0xC2)
pub fn encode_rgb_color(r: u8, g: u8, b: u8) -> i32 {
    ((COLOR_TYPE_RGB << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32) as i32
}

/// Encode the by-block raw color value
pub fn encode_by_block_color() -> i32 {
    (COLOR_TYPE_BY_BLOCK << 24) as i32
}

/// Encode the window-background raw color value
pub fn encode_window_bg_color() -> i32 {
    (COLOR_TYPE_WINDOW_BG << 24) as i32
}

/// Split a raw color into an entity color and an optional true color
///
/// The returned ACI color defaults to by-block; the window-background
/// source is not representable as an entity color and yields the default.
pub fn raw_color_to_entity_color(raw: i32) -> (Color, Option<i32>) {
    match decode_raw_color(raw) {
        (RawColorType::ByLayer, _) => (Color::ByLayer, None),
        (RawColorType::ByBlock, _) => (Color::ByBlock, None),
        (RawColorType::Aci, aci) => (Color::from_index(aci as i16), None),
        (RawColorType::Rgb, rgb) => (Color::ByBlock, Some(rgb)),
        (RawColorType::WindowBackground, _) => (Color::ByBlock, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_index() {
        assert_eq!(Color::from_index(0), Color::ByBlock);
        assert_eq!(Color::from_index(256), Color::ByLayer);
        assert_eq!(Color::from_index(3), Color::Index(3));
    }

    #[test]
    fn test_decode_aci() {
        let raw = encode_aci_color(5);
        assert_eq!(decode_raw_color(raw), (RawColorType::Aci, 5));
        assert_eq!(raw_color_to_entity_color(raw), (Color::BLUE, None));
    }

    #[test]
    fn test_decode_rgb() {
        let raw = encode_rgb_color(0x12, 0x34, 0x56);
        assert_eq!(decode_raw_color(raw), (RawColorType::Rgb, 0x123456));
        let (aci, true_color) = raw_color_to_entity_color(raw);
        assert_eq!(aci, Color::ByBlock);
        assert_eq!(true_color, Some(0x123456));
    }

    #[test]
    fn test_decode_by_block() {
        let raw = encode_by_block_color();
        assert_eq!(decode_raw_color(raw).0, RawColorType::ByBlock);
    }

    #[test]
    fn test_decode_window_bg() {
        let raw = encode_window_bg_color();
        assert_eq!(decode_raw_color(raw).0, RawColorType::WindowBackground);
        // falls back to the default entity color
        assert_eq!(raw_color_to_entity_color(raw), (Color::ByBlock, None));
    }
}
