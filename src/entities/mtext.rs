//! Multi-line text entity

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::TagWriter;
use crate::types::{BoundingBox, Color, Vector3};

/// MTEXT attachment point (insertion anchor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachmentPoint {
    #[default]
    TopLeft = 1,
    TopCenter = 2,
    TopRight = 3,
    MiddleLeft = 4,
    MiddleCenter = 5,
    MiddleRight = 6,
    BottomLeft = 7,
    BottomCenter = 8,
    BottomRight = 9,
}

impl AttachmentPoint {
    /// Map a raw group code value, defaulting to top left
    pub fn from_value(value: i16) -> Self {
        match value {
            2 => AttachmentPoint::TopCenter,
            3 => AttachmentPoint::TopRight,
            4 => AttachmentPoint::MiddleLeft,
            5 => AttachmentPoint::MiddleCenter,
            6 => AttachmentPoint::MiddleRight,
            7 => AttachmentPoint::BottomLeft,
            8 => AttachmentPoint::BottomCenter,
            9 => AttachmentPoint::BottomRight,
            _ => AttachmentPoint::TopLeft,
        }
    }
}

/// Text flow direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowDirection {
    #[default]
    LeftToRight = 1,
    TopToBottom = 3,
    ByStyle = 6,
}

impl FlowDirection {
    /// Map a raw group code value, defaulting to left-to-right
    pub fn from_value(value: i16) -> Self {
        match value {
            3 => FlowDirection::TopToBottom,
            6 => FlowDirection::ByStyle,
            _ => FlowDirection::LeftToRight,
        }
    }
}

/// Line spacing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSpacingStyle {
    #[default]
    AtLeast = 1,
    Exact = 2,
}

impl LineSpacingStyle {
    /// Map a raw group code value, defaulting to at-least
    pub fn from_value(value: i16) -> Self {
        match value {
            2 => LineSpacingStyle::Exact,
            _ => LineSpacingStyle::AtLeast,
        }
    }
}

/// Background fill mode: off, explicit color, or drawing window color
pub const BG_FILL_OFF: i16 = 0;
/// Background fill with an explicit color
pub const BG_FILL_COLOR: i16 = 1;
/// Background fill with the drawing window color
pub const BG_FILL_WINDOW: i16 = 3;

/// A multi-line text entity
#[derive(Debug, Clone)]
pub struct MText {
    /// Common entity data
    pub common: EntityCommon,
    /// Insertion point
    pub insert: Vector3,
    /// Nominal character height
    pub char_height: f64,
    /// Reference rectangle width (0 = no word wrap)
    pub width: f64,
    /// Rotation angle in degrees
    pub rotation: f64,
    /// Text content with inline formatting codes
    pub text: String,
    /// Text style name
    pub style: String,
    /// X axis direction of the text plane; overrides `rotation` when set
    pub text_direction: Option<Vector3>,
    /// Extrusion vector of the text plane
    pub extrusion: Vector3,
    /// Attachment point
    pub attachment_point: AttachmentPoint,
    /// Flow direction
    pub flow_direction: FlowDirection,
    /// Line spacing style
    pub line_spacing_style: LineSpacingStyle,
    /// Line spacing factor (0.25 - 4.0)
    pub line_spacing_factor: f64,
    /// Background fill mode (`BG_FILL_OFF` / `BG_FILL_COLOR` / `BG_FILL_WINDOW`)
    pub bg_fill: i16,
    /// Background fill color
    pub bg_fill_color: Color,
    /// Background fill true color
    pub bg_fill_true_color: Option<i32>,
    /// Border size around the text as a factor of character height
    pub box_fill_scale: f64,
    /// Background fill transparency
    pub bg_fill_transparency: i32,
}

impl MText {
    /// Create an empty MTEXT at the origin
    pub fn new() -> Self {
        MText {
            common: EntityCommon::new(),
            insert: Vector3::ZERO,
            char_height: 2.5,
            width: 0.0,
            rotation: 0.0,
            text: String::new(),
            style: "Standard".to_string(),
            text_direction: None,
            extrusion: Vector3::UNIT_Z,
            attachment_point: AttachmentPoint::TopLeft,
            flow_direction: FlowDirection::LeftToRight,
            line_spacing_style: LineSpacingStyle::AtLeast,
            line_spacing_factor: 1.0,
            bg_fill: BG_FILL_OFF,
            bg_fill_color: Color::ByBlock,
            bg_fill_true_color: None,
            box_fill_scale: 1.5,
            bg_fill_transparency: 0,
        }
    }

    /// Create an MTEXT with content at a location
    pub fn with_text(text: impl Into<String>, insert: Vector3) -> Self {
        MText {
            text: text.into(),
            insert,
            ..Self::new()
        }
    }

    /// Check whether a background fill is active
    pub fn has_bg_fill(&self) -> bool {
        self.bg_fill != BG_FILL_OFF
    }
}

impl Default for MText {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for MText {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "MTEXT"
    }

    fn bounding_box(&self) -> BoundingBox {
        // text extents require font metrics; the insertion point is the
        // only reliable extent
        BoundingBox::from_points(&[self.insert])
    }

    fn write_tags(&self, writer: &mut dyn TagWriter) -> Result<()> {
        self.common.write_tags(self.entity_type(), writer)?;
        writer.write_point(10, self.insert)?;
        writer.write_f64(40, self.char_height)?;
        if self.width != 0.0 {
            writer.write_f64(41, self.width)?;
        }
        writer.write_i16(71, self.attachment_point as i16)?;
        writer.write_i16(72, self.flow_direction as i16)?;
        writer.write_str(1, &self.text)?;
        writer.write_str(7, &self.style)?;
        if let Some(direction) = self.text_direction {
            writer.write_point(11, direction)?;
        } else if self.rotation != 0.0 {
            writer.write_f64(50, self.rotation)?;
        }
        writer.write_i16(73, self.line_spacing_style as i16)?;
        writer.write_f64(44, self.line_spacing_factor)?;
        if self.bg_fill != BG_FILL_OFF {
            writer.write_i16(90, self.bg_fill)?;
            writer.write_f64(45, self.box_fill_scale)?;
            writer.write_i32(441, self.bg_fill_transparency)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_point_mapping() {
        assert_eq!(AttachmentPoint::from_value(5), AttachmentPoint::MiddleCenter);
        assert_eq!(AttachmentPoint::from_value(0), AttachmentPoint::TopLeft);
    }

    #[test]
    fn test_defaults() {
        let mtext = MText::new();
        assert_eq!(mtext.style, "Standard");
        assert!(!mtext.has_bg_fill());
        assert!(mtext.text_direction.is_none());
    }
}
