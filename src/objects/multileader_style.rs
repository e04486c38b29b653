//! MLEADERSTYLE object
//!
//! Holds the default values for every overridable MULTILEADER attribute.
//! The render engine resolves each attribute from the style unless the
//! entity's override mask selects the entity's own value.

use crate::entities::{ContentType, LeaderType};
use crate::tables::TableEntry;
use crate::types::{encode_by_block_color, Handle, Vector3};

/// A multileader style
#[derive(Debug, Clone)]
pub struct MLeaderStyle {
    /// Unique handle
    pub handle: Handle,
    /// Style name
    pub name: String,
    /// Description
    pub description: String,
    /// Default leader line rendering type
    pub leader_type: LeaderType,
    /// Default raw leader line color
    pub leader_line_color: i32,
    /// Default leader linetype name
    pub leader_linetype: String,
    /// Default leader lineweight raw value
    pub leader_lineweight: i16,
    /// Landing enabled
    pub has_landing: bool,
    /// Gap between leader end and content
    pub landing_gap: f64,
    /// Dogleg enabled
    pub has_dogleg: bool,
    /// Dogleg length
    pub dogleg_length: f64,
    /// Arrow block name; empty selects the default arrow
    pub arrow_head_block: String,
    /// Arrow head size
    pub arrow_head_size: f64,
    /// Default content type
    pub content_type: ContentType,
    /// Text style name
    pub text_style: String,
    /// Raw text color
    pub text_color: i32,
    /// Text height before scaling
    pub char_height: f64,
    /// Draw a frame around text content
    pub has_text_frame: bool,
    /// Block name for block content
    pub block_record: String,
    /// Raw block color
    pub block_color: i32,
    /// Block scale factors
    pub block_scale: Vector3,
    /// Block rotation in radians
    pub block_rotation: f64,
    /// Overall scale factor
    pub scale: f64,
    /// Default text content
    pub default_text: String,
}

impl MLeaderStyle {
    /// Create a style with defaults matching the "Standard" style
    pub fn new(name: impl Into<String>) -> Self {
        MLeaderStyle {
            handle: Handle::NULL,
            name: name.into(),
            description: String::new(),
            leader_type: LeaderType::Straight,
            leader_line_color: encode_by_block_color(),
            leader_linetype: "ByLayer".to_string(),
            leader_lineweight: -1,
            has_landing: true,
            landing_gap: 2.0,
            has_dogleg: true,
            dogleg_length: 8.0,
            arrow_head_block: String::new(),
            arrow_head_size: 4.0,
            content_type: ContentType::MText,
            text_style: "Standard".to_string(),
            text_color: encode_by_block_color(),
            char_height: 4.0,
            has_text_frame: false,
            block_record: String::new(),
            block_color: encode_by_block_color(),
            block_scale: Vector3::new(1.0, 1.0, 1.0),
            block_rotation: 0.0,
            scale: 1.0,
            default_text: String::new(),
        }
    }

    /// Create the mandatory "Standard" style
    pub fn standard() -> Self {
        Self::new("Standard")
    }
}

impl TableEntry for MLeaderStyle {
    fn handle(&self) -> Handle {
        self.handle
    }

    fn set_handle(&mut self, handle: Handle) {
        self.handle = handle;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_defaults() {
        let style = MLeaderStyle::standard();
        assert_eq!(style.name, "Standard");
        assert_eq!(style.leader_type, LeaderType::Straight);
        assert!(style.has_dogleg);
        assert_eq!(style.dogleg_length, 8.0);
    }
}
