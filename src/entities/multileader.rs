//! MultiLeader entity
//!
//! A MULTILEADER is a composite annotation: one content element (MTEXT or
//! a block reference) plus any number of leader lines pointing at it. All
//! geometry lives in the annotation context; the entity itself carries the
//! style reference and the per-attribute override mask.

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::TagWriter;
use crate::types::{encode_by_block_color, BoundingBox, Vector3};
use bitflags::bitflags;

bitflags! {
    /// Which MLEADERSTYLE attributes the entity overrides
    ///
    /// Bit 18 does not select an attribute; it switches the MTEXT content
    /// source and is always read from the flags themselves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PropertyOverrideFlags: u32 {
        const LEADER_TYPE = 1 << 0;
        const LEADER_LINE_COLOR = 1 << 1;
        const LEADER_LINETYPE = 1 << 2;
        const LEADER_LINEWEIGHT = 1 << 3;
        const HAS_LANDING = 1 << 4;
        const LANDING_GAP = 1 << 5;
        const HAS_DOGLEG = 1 << 6;
        const DOGLEG_LENGTH = 1 << 7;
        const ARROW_HEAD_BLOCK = 1 << 8;
        const ARROW_HEAD_SIZE = 1 << 9;
        const CONTENT_TYPE = 1 << 10;
        const TEXT_STYLE = 1 << 11;
        const TEXT_LEFT_ATTACHMENT = 1 << 12;
        const TEXT_ANGLE_TYPE = 1 << 13;
        const TEXT_ALIGNMENT_TYPE = 1 << 14;
        const TEXT_COLOR = 1 << 15;
        const CHAR_HEIGHT = 1 << 16;
        const HAS_TEXT_FRAME = 1 << 17;
        const USE_MTEXT_DEFAULT_CONTENT = 1 << 18;
        const BLOCK_RECORD = 1 << 19;
        const BLOCK_COLOR = 1 << 20;
        const BLOCK_SCALE = 1 << 21;
        const BLOCK_ROTATION = 1 << 22;
        const BLOCK_CONNECTION_TYPE = 1 << 23;
        const SCALE = 1 << 24;
        const TEXT_RIGHT_ATTACHMENT = 1 << 25;
        const TEXT_SWITCH_ALIGNMENT = 1 << 26;
        const TEXT_ATTACHMENT_DIRECTION = 1 << 27;
        const TEXT_TOP_ATTACHMENT = 1 << 28;
        const TEXT_BOTTOM_ATTACHMENT = 1 << 29;
    }
}

/// How leader lines are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderType {
    /// Invisible leader lines
    None = 0,
    /// Straight line segments
    #[default]
    Straight = 1,
    /// A single fitted spline per leader line
    Spline = 2,
}

impl LeaderType {
    /// Map a raw group code value, defaulting to straight segments
    pub fn from_value(value: i16) -> Self {
        match value {
            0 => LeaderType::None,
            2 => LeaderType::Spline,
            _ => LeaderType::Straight,
        }
    }
}

/// Content carried by a MULTILEADER
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    None = 0,
    Block = 1,
    MText = 2,
}

/// One polyline of leader vertices
#[derive(Debug, Clone)]
pub struct LeaderLine {
    /// Line index within its leader
    pub index: i32,
    /// Vertices from the arrow end towards the content
    pub vertices: Vec<Vector3>,
    /// Raw color override for this line
    pub color: i32,
}

impl LeaderLine {
    /// Create a leader line from its vertices
    pub fn new(vertices: Vec<Vector3>) -> Self {
        LeaderLine {
            index: 0,
            vertices,
            color: encode_by_block_color(),
        }
    }
}

/// A leader: one or more leader lines converging on a connection point
#[derive(Debug, Clone)]
pub struct LeaderData {
    /// Leader index
    pub index: i32,
    /// The leader lines
    pub lines: Vec<LeaderLine>,
    /// Connection point where the lines meet the content side
    pub last_leader_point: Vector3,
    /// A stored dogleg direction is present
    pub has_dogleg_vector: bool,
    /// Dogleg direction (not necessarily normalized)
    pub dogleg_vector: Vector3,
    /// Dogleg length in drawing units
    pub dogleg_length: f64,
    /// 0 = horizontal, 1 = vertical content attachment
    pub attachment_direction: i16,
}

impl LeaderData {
    /// Create an empty leader ending at `last_leader_point`
    pub fn new(last_leader_point: Vector3) -> Self {
        LeaderData {
            index: 0,
            lines: Vec::new(),
            last_leader_point,
            has_dogleg_vector: false,
            dogleg_vector: Vector3::UNIT_X,
            dogleg_length: 8.0,
            attachment_direction: 0,
        }
    }
}

/// MTEXT content stored in the annotation context
#[derive(Debug, Clone)]
pub struct MTextData {
    /// Text content
    pub default_content: String,
    /// Insertion point
    pub insert: Vector3,
    /// Text style name
    pub style: String,
    /// Extrusion vector of the text plane
    pub extrusion: Vector3,
    /// X axis direction of the text plane
    pub text_direction: Vector3,
    /// Rotation in radians; redundant with `text_direction`
    pub rotation: f64,
    /// Unscaled column width
    pub width: f64,
    /// Line spacing factor
    pub line_spacing_factor: f64,
    /// Line spacing style group code value
    pub line_spacing_style: i16,
    /// Flow direction group code value
    pub flow_direction: i16,
    /// Attachment point (1 = top left, 2 = top center, 3 = top right, ...)
    pub alignment: i16,
    /// Raw text color
    pub color: i32,
    /// Background fill active
    pub has_bg_fill: bool,
    /// Use the drawing window color for the fill
    pub use_window_bg_color: bool,
    /// Raw background fill color
    pub bg_color: i32,
    /// Background border factor relative to char height
    pub bg_scale_factor: f64,
    /// Background fill transparency
    pub bg_transparency: i32,
}

impl MTextData {
    /// Create MTEXT content data with defaults
    pub fn new(content: impl Into<String>, insert: Vector3) -> Self {
        MTextData {
            default_content: content.into(),
            insert,
            style: "Standard".to_string(),
            extrusion: Vector3::UNIT_Z,
            text_direction: Vector3::UNIT_X,
            rotation: 0.0,
            width: 0.0,
            line_spacing_factor: 1.0,
            line_spacing_style: 1,
            flow_direction: 1,
            alignment: 1,
            color: encode_by_block_color(),
            has_bg_fill: false,
            use_window_bg_color: false,
            bg_color: encode_by_block_color(),
            bg_scale_factor: 1.5,
            bg_transparency: 0,
        }
    }
}

/// Block content stored in the annotation context
#[derive(Debug, Clone)]
pub struct BlockData {
    /// Name of the content block
    pub name: String,
    /// Insertion point
    pub insert: Vector3,
    /// Extrusion vector
    pub extrusion: Vector3,
    /// Scale factors
    pub scale: Vector3,
    /// Rotation in radians
    pub rotation: f64,
    /// Raw block color
    pub color: i32,
}

impl BlockData {
    /// Create block content data with defaults
    pub fn new(name: impl Into<String>, insert: Vector3) -> Self {
        BlockData {
            name: name.into(),
            insert,
            extrusion: Vector3::UNIT_Z,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            color: encode_by_block_color(),
        }
    }
}

/// Arrow head assignment by leader line index
#[derive(Debug, Clone)]
pub struct ArrowHeadData {
    /// Leader line index this arrow applies to
    pub index: i32,
    /// Arrow block name; empty selects the default arrow
    pub block_name: String,
}

/// The annotation context: all final, scaled geometry of the entity
#[derive(Debug, Clone)]
pub struct MLeaderContext {
    /// Overall scale applied to the content
    pub scale: f64,
    /// Base point of the content plane
    pub base_point: Vector3,
    /// Final (already scaled) character height
    pub char_height: f64,
    /// Final arrow head size
    pub arrow_head_size: f64,
    /// Gap between leader end and content
    pub landing_gap: f64,
    /// Origin of the content plane
    pub plane_origin: Vector3,
    /// Normal of the content plane
    pub plane_z_axis: Vector3,
    /// MTEXT content, if any
    pub mtext: Option<MTextData>,
    /// Block content, if any
    pub block: Option<BlockData>,
    /// The leaders
    pub leaders: Vec<LeaderData>,
}

impl MLeaderContext {
    /// Create an empty context with scale 1
    pub fn new() -> Self {
        MLeaderContext {
            scale: 1.0,
            base_point: Vector3::ZERO,
            char_height: 2.5,
            arrow_head_size: 2.5,
            landing_gap: 2.0,
            plane_origin: Vector3::ZERO,
            plane_z_axis: Vector3::UNIT_Z,
            mtext: None,
            block: None,
            leaders: Vec::new(),
        }
    }

    /// Insertion point of the content, falling back to the plane origin
    pub fn insert(&self) -> Vector3 {
        if let Some(mtext) = &self.mtext {
            mtext.insert
        } else if let Some(block) = &self.block {
            block.insert
        } else {
            self.plane_origin
        }
    }

    /// Extrusion of the content, falling back to the plane normal
    pub fn extrusion(&self) -> Vector3 {
        if let Some(mtext) = &self.mtext {
            mtext.extrusion
        } else if let Some(block) = &self.block {
            block.extrusion
        } else {
            self.plane_z_axis
        }
    }
}

impl Default for MLeaderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A MULTILEADER entity
#[derive(Debug, Clone)]
pub struct MultiLeader {
    /// Common entity data
    pub common: EntityCommon,
    /// MLEADERSTYLE name
    pub style: String,
    /// Which style attributes this entity overrides
    pub property_override_flags: PropertyOverrideFlags,
    /// Leader line rendering type
    pub leader_type: LeaderType,
    /// Raw leader line color
    pub leader_line_color: i32,
    /// Leader linetype name
    pub leader_linetype: String,
    /// Leader lineweight raw value
    pub leader_lineweight: i16,
    /// Landing (dogleg) enabled
    pub has_landing: bool,
    /// Dogleg enabled
    pub has_dogleg: bool,
    /// Dogleg length
    pub dogleg_length: f64,
    /// Arrow block name; empty selects the default arrow
    pub arrow_head_block: String,
    /// Arrow head size
    pub arrow_head_size: f64,
    /// Content type
    pub content_type: ContentType,
    /// Text style name for MTEXT content
    pub text_style: String,
    /// Raw text color
    pub text_color: i32,
    /// Draw a frame around the text content
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
    /// Arrow head assignments per leader line index
    pub arrow_heads: Vec<ArrowHeadData>,
    /// The annotation context holding all geometry
    pub context: MLeaderContext,
}

impl MultiLeader {
    /// Create an empty MULTILEADER referencing the "Standard" style
    pub fn new() -> Self {
        MultiLeader {
            common: EntityCommon::new(),
            style: "Standard".to_string(),
            property_override_flags: PropertyOverrideFlags::empty(),
            leader_type: LeaderType::Straight,
            leader_line_color: encode_by_block_color(),
            leader_linetype: "ByLayer".to_string(),
            leader_lineweight: -1,
            has_landing: true,
            has_dogleg: true,
            dogleg_length: 8.0,
            arrow_head_block: String::new(),
            arrow_head_size: 4.0,
            content_type: ContentType::MText,
            text_style: "Standard".to_string(),
            text_color: encode_by_block_color(),
            has_text_frame: false,
            block_record: String::new(),
            block_color: encode_by_block_color(),
            block_scale: Vector3::new(1.0, 1.0, 1.0),
            block_rotation: 0.0,
            scale: 1.0,
            arrow_heads: Vec::new(),
            context: MLeaderContext::new(),
        }
    }

    /// Arrow block name assigned to a leader line index, if any
    pub fn arrow_head(&self, index: i32) -> Option<&str> {
        self.arrow_heads
            .iter()
            .find(|head| head.index == index)
            .map(|head| head.block_name.as_str())
            .filter(|name| !name.is_empty())
    }
}

impl Default for MultiLeader {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for MultiLeader {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "MULTILEADER"
    }

    fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        for leader in &self.context.leaders {
            bbox.extend(leader.last_leader_point);
            for line in &leader.lines {
                for vertex in &line.vertices {
                    bbox.extend(*vertex);
                }
            }
        }
        if self.context.mtext.is_some() || self.context.block.is_some() {
            bbox.extend(self.context.insert());
        }
        bbox
    }

    fn write_tags(&self, writer: &mut dyn TagWriter) -> Result<()> {
        self.common.write_tags(self.entity_type(), writer)?;
        writer.write_str(3, &self.style)?;
        writer.write_i32(90, self.property_override_flags.bits() as i32)?;
        writer.write_i16(170, self.leader_type as i16)?;
        writer.write_i32(91, self.leader_line_color)?;
        writer.write_f64(41, self.context.scale)?;
        writer.write_f64(42, self.context.char_height)?;
        writer.write_f64(140, self.context.arrow_head_size)?;
        writer.write_i16(172, self.content_type as i16)?;
        Ok(())
    }
}
