//! CAD entity types and traits

use crate::error::Result;
use crate::io::TagWriter;
use crate::types::{BoundingBox, Color, Handle, LineWeight, Transparency};
use uuid::Uuid;

pub mod hatch;
pub mod insert;
pub mod line;
pub mod mtext;
pub mod multileader;
pub mod spline;
pub mod viewport;

pub use hatch::Hatch;
pub use insert::Insert;
pub use line::Line;
pub use mtext::{
    AttachmentPoint, FlowDirection, LineSpacingStyle, MText, BG_FILL_COLOR, BG_FILL_OFF,
    BG_FILL_WINDOW,
};
pub use multileader::{
    ArrowHeadData, BlockData, ContentType, LeaderData, LeaderLine, LeaderType, MLeaderContext,
    MTextData, MultiLeader, PropertyOverrideFlags,
};
pub use spline::Spline;
pub use viewport::Viewport;

/// Base trait for all CAD entities
pub trait Entity {
    /// Common entity data
    fn common(&self) -> &EntityCommon;

    /// Mutable common entity data
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// DXF type name of the entity
    fn entity_type(&self) -> &'static str;

    /// Bounding box of the entity; empty when no extents can be computed
    fn bounding_box(&self) -> BoundingBox;

    /// Serialize the entity as tag pairs
    fn write_tags(&self, writer: &mut dyn TagWriter) -> Result<()>;

    /// Get the entity's unique handle
    fn handle(&self) -> Handle {
        self.common().handle
    }

    /// Set the entity's handle
    fn set_handle(&mut self, handle: Handle) {
        self.common_mut().handle = handle;
    }

    /// Handle of the owning block record
    fn owner(&self) -> Handle {
        self.common().owner
    }

    /// Check if the entity lives in the active paper space
    fn is_paperspace(&self) -> bool {
        self.common().paperspace
    }

    /// Check if the entity is invisible
    fn is_invisible(&self) -> bool {
        self.common().invisible
    }

    /// Synthetic identity, stable even for handle-less entities
    fn uuid(&self) -> Uuid {
        self.common().uuid
    }
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle, `Handle::NULL` until placed in a document
    pub handle: Handle,
    /// Handle of the owning block record
    pub owner: Handle,
    /// Entity lives in the active paper space
    pub paperspace: bool,
    /// Layer name
    pub layer: String,
    /// Color
    pub color: Color,
    /// 24-bit true color, overrides `color` when set
    pub true_color: Option<i32>,
    /// Linetype name
    pub linetype: String,
    /// Line weight
    pub line_weight: LineWeight,
    /// Transparency
    pub transparency: Transparency,
    /// Visibility flag
    pub invisible: bool,
    /// Synthetic identity for handle-less (virtual) entities
    pub uuid: Uuid,
}

impl EntityCommon {
    /// Create new common entity data with defaults
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            owner: Handle::NULL,
            paperspace: false,
            layer: "0".to_string(),
            color: Color::ByLayer,
            true_color: None,
            linetype: "ByLayer".to_string(),
            line_weight: LineWeight::ByLayer,
            transparency: Transparency::ByLayer,
            invisible: false,
            uuid: Uuid::new_v4(),
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }

    /// Write the tags shared by all entities
    pub fn write_tags(&self, type_name: &str, writer: &mut dyn TagWriter) -> Result<()> {
        writer.write_tag(0, type_name)?;
        if self.handle.is_valid() {
            writer.write_handle(5, self.handle)?;
        }
        if self.owner.is_valid() {
            writer.write_handle(330, self.owner)?;
        }
        if self.paperspace {
            writer.write_i16(67, 1)?;
        }
        writer.write_str(8, &self.layer)?;
        if let Some(index) = self.color.index() {
            if self.color != Color::ByLayer {
                writer.write_i16(62, index as i16)?;
            }
        }
        if let Some(true_color) = self.true_color {
            writer.write_i32(420, true_color)?;
        }
        Ok(())
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone)]
pub enum EntityType {
    /// Line entity
    Line(Line),
    /// Multi-line text entity
    MText(MText),
    /// Insert entity (block reference)
    Insert(Insert),
    /// Spline entity
    Spline(Spline),
    /// Viewport entity (paper space viewport)
    Viewport(Viewport),
    /// Hatch entity
    Hatch(Hatch),
    /// MultiLeader entity
    MultiLeader(MultiLeader),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Spline(e) => e,
            EntityType::Viewport(e) => e,
            EntityType::Hatch(e) => e,
            EntityType::MultiLeader(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::MText(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Spline(e) => e,
            EntityType::Viewport(e) => e,
            EntityType::Hatch(e) => e,
            EntityType::MultiLeader(e) => e,
        }
    }

    /// Entity handle
    pub fn handle(&self) -> Handle {
        self.as_entity().handle()
    }

    /// DXF type name
    pub fn type_name(&self) -> &'static str {
        self.as_entity().entity_type()
    }
}

impl From<Line> for EntityType {
    fn from(e: Line) -> Self {
        EntityType::Line(e)
    }
}

impl From<MText> for EntityType {
    fn from(e: MText) -> Self {
        EntityType::MText(e)
    }
}

impl From<Insert> for EntityType {
    fn from(e: Insert) -> Self {
        EntityType::Insert(e)
    }
}

impl From<Spline> for EntityType {
    fn from(e: Spline) -> Self {
        EntityType::Spline(e)
    }
}

impl From<Viewport> for EntityType {
    fn from(e: Viewport) -> Self {
        EntityType::Viewport(e)
    }
}

impl From<Hatch> for EntityType {
    fn from(e: Hatch) -> Self {
        EntityType::Hatch(e)
    }
}

impl From<MultiLeader> for EntityType {
    fn from(e: MultiLeader) -> Self {
        EntityType::MultiLeader(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;

    #[test]
    fn test_entity_type_dispatch() {
        let entity: EntityType = Line::from_points(Vector3::ZERO, Vector3::UNIT_X).into();
        assert_eq!(entity.type_name(), "LINE");
        assert_eq!(entity.handle(), Handle::NULL);
    }

    #[test]
    fn test_common_defaults() {
        let common = EntityCommon::new();
        assert_eq!(common.layer, "0");
        assert_eq!(common.color, Color::ByLayer);
        assert!(!common.paperspace);
    }

    #[test]
    fn test_uuid_is_unique_per_entity() {
        let a = EntityCommon::new();
        let b = EntityCommon::new();
        assert_ne!(a.uuid, b.uuid);
    }
}
