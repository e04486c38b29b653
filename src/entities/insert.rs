//! Insert entity (block reference)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::TagWriter;
use crate::types::{BoundingBox, Vector3};

/// A block reference
#[derive(Debug, Clone)]
pub struct Insert {
    /// Common entity data
    pub common: EntityCommon,
    /// Name of the referenced block
    pub name: String,
    /// Insertion point (OCS when `extrusion` is not +Z)
    pub insert: Vector3,
    /// Scale factors
    pub scale: Vector3,
    /// Rotation angle in degrees
    pub rotation: f64,
    /// Extrusion vector
    pub extrusion: Vector3,
}

impl Insert {
    /// Create a reference to `name` at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Insert {
            common: EntityCommon::new(),
            name: name.into(),
            insert: Vector3::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: 0.0,
            extrusion: Vector3::UNIT_Z,
        }
    }

    /// Create a reference to `name` at `insert`
    pub fn at(name: impl Into<String>, insert: Vector3) -> Self {
        Insert {
            insert,
            ..Self::new(name)
        }
    }

    /// Set a uniform scale factor
    pub fn set_uniform_scale(&mut self, scale: f64) {
        self.scale = Vector3::new(scale, scale, scale);
    }
}

impl Entity for Insert {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "INSERT"
    }

    fn bounding_box(&self) -> BoundingBox {
        // expanding the referenced block needs document context
        BoundingBox::from_points(&[self.insert])
    }

    fn write_tags(&self, writer: &mut dyn TagWriter) -> Result<()> {
        self.common.write_tags(self.entity_type(), writer)?;
        writer.write_str(2, &self.name)?;
        writer.write_point(10, self.insert)?;
        if self.scale != Vector3::new(1.0, 1.0, 1.0) {
            writer.write_f64(41, self.scale.x)?;
            writer.write_f64(42, self.scale.y)?;
            writer.write_f64(43, self.scale.z)?;
        }
        if self.rotation != 0.0 {
            writer.write_f64(50, self.rotation)?;
        }
        if !self.extrusion.isclose(&Vector3::UNIT_Z, 1e-12) {
            writer.write_point(210, self.extrusion)?;
        }
        Ok(())
    }
}
