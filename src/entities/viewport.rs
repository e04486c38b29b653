//! Viewport entity (paper space window into model space)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::TagWriter;
use crate::types::{BoundingBox, Vector2, Vector3};

/// A paper space viewport
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Common entity data
    pub common: EntityCommon,
    /// Center of the viewport in paper space
    pub center: Vector3,
    /// Width of the viewport in paper space units
    pub width: f64,
    /// Height of the viewport in paper space units
    pub height: f64,
    /// Viewport id; 1 is the "main" viewport of a layout
    pub id: i16,
    /// Viewport status; positive = on and active
    pub status: i16,
    /// View center point in model space
    pub view_center: Vector2,
    /// Height of the model space view
    pub view_height: f64,
}

impl Viewport {
    /// Create a viewport at a location
    pub fn new(center: Vector3, width: f64, height: f64) -> Self {
        Viewport {
            common: EntityCommon::new(),
            center,
            width,
            height,
            id: 2,
            status: 1,
            view_center: Vector2::ZERO,
            view_height: height,
        }
    }

    /// Create the main viewport of a layout (id 1)
    pub fn main_viewport(center: Vector3, width: f64, height: f64) -> Self {
        Viewport {
            id: 1,
            ..Self::new(center, width, height)
        }
    }

    /// Check if this is the main viewport of its layout
    pub fn is_main_viewport(&self) -> bool {
        self.id == 1
    }
}

impl Entity for Viewport {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "VIEWPORT"
    }

    fn bounding_box(&self) -> BoundingBox {
        let half = Vector3::new(self.width * 0.5, self.height * 0.5, 0.0);
        BoundingBox::from_points(&[self.center - half, self.center + half])
    }

    fn write_tags(&self, writer: &mut dyn TagWriter) -> Result<()> {
        self.common.write_tags(self.entity_type(), writer)?;
        writer.write_point(10, self.center)?;
        writer.write_f64(40, self.width)?;
        writer.write_f64(41, self.height)?;
        writer.write_i16(68, self.status)?;
        writer.write_i16(69, self.id)?;
        writer.write_f64(12, self.view_center.x)?;
        writer.write_f64(22, self.view_center.y)?;
        writer.write_f64(45, self.view_height)?;
        Ok(())
    }
}
