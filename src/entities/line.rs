//! Line entity

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::TagWriter;
use crate::types::{BoundingBox, Vector3};

/// A line entity defined by two endpoints
#[derive(Debug, Clone)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point of the line
    pub start: Vector3,
    /// End point of the line
    pub end: Vector3,
}

impl Line {
    /// Create a new line from origin to origin
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
        }
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            start,
            end,
            ..Self::new()
        }
    }

    /// Get the length of the line
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Get the direction vector (normalized)
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start).normalize()
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Line {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "LINE"
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&[self.start, self.end])
    }

    fn write_tags(&self, writer: &mut dyn TagWriter) -> Result<()> {
        self.common.write_tags(self.entity_type(), writer)?;
        writer.write_point(10, self.start)?;
        writer.write_point(11, self.end)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let line = Line::from_points(Vector3::ZERO, Vector3::new(3.0, 4.0, 0.0));
        assert_eq!(line.length(), 5.0);
    }

    #[test]
    fn test_line_bbox() {
        let line = Line::from_points(Vector3::new(2.0, -1.0, 0.0), Vector3::new(-3.0, 4.0, 1.0));
        let bbox = line.bounding_box();
        assert_eq!(bbox.min(), Some(Vector3::new(-3.0, -1.0, 0.0)));
        assert_eq!(bbox.max(), Some(Vector3::new(2.0, 4.0, 1.0)));
    }
}
