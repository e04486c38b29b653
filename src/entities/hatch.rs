//! Hatch entity

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::TagWriter;
use crate::types::{BoundingBox, Vector3};

/// A closed polyline boundary path of a hatch
#[derive(Debug, Clone, Default)]
pub struct BoundaryPath {
    /// Boundary vertices
    pub vertices: Vec<Vector3>,
}

/// A hatch entity filling one or more boundary paths
///
/// All boundary paths share the single entity handle, so a hatch has no
/// one-to-one handle/extents relation.
#[derive(Debug, Clone)]
pub struct Hatch {
    /// Common entity data
    pub common: EntityCommon,
    /// Fill pattern name; "SOLID" for solid fill
    pub pattern_name: String,
    /// Solid fill flag
    pub solid_fill: bool,
    /// Boundary paths
    pub paths: Vec<BoundaryPath>,
}

impl Hatch {
    /// Create a solid-filled hatch with no boundaries
    pub fn new() -> Self {
        Hatch {
            common: EntityCommon::new(),
            pattern_name: "SOLID".to_string(),
            solid_fill: true,
            paths: Vec::new(),
        }
    }

    /// Add a closed polyline boundary
    pub fn add_polyline_path(&mut self, vertices: Vec<Vector3>) {
        self.paths.push(BoundaryPath { vertices });
    }
}

impl Default for Hatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Hatch {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "HATCH"
    }

    fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        for path in &self.paths {
            for vertex in &path.vertices {
                bbox.extend(*vertex);
            }
        }
        bbox
    }

    fn write_tags(&self, writer: &mut dyn TagWriter) -> Result<()> {
        self.common.write_tags(self.entity_type(), writer)?;
        writer.write_str(2, &self.pattern_name)?;
        writer.write_i16(70, if self.solid_fill { 1 } else { 0 })?;
        writer.write_i32(91, self.paths.len() as i32)?;
        for path in &self.paths {
            writer.write_i32(93, path.vertices.len() as i32)?;
            for vertex in &path.vertices {
                writer.write_f64(10, vertex.x)?;
                writer.write_f64(20, vertex.y)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_path_bbox() {
        let mut hatch = Hatch::new();
        hatch.add_polyline_path(vec![
            Vector3::ZERO,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        ]);
        hatch.add_polyline_path(vec![
            Vector3::new(5.0, 5.0, 0.0),
            Vector3::new(6.0, 5.0, 0.0),
            Vector3::new(6.0, 6.0, 0.0),
        ]);
        let bbox = hatch.bounding_box();
        assert_eq!(bbox.min(), Some(Vector3::ZERO));
        assert_eq!(bbox.max(), Some(Vector3::new(6.0, 6.0, 0.0)));
    }
}
