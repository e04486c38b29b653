//! Bounding box type for geometric entities
//!
//! Unlike a plain min/max pair this type has a distinguishable "empty"
//! state: a box that never saw a point reports `has_data() == false`,
//! which is different from a degenerate single-point box.

use super::Vector3;
use std::fmt;

/// Axis-aligned 3D bounding box with an explicit empty state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    extents: Option<(Vector3, Vector3)>,
}

impl BoundingBox {
    /// Create an empty bounding box
    pub const fn new() -> Self {
        BoundingBox { extents: None }
    }

    /// Create a bounding box from explicit corner points
    pub fn from_min_max(min: Vector3, max: Vector3) -> Self {
        let mut bbox = BoundingBox::new();
        bbox.extend(min);
        bbox.extend(max);
        bbox
    }

    /// Create a bounding box containing all given points; empty for no points
    pub fn from_points(points: &[Vector3]) -> Self {
        let mut bbox = BoundingBox::new();
        for point in points {
            bbox.extend(*point);
        }
        bbox
    }

    /// Check whether the box contains any data
    pub fn has_data(&self) -> bool {
        self.extents.is_some()
    }

    /// Minimum corner, `None` for an empty box
    pub fn min(&self) -> Option<Vector3> {
        self.extents.map(|(min, _)| min)
    }

    /// Maximum corner, `None` for an empty box
    pub fn max(&self) -> Option<Vector3> {
        self.extents.map(|(_, max)| max)
    }

    /// Grow the box to include `point`
    pub fn extend(&mut self, point: Vector3) {
        match &mut self.extents {
            None => self.extents = Some((point, point)),
            Some((min, max)) => {
                min.x = min.x.min(point.x);
                min.y = min.y.min(point.y);
                min.z = min.z.min(point.z);
                max.x = max.x.max(point.x);
                max.y = max.y.max(point.y);
                max.z = max.z.max(point.z);
            }
        }
    }

    /// Grow the box to include another box; empty boxes contribute nothing
    pub fn extend_box(&mut self, other: &BoundingBox) {
        if let Some((min, max)) = other.extents {
            self.extend(min);
            self.extend(max);
        }
    }

    /// Center point, `None` for an empty box
    pub fn center(&self) -> Option<Vector3> {
        self.extents.map(|(min, max)| (min + max) * 0.5)
    }

    /// Size as (width, height, depth), `None` for an empty box
    pub fn size(&self) -> Option<Vector3> {
        self.extents.map(|(min, max)| max - min)
    }

    /// Check if this bounding box contains a point; always false when empty
    pub fn contains(&self, point: Vector3) -> bool {
        match self.extents {
            None => false,
            Some((min, max)) => {
                point.x >= min.x
                    && point.x <= max.x
                    && point.y >= min.y
                    && point.y <= max.y
                    && point.z >= min.z
                    && point.z <= max.z
            }
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.extents {
            None => write!(f, "BBox[empty]"),
            Some((min, max)) => write!(f, "BBox[{} -> {}]", min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box() {
        let bbox = BoundingBox::new();
        assert!(!bbox.has_data());
        assert!(bbox.min().is_none());
        assert!(!bbox.contains(Vector3::ZERO));
    }

    #[test]
    fn test_single_point_is_not_empty() {
        let bbox = BoundingBox::from_points(&[Vector3::new(1.0, 2.0, 3.0)]);
        assert!(bbox.has_data());
        assert_eq!(bbox.min(), bbox.max());
        assert_eq!(bbox.size(), Some(Vector3::ZERO));
    }

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points(&[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(10.0, 5.0, 3.0),
            Vector3::new(-5.0, 3.0, -2.0),
        ]);
        assert_eq!(bbox.min(), Some(Vector3::new(-5.0, 0.0, -2.0)));
        assert_eq!(bbox.max(), Some(Vector3::new(10.0, 5.0, 3.0)));
        assert_eq!(bbox.center(), Some(Vector3::new(2.5, 2.5, 0.5)));
    }

    #[test]
    fn test_extend_box() {
        let mut a = BoundingBox::from_points(&[Vector3::ZERO, Vector3::new(1.0, 1.0, 0.0)]);
        let b = BoundingBox::from_points(&[Vector3::new(5.0, -1.0, 0.0)]);
        a.extend_box(&b);
        assert_eq!(a.max(), Some(Vector3::new(5.0, 1.0, 0.0)));
        assert_eq!(a.min(), Some(Vector3::new(0.0, -1.0, 0.0)));

        // extending by an empty box changes nothing
        let before = a;
        a.extend_box(&BoundingBox::new());
        assert_eq!(a, before);
    }

    #[test]
    fn test_contains() {
        let bbox = BoundingBox::from_min_max(Vector3::ZERO, Vector3::new(10.0, 10.0, 10.0));
        assert!(bbox.contains(Vector3::new(5.0, 5.0, 5.0)));
        assert!(!bbox.contains(Vector3::new(15.0, 5.0, 5.0)));
    }
}
