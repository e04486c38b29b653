//! Spline entity

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::TagWriter;
use crate::math::BSpline;
use crate::types::{BoundingBox, Vector3};

/// A NURBS curve entity
///
/// Carries either a control frame (control points + knots) or fit points
/// with optional end tangents, or both.
#[derive(Debug, Clone)]
pub struct Spline {
    /// Common entity data
    pub common: EntityCommon,
    /// Curve degree
    pub degree: i16,
    /// Closed flag
    pub closed: bool,
    /// Control points
    pub control_points: Vec<Vector3>,
    /// Knot vector
    pub knots: Vec<f64>,
    /// Fit points the curve interpolates
    pub fit_points: Vec<Vector3>,
    /// Start tangent direction for fit-point interpolation
    pub start_tangent: Option<Vector3>,
    /// End tangent direction for fit-point interpolation
    pub end_tangent: Option<Vector3>,
}

impl Spline {
    /// Create an empty cubic spline
    pub fn new() -> Self {
        Spline {
            common: EntityCommon::new(),
            degree: 3,
            closed: false,
            control_points: Vec::new(),
            knots: Vec::new(),
            fit_points: Vec::new(),
            start_tangent: None,
            end_tangent: None,
        }
    }

    /// Create a spline defined by fit points and optional end tangents
    pub fn from_fit_points(
        fit_points: Vec<Vector3>,
        start_tangent: Option<Vector3>,
        end_tangent: Option<Vector3>,
    ) -> Self {
        Spline {
            fit_points,
            start_tangent,
            end_tangent,
            ..Self::new()
        }
    }

    /// Take the control frame from a B-spline construction tool
    pub fn apply_construction_tool(&mut self, bspline: &BSpline) {
        self.degree = bspline.degree() as i16;
        self.control_points = bspline.control_points().to_vec();
        self.knots = bspline.knots().to_vec();
    }
}

impl Default for Spline {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Spline {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type(&self) -> &'static str {
        "SPLINE"
    }

    fn bounding_box(&self) -> BoundingBox {
        // the control frame is a conservative hull of the curve
        if !self.control_points.is_empty() {
            BoundingBox::from_points(&self.control_points)
        } else {
            BoundingBox::from_points(&self.fit_points)
        }
    }

    fn write_tags(&self, writer: &mut dyn TagWriter) -> Result<()> {
        self.common.write_tags(self.entity_type(), writer)?;
        let flags: i16 = if self.closed { 1 } else { 0 } | 8; // planar bit unset, clamped
        writer.write_i16(70, flags)?;
        writer.write_i16(71, self.degree)?;
        writer.write_i16(72, self.knots.len() as i16)?;
        writer.write_i16(73, self.control_points.len() as i16)?;
        writer.write_i16(74, self.fit_points.len() as i16)?;
        if let Some(tangent) = self.start_tangent {
            writer.write_point(12, tangent)?;
        }
        if let Some(tangent) = self.end_tangent {
            writer.write_point(13, tangent)?;
        }
        for knot in &self.knots {
            writer.write_f64(40, *knot)?;
        }
        for point in &self.control_points {
            writer.write_point(10, *point)?;
        }
        for point in &self.fit_points {
            writer.write_point(11, *point)?;
        }
        Ok(())
    }
}
