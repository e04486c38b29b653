//! Object Coordinate System (OCS) transforms
//!
//! Planar entities store their geometry in a coordinate system derived from
//! the extrusion vector by the arbitrary axis algorithm. This module maps
//! OCS coordinates back to WCS.

use crate::types::Vector3;

/// Extrusion vectors closer to the world Z axis than this are treated as +Z
const ARBITRARY_AXIS_LIMIT: f64 = 1.0 / 64.0;

/// An object coordinate system defined by an extrusion vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ocs {
    ux: Vector3,
    uy: Vector3,
    uz: Vector3,
}

impl Ocs {
    /// Build the OCS for an extrusion vector using the arbitrary axis algorithm
    pub fn new(extrusion: Vector3) -> Self {
        let uz = extrusion.normalize();
        let ux = if uz.x.abs() < ARBITRARY_AXIS_LIMIT && uz.y.abs() < ARBITRARY_AXIS_LIMIT {
            Vector3::UNIT_Y.cross(&uz).normalize()
        } else {
            Vector3::UNIT_Z.cross(&uz).normalize()
        };
        let uy = uz.cross(&ux);
        Ocs { ux, uy, uz }
    }

    /// Transform a point from OCS to WCS
    pub fn to_wcs(&self, point: Vector3) -> Vector3 {
        self.ux * point.x + self.uy * point.y + self.uz * point.z
    }

    /// Transform a point from WCS to OCS
    pub fn from_wcs(&self, point: Vector3) -> Vector3 {
        Vector3::new(
            self.ux.dot(&point),
            self.uy.dot(&point),
            self.uz.dot(&point),
        )
    }
}

/// Check whether an extrusion vector equals the world Z axis
pub fn is_world_z(extrusion: &Vector3) -> bool {
    extrusion.isclose(&Vector3::UNIT_Z, 1e-9)
}
