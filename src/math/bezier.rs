//! Quadratic and cubic Bézier curves
//!
//! Both curve types store their control points and evaluate in Bernstein
//! form. Parameters outside [0, 1] are accepted by `point` but describe the
//! extension of the curve, not the curve itself.

use crate::types::Vector3;

/// Quadratic Bézier curve defined by three control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bezier3P {
    control_points: [Vector3; 3],
}

impl Bezier3P {
    /// Create a quadratic Bézier curve from its control points
    pub const fn new(control_points: [Vector3; 3]) -> Self {
        Bezier3P { control_points }
    }

    /// The three control points, start and end first and last
    pub fn control_points(&self) -> &[Vector3; 3] {
        &self.control_points
    }

    /// Curve start point
    pub fn start(&self) -> Vector3 {
        self.control_points[0]
    }

    /// Curve end point
    pub fn end(&self) -> Vector3 {
        self.control_points[2]
    }

    /// Evaluate the curve at parameter `t`
    pub fn point(&self, t: f64) -> Vector3 {
        let [p0, p1, p2] = self.control_points;
        let mt = 1.0 - t;
        p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
    }

    /// The same curve with reversed parametrization
    pub fn reverse(&self) -> Bezier3P {
        let [p0, p1, p2] = self.control_points;
        Bezier3P::new([p2, p1, p0])
    }
}

/// Cubic Bézier curve defined by four control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bezier4P {
    control_points: [Vector3; 4],
}

impl Bezier4P {
    /// Create a cubic Bézier curve from its control points
    pub const fn new(control_points: [Vector3; 4]) -> Self {
        Bezier4P { control_points }
    }

    /// The four control points, start and end first and last
    pub fn control_points(&self) -> &[Vector3; 4] {
        &self.control_points
    }

    /// Curve start point
    pub fn start(&self) -> Vector3 {
        self.control_points[0]
    }

    /// Curve end point
    pub fn end(&self) -> Vector3 {
        self.control_points[3]
    }

    /// Evaluate the curve at parameter `t`
    pub fn point(&self, t: f64) -> Vector3 {
        let [p0, p1, p2, p3] = self.control_points;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        p0 * (mt2 * mt) + p1 * (3.0 * mt2 * t) + p2 * (3.0 * mt * t2) + p3 * (t2 * t)
    }

    /// The same curve with reversed parametrization
    pub fn reverse(&self) -> Bezier4P {
        let [p0, p1, p2, p3] = self.control_points;
        Bezier4P::new([p3, p2, p1, p0])
    }
}

/// A quadratic or cubic Bézier curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bezier {
    Quadratic(Bezier3P),
    Cubic(Bezier4P),
}

impl Bezier {
    /// Control points as a slice, degree-agnostic
    pub fn control_points(&self) -> &[Vector3] {
        match self {
            Bezier::Quadratic(c) => c.control_points(),
            Bezier::Cubic(c) => c.control_points(),
        }
    }

    /// Curve start point
    pub fn start(&self) -> Vector3 {
        match self {
            Bezier::Quadratic(c) => c.start(),
            Bezier::Cubic(c) => c.start(),
        }
    }

    /// Curve end point
    pub fn end(&self) -> Vector3 {
        match self {
            Bezier::Quadratic(c) => c.end(),
            Bezier::Cubic(c) => c.end(),
        }
    }

    /// Evaluate the curve at parameter `t`
    pub fn point(&self, t: f64) -> Vector3 {
        match self {
            Bezier::Quadratic(c) => c.point(t),
            Bezier::Cubic(c) => c.point(t),
        }
    }

    /// The same curve with reversed parametrization
    pub fn reverse(&self) -> Bezier {
        match self {
            Bezier::Quadratic(c) => Bezier::Quadratic(c.reverse()),
            Bezier::Cubic(c) => Bezier::Cubic(c.reverse()),
        }
    }
}

impl From<Bezier3P> for Bezier {
    fn from(curve: Bezier3P) -> Self {
        Bezier::Quadratic(curve)
    }
}

impl From<Bezier4P> for Bezier {
    fn from(curve: Bezier4P) -> Self {
        Bezier::Cubic(curve)
    }
}
