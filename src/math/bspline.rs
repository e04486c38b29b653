//! Non-rational B-spline curves

use crate::error::{DxfError, Result};
use crate::types::Vector3;

/// Non-rational B-spline curve
///
/// Defined by control points, a knot vector and the order (degree + 1).
/// The knot vector must hold `control_points.len() + order` values in
/// non-decreasing order.
#[derive(Debug, Clone, PartialEq)]
pub struct BSpline {
    control_points: Vec<Vector3>,
    knots: Vec<f64>,
    order: usize,
}

impl BSpline {
    /// Create a B-spline from control points, order and a knot vector
    pub fn new(control_points: Vec<Vector3>, order: usize, knots: Vec<f64>) -> Result<Self> {
        if order < 2 {
            return Err(DxfError::InvalidArgument(format!(
                "B-spline order must be >= 2, got {}",
                order
            )));
        }
        if control_points.len() < order {
            return Err(DxfError::InvalidArgument(format!(
                "B-spline of order {} requires at least {} control points, got {}",
                order,
                order,
                control_points.len()
            )));
        }
        if knots.len() != control_points.len() + order {
            return Err(DxfError::InvalidArgument(format!(
                "knot vector length must be {}, got {}",
                control_points.len() + order,
                knots.len()
            )));
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(DxfError::InvalidArgument(
                "knot values must be non-decreasing".to_string(),
            ));
        }
        Ok(BSpline {
            control_points,
            knots,
            order,
        })
    }

    /// The control points
    pub fn control_points(&self) -> &[Vector3] {
        &self.control_points
    }

    /// The knot vector
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Curve order (degree + 1)
    pub fn order(&self) -> usize {
        self.order
    }

    /// Curve degree
    pub fn degree(&self) -> usize {
        self.order - 1
    }

    /// Maximum valid parameter value
    pub fn max_t(&self) -> f64 {
        *self.knots.last().unwrap_or(&0.0)
    }

    /// Evaluate the curve at parameter `t` by de Boor's algorithm
    ///
    /// `t` is clamped to the valid knot range.
    pub fn point(&self, t: f64) -> Vector3 {
        let p = self.degree();
        let n = self.control_points.len();
        let t = t.clamp(self.knots[p], self.knots[n]);

        // knot span index such that knots[k] <= t < knots[k+1]
        let mut k = p;
        while k < n - 1 && t >= self.knots[k + 1] {
            k += 1;
        }

        let mut d: Vec<Vector3> = (0..=p).map(|j| self.control_points[j + k - p]).collect();
        for r in 1..=p {
            for j in (r..=p).rev() {
                let i = j + k - p;
                let denom = self.knots[i + p - r + 1] - self.knots[i];
                let alpha = if denom.abs() < f64::EPSILON {
                    0.0
                } else {
                    (t - self.knots[i]) / denom
                };
                d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
            }
        }
        d[p]
    }

    /// Curve start point
    pub fn start(&self) -> Vector3 {
        self.point(self.knots[self.degree()])
    }

    /// Curve end point
    pub fn end(&self) -> Vector3 {
        self.point(self.max_t())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clamped_cubic() -> BSpline {
        BSpline::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 2.0, 0.0),
                Vector3::new(3.0, 2.0, 0.0),
                Vector3::new(4.0, 0.0, 0.0),
            ],
            4,
            vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_clamped_endpoints() {
        let spline = clamped_cubic();
        assert!(spline.start().isclose(&Vector3::new(0.0, 0.0, 0.0), 1e-12));
        assert!(spline.end().isclose(&Vector3::new(4.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_single_span_matches_bezier() {
        // a clamped cubic with one span is exactly the Bézier curve
        let spline = clamped_cubic();
        let bezier = crate::math::Bezier4P::new([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 0.0),
            Vector3::new(3.0, 2.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
        ]);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert!(spline.point(t).isclose(&bezier.point(t), 1e-9));
        }
    }

    #[test]
    fn test_invalid_knot_count() {
        let result = BSpline::new(
            vec![Vector3::ZERO; 4],
            4,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_decreasing_knots_rejected() {
        let result = BSpline::new(
            vec![Vector3::ZERO; 4],
            4,
            vec![0.0, 0.0, 0.0, 0.5, 0.4, 1.0, 1.0, 1.0],
        );
        assert!(result.is_err());
    }
}
