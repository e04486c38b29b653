//! Bézier curve tools
//!
//! Subdivision, degree elevation, chain stitching into B-splines,
//! continuity testing and analytic bounding boxes.

use crate::error::{DxfError, Result};
use crate::math::{BSpline, Bezier, Bezier3P, Bezier4P};
use crate::types::{BoundingBox, Vector3};

/// Convert a quadratic Bézier curve into an exact cubic representation
///
/// The cubic traces the same point set with the same parametrization.
pub fn quadratic_to_cubic_bezier(curve: &Bezier3P) -> Bezier4P {
    let [start, control, end] = *curve.control_points();
    let control_1 = start + (control - start) * (2.0 / 3.0);
    let control_2 = end + (control - end) * (2.0 / 3.0);
    Bezier4P::new([start, control_1, control_2, end])
}

/// Convert a chain of quadratic or cubic Bézier curves into one cubic B-spline
///
/// For good results the curves must be lined up seamlessly, i.e. the starting
/// point of each curve must equal the end point of the previous curve, with
/// G1 continuity or better at the connection points.
pub fn bezier_to_bspline(curves: &[Bezier]) -> Result<BSpline> {
    if curves.is_empty() {
        return Err(DxfError::InvalidArgument(
            "one or more Bézier curves required".to_string(),
        ));
    }
    let cubic_points: Vec<[Vector3; 4]> = curves
        .iter()
        .map(|c| match c {
            Bezier::Cubic(cubic) => *cubic.control_points(),
            Bezier::Quadratic(quad) => *quadratic_to_cubic_bezier(quad).control_points(),
        })
        .collect();

    // Control points of the B-spline are those of the Bézier curves with
    // the duplicate points at the seams removed.
    let mut control_points: Vec<Vector3> = cubic_points[0].to_vec();
    for points in &cubic_points[1..] {
        control_points.extend_from_slice(&points[1..]);
    }

    // First and last knot have multiplicity 4, inner knots multiplicity 3.
    let n = cubic_points.len();
    let mut knots = vec![0.0; 4];
    for k in 1..n {
        knots.extend_from_slice(&[k as f64; 3]);
    }
    knots.extend_from_slice(&[n as f64; 4]);

    BSpline::new(control_points, 4, knots)
}

/// Check whether two adjacent Bézier curves connect with G1 continuity
///
/// Returns false when the end point of `b1` and the start point of `b2` do
/// not coincide, or when either end tangent is degenerate.
pub fn have_bezier_curves_g1_continuity(b1: &Bezier, b2: &Bezier, g1_tol: f64) -> bool {
    let p1 = b1.control_points();
    let p2 = b2.control_points();

    if !p1[p1.len() - 1].isclose(&p2[0], 1e-12) {
        return false;
    }

    let te = match (p1[p1.len() - 1] - p1[p1.len() - 2]).try_normalize() {
        Some(t) => t,
        None => return false,
    };
    let ts = match (p2[1] - p2[0]).try_normalize() {
        Some(t) => t,
        None => return false,
    };

    // 1 = same direction, -1 = opposite, 0 = perpendicular
    (te.dot(&ts) - 1.0).abs() <= g1_tol
}

/// Reverse a chain of Bézier curves
///
/// Each curve's parametrization is reversed and the chain order flipped, so
/// the result traces the same path backwards.
pub fn reverse_bezier_curves(curves: &[Bezier]) -> Vec<Bezier> {
    curves.iter().rev().map(|c| c.reverse()).collect()
}

/// Split a Bézier curve at parameter `t` by de Casteljau's algorithm
///
/// Returns the control points for two new Bézier curves of the same degree
/// as the input curve. Requires at least 2 control points and `t` in [0, 1].
pub fn split_bezier(control_points: &[Vector3], t: f64) -> Result<(Vec<Vector3>, Vec<Vector3>)> {
    if control_points.len() < 2 {
        return Err(DxfError::InvalidArgument(
            "2 or more control points required".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&t) {
        return Err(DxfError::InvalidArgument(
            "parameter `t` must be in range [0, 1]".to_string(),
        ));
    }
    let mut left: Vec<Vector3> = Vec::with_capacity(control_points.len());
    let mut right: Vec<Vector3> = Vec::with_capacity(control_points.len());

    let mut points = control_points.to_vec();
    loop {
        let n = points.len() - 1;
        left.push(points[0]);
        right.push(points[n]);
        if n == 0 {
            break;
        }
        points = (0..n)
            .map(|i| points[i] * (1.0 - t) + points[i + 1] * t)
            .collect();
    }
    Ok((left, right))
}

/// Quadratic Bézier curve through three points
///
/// The curve starts at `p1`, passes through `p2` and ends at `p3`.
pub fn quadratic_bezier_from_3p(p1: Vector3, p2: Vector3, p3: Vector3) -> Bezier3P {
    fn u_func(t: f64) -> f64 {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        mt2 / (t * t + mt2)
    }
    fn ratio(t: f64) -> f64 {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        ((t2 + mt2 - 1.0) / (t2 + mt2)).abs()
    }

    let d1 = (p1 - p2).length();
    let d2 = (p3 - p2).length();
    let t = d1 / (d1 + d2);
    let u = u_func(t);
    let c = p1 * u + p3 * (1.0 - u);
    let a = p2 + (p2 - c) / ratio(t);
    Bezier3P::new([p1, a, p3])
}

/// Cubic Bézier curve through three points
pub fn cubic_bezier_from_3p(p1: Vector3, p2: Vector3, p3: Vector3) -> Bezier4P {
    quadratic_to_cubic_bezier(&quadratic_bezier_from_3p(p1, p2, p3))
}

/// Exact bounding box of a cubic Bézier curve
///
/// Solves the roots of the derivative per axis instead of sampling. The
/// degenerate linear fallback `t = -c` is only admitted inside (0, 1);
/// values outside describe extrema beyond the curve segment.
pub fn cubic_bezier_bbox(curve: &Bezier4P, abs_tol: f64) -> BoundingBox {
    let cp = curve.control_points();
    let mut bbox = BoundingBox::from_points(&[cp[0], cp[3]]);

    let axes = [
        [cp[0].x, cp[1].x, cp[2].x, cp[3].x],
        [cp[0].y, cp[1].y, cp[2].y, cp[3].y],
        [cp[0].z, cp[1].z, cp[2].z, cp[3].z],
    ];
    for [p1, p2, p3, p4] in axes {
        let a = 3.0 * (-p1 + 3.0 * p2 - 3.0 * p3 + p4);
        let b = 6.0 * (p1 - 2.0 * p2 + p3);
        let c = 3.0 * (p2 - p1);
        if a.abs() < abs_tol {
            let t = if b.abs() < abs_tol { -c } else { -c / b };
            if 0.0 < t && t < 1.0 {
                bbox.extend(curve.point(t));
            }
            continue;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            continue;
        }
        let sqrt_d = discriminant.sqrt();
        let aa = 2.0 * a;
        let t = (-b + sqrt_d) / aa;
        if 0.0 < t && t < 1.0 {
            bbox.extend(curve.point(t));
        }
        let t = (-b - sqrt_d) / aa;
        if 0.0 < t && t < 1.0 {
            bbox.extend(curve.point(t));
        }
    }
    bbox
}

/// Exact bounding box of a quadratic Bézier curve
pub fn quadratic_bezier_bbox(curve: &Bezier3P, abs_tol: f64) -> BoundingBox {
    cubic_bezier_bbox(&quadratic_to_cubic_bezier(curve), abs_tol)
}
