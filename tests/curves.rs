//! Curve tool tests — subdivision, chain stitching and analytic bounding
//! boxes checked against dense sampling and randomized inputs.

use dxfcore::math::{
    bezier_to_bspline, cubic_bezier_bbox, have_bezier_curves_g1_continuity, split_bezier, Bezier,
    Bezier4P,
};
use dxfcore::types::{BoundingBox, Vector3};
use proptest::prelude::*;

fn sample_points(curve: &Bezier4P, n: usize) -> Vec<Vector3> {
    (0..=n).map(|i| curve.point(i as f64 / n as f64)).collect()
}

// ---------------------------------------------------------------------------
// Deterministic cases
// ---------------------------------------------------------------------------

#[test]
fn chained_beziers_form_one_spline() {
    // a smooth S-curve out of two cubic segments
    let c1 = Bezier4P::new([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(2.0, 3.0, 0.0),
        Vector3::new(4.0, 3.0, 0.0),
        Vector3::new(6.0, 0.0, 0.0),
    ]);
    let c2 = Bezier4P::new([
        Vector3::new(6.0, 0.0, 0.0),
        Vector3::new(8.0, -3.0, 0.0),
        Vector3::new(10.0, -3.0, 0.0),
        Vector3::new(12.0, 0.0, 0.0),
    ]);
    let chain: Vec<Bezier> = vec![c1.into(), c2.into()];
    assert!(have_bezier_curves_g1_continuity(&chain[0], &chain[1], 1e-4));

    let spline = bezier_to_bspline(&chain).unwrap();
    // the spline traces both segments over consecutive knot spans
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!(spline.point(t).isclose(&c1.point(t), 1e-9));
        assert!(spline.point(1.0 + t).isclose(&c2.point(t), 1e-9));
    }
}

#[test]
fn bbox_tighter_than_control_frame() {
    // the control frame overestimates the hull; the analytic box does not
    let curve = Bezier4P::new([
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(2.0, 8.0, 0.0),
        Vector3::new(4.0, 8.0, 0.0),
        Vector3::new(6.0, 0.0, 0.0),
    ]);
    let bbox = cubic_bezier_bbox(&curve, 1e-12);
    let max_y = bbox.max().unwrap().y;
    assert!(max_y < 8.0);
    // peak of this arch is at 3/4 of the control height
    assert!((max_y - 6.0).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Randomized properties
// ---------------------------------------------------------------------------

fn vec3() -> impl Strategy<Value = Vector3> {
    (-100.0..100.0f64, -100.0..100.0f64, -100.0..100.0f64)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

fn cubic() -> impl Strategy<Value = Bezier4P> {
    [vec3(), vec3(), vec3(), vec3()].prop_map(Bezier4P::new)
}

proptest! {
    #[test]
    fn split_halves_meet_at_curve_point(curve in cubic(), t in 0.01..0.99f64) {
        let (left, right) = split_bezier(curve.control_points(), t).unwrap();
        prop_assert_eq!(left.len(), 4);
        prop_assert_eq!(right.len(), 4);

        let at_t = curve.point(t);
        prop_assert!(left[3].isclose(&at_t, 1e-9));
        prop_assert!(right[0].isclose(&at_t, 1e-9));
        // outer endpoints are preserved exactly
        prop_assert_eq!(left[0], curve.start());
        prop_assert_eq!(right[3], curve.end());
    }

    #[test]
    fn split_halves_trace_the_original(curve in cubic(), t in 0.05..0.95f64) {
        let (left, right) = split_bezier(curve.control_points(), t).unwrap();
        let left_curve = Bezier4P::new([left[0], left[1], left[2], left[3]]);
        let right_curve = Bezier4P::new([right[0], right[1], right[2], right[3]]);

        for i in 0..=8 {
            let u = i as f64 / 8.0;
            prop_assert!(left_curve.point(u).isclose(&curve.point(u * t), 1e-8));
            prop_assert!(right_curve
                .point(u)
                .isclose(&curve.point(t + u * (1.0 - t)), 1e-8));
        }
    }

    #[test]
    fn analytic_bbox_contains_all_samples(curve in cubic()) {
        let bbox = cubic_bezier_bbox(&curve, 1e-12);
        let mut sampled = BoundingBox::new();
        for point in sample_points(&curve, 200) {
            sampled.extend(point);
        }
        // every sample lies inside the analytic box (within tolerance)
        let min = bbox.min().unwrap();
        let max = bbox.max().unwrap();
        let smin = sampled.min().unwrap();
        let smax = sampled.max().unwrap();
        let tol = 1e-7;
        prop_assert!(smin.x >= min.x - tol && smax.x <= max.x + tol);
        prop_assert!(smin.y >= min.y - tol && smax.y <= max.y + tol);
        prop_assert!(smin.z >= min.z - tol && smax.z <= max.z + tol);
        // and the box is not wider than the sampled extents by much:
        // dense sampling approaches the true extrema
        prop_assert!((min.x - smin.x).abs() < 2.0);
        prop_assert!((max.x - smax.x).abs() < 2.0);
    }

    #[test]
    fn bspline_endpoints_match_chain(a in cubic(), offset in vec3()) {
        // build a second segment continuing from the first
        let end = a.end();
        let b = Bezier4P::new([
            end,
            end + offset,
            end + offset * 2.0,
            end + offset * 3.0,
        ]);
        let spline = bezier_to_bspline(&[a.into(), b.into()]).unwrap();
        prop_assert!(spline.start().isclose(&a.start(), 1e-9));
        prop_assert!(spline.end().isclose(&b.end(), 1e-9));
    }
}
