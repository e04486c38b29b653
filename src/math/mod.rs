//! Curve mathematics and coordinate transforms

mod bezier;
mod bspline;
pub mod curvetools;
mod ocs;

pub use bezier::{Bezier, Bezier3P, Bezier4P};
pub use bspline::BSpline;
pub use curvetools::{
    bezier_to_bspline, cubic_bezier_bbox, cubic_bezier_from_3p, have_bezier_curves_g1_continuity,
    quadratic_bezier_bbox, quadratic_bezier_from_3p, quadratic_to_cubic_bezier,
    reverse_bezier_curves, split_bezier,
};
pub use ocs::{is_world_z, Ocs};
