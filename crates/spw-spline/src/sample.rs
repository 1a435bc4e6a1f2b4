//! Discretization of splines into polylines, for preview rendering and
//! distance estimation by the editor collaborator.

use spw_math::Point3;

use crate::curve::Curve;
use crate::spline::BezierSpline;

/// Sample a spline into `resolution + 1` uniformly spaced points in `t`.
///
/// Returns an empty polyline for `resolution == 0`.
pub fn spline_to_polyline(spline: &BezierSpline, resolution: usize, in_world_space: bool) -> Vec<Point3> {
    let mut polyline = Vec::new();
    if resolution > 0 {
        for step in 0..=resolution {
            let t = step as f64 / resolution as f64;
            polyline.push(spline.point_at(t, in_world_space));
        }
    }
    polyline
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Convert a curve to a polyline using adaptive chord subdivision: a span
/// is split while its midpoint deviates from the chord by more than
/// `tolerance`. Output is in the curve's local space.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.point_at(t_min)];
    subdivide(curve, t_min, t_max, tolerance, &mut points, 0);
    points
}

fn subdivide(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    if depth >= MAX_DEPTH {
        points.push(curve.point_at(t1));
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let chord_mid = (curve.point_at(t0) + curve.point_at(t1)) * 0.5;
    let deviation = (curve.point_at(t_mid) - chord_mid).length();

    if deviation > tolerance {
        subdivide(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(curve.point_at(t1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spw_math::DVec3;

    #[test]
    fn test_uniform_sampling_length_and_endpoints() {
        let spline = BezierSpline::new();
        let polyline = spline_to_polyline(&spline, 10, false);
        assert_eq!(polyline.len(), 11);
        assert!((polyline[0] - spline.point_at(0.0, false)).length() < 1e-12);
        assert!((polyline[10] - spline.point_at(1.0, false)).length() < 1e-12);
    }

    #[test]
    fn test_zero_resolution_yields_empty_polyline() {
        let spline = BezierSpline::new();
        assert!(spline_to_polyline(&spline, 0, false).is_empty());
    }

    #[test]
    fn test_adaptive_polyline_on_straight_spline() {
        use crate::tangent::TangentMode;

        // Evenly spaced collinear control points: the spline is a line,
        // so no subdivision should be needed.
        let points = vec![
            DVec3::ZERO,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
        ];
        let modes = vec![TangentMode::Free, TangentMode::Free];
        let spline = BezierSpline::from_points(points, modes).unwrap();
        let polyline = curve_to_polyline(&spline, 0.01);
        assert_eq!(polyline.len(), 2);
    }

    #[test]
    fn test_adaptive_polyline_refines_curved_spline() {
        let spline = BezierSpline::new();
        let coarse = curve_to_polyline(&spline, 1.0);
        let fine = curve_to_polyline(&spline, 1e-4);
        assert!(fine.len() > coarse.len());
    }
}
