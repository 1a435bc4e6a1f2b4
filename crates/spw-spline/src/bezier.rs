//! Cubic Bezier blend evaluation on a single 4-point segment.

use spw_math::{Point3, Vector3};

/// Evaluate the cubic Bernstein blend
/// `(1-t)^3 P0 + 3(1-t)^2 t P1 + 3(1-t) t^2 P2 + t^3 P3`
/// at `t`, clamped to `[0, 1]`.
pub fn cubic_point(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Point3 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// First derivative of the cubic blend with respect to `t`:
/// `3(1-t)^2 (P1-P0) + 6(1-t)t (P2-P1) + 3t^2 (P3-P2)`.
pub fn cubic_derivative(p0: Point3, p1: Point3, p2: Point3, p3: Point3, t: f64) -> Vector3 {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    3.0 * u * u * (p1 - p0) + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spw_math::DVec3;

    #[test]
    fn test_cubic_interpolates_endpoints() {
        let p0 = DVec3::new(1.0, 2.0, 3.0);
        let p1 = DVec3::new(2.0, 5.0, 3.0);
        let p2 = DVec3::new(4.0, 5.0, 1.0);
        let p3 = DVec3::new(6.0, 2.0, 0.0);
        assert!((cubic_point(p0, p1, p2, p3, 0.0) - p0).length() < 1e-12);
        assert!((cubic_point(p0, p1, p2, p3, 1.0) - p3).length() < 1e-12);
    }

    #[test]
    fn test_cubic_midpoint_of_straight_segment() {
        // Control points evenly spaced on a line: the blend is the line itself.
        let p0 = DVec3::ZERO;
        let p1 = DVec3::new(1.0, 0.0, 0.0);
        let p2 = DVec3::new(2.0, 0.0, 0.0);
        let p3 = DVec3::new(3.0, 0.0, 0.0);
        let mid = cubic_point(p0, p1, p2, p3, 0.5);
        assert!((mid - DVec3::new(1.5, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_derivative_of_straight_segment_is_constant() {
        let p0 = DVec3::ZERO;
        let p1 = DVec3::new(1.0, 0.0, 0.0);
        let p2 = DVec3::new(2.0, 0.0, 0.0);
        let p3 = DVec3::new(3.0, 0.0, 0.0);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let d = cubic_derivative(p0, p1, p2, p3, t);
            assert!((d - DVec3::new(3.0, 0.0, 0.0)).length() < 1e-12);
        }
    }

    #[test]
    fn test_parameter_clamped() {
        let p0 = DVec3::ZERO;
        let p3 = DVec3::X;
        let inside = cubic_point(p0, p0, p3, p3, 1.0);
        let outside = cubic_point(p0, p0, p3, p3, 2.5);
        assert!((inside - outside).length() < 1e-12);
    }
}
