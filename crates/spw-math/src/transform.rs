use crate::{DAffine3, DQuat, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Rigid placement of a spline in world space (rotation + translation).
///
/// Local-space control points and velocities are mapped through this
/// transform whenever a caller asks for world-space values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    affine: DAffine3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            affine: DAffine3::IDENTITY,
        }
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self {
            affine: DAffine3::from_translation(t),
        }
    }

    pub fn from_rotation_translation(rotation: DQuat, translation: Vector3) -> Self {
        Self {
            affine: DAffine3::from_rotation_translation(rotation, translation),
        }
    }

    pub fn translation(&self) -> Vector3 {
        self.affine.translation.into()
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.affine.transform_point3(p)
    }

    /// Rotates a vector without translating it. Velocities and tangent
    /// directions go through here, never through `transform_point`.
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.affine.transform_vector3(v)
    }

    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            affine: other.affine * self.affine,
        }
    }

    pub fn inverse(&self) -> Option<Transform> {
        if self.affine.matrix3.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Transform {
                affine: self.affine.inverse(),
            })
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::dvec3;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        let p = dvec3(1.0, 2.0, 3.0);
        let q = t.transform_point(p);
        assert_relative_eq!(q.x, p.x, epsilon = 1e-12);
        assert_relative_eq!(q.y, p.y, epsilon = 1e-12);
        assert_relative_eq!(q.z, p.z, epsilon = 1e-12);
    }

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let p = dvec3(1.0, 2.0, 3.0);
        assert!((t.transform_point(p) - dvec3(11.0, 22.0, 33.0)).length() < 1e-10);
        assert!((t.transform_vector(p) - p).length() < 1e-10);
    }

    #[test]
    fn test_rotation_of_vector() {
        let quarter = DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2);
        let t = Transform::from_rotation_translation(quarter, dvec3(5.0, 0.0, 0.0));
        let v = t.transform_vector(dvec3(1.0, 0.0, 0.0));
        assert!((v - dvec3(0.0, 0.0, -1.0)).length() < 1e-10);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::from_rotation_translation(
            DQuat::from_rotation_z(0.3),
            dvec3(10.0, 20.0, 30.0),
        );
        let inv = t.inverse().unwrap();
        let p = dvec3(1.0, 2.0, 3.0);
        let result = inv.transform_point(t.transform_point(p));
        assert!((result - p).length() < 1e-10);
    }

    #[test]
    fn test_then_composes_left_to_right() {
        let a = Transform::from_translation(dvec3(1.0, 0.0, 0.0));
        let b = Transform::from_rotation_translation(
            DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2),
            dvec3(0.0, 0.0, 0.0),
        );
        let p = dvec3(0.0, 0.0, 0.0);
        let moved = a.then(&b).transform_point(p);
        // translate first, then rotate: (1,0,0) -> (0,0,-1)
        assert!((moved - dvec3(0.0, 0.0, -1.0)).length() < 1e-10);
    }
}
