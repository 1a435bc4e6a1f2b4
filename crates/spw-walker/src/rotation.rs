//! Orientation math for walkers. Orientations are euler angles in degrees,
//! stored per-axis so a heading update can touch one axis and leave the
//! others as they were.

use serde::{Deserialize, Serialize};
use spw_math::Vector3;

/// How the walker orients itself while moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationMode {
    /// Orientation untouched.
    None,
    /// Face the instantaneous path tangent about the configured axis.
    Velocity,
    /// `Velocity` plus a fixed angular offset.
    Angle,
    /// Face a registered look target.
    Target,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// Heading (degrees) about `axis` for a velocity vector: the atan2 of the
/// two non-axis components taken cyclically, negated. For `Y` this is
/// `-atan2(v.z, v.x)`, the ground-plane heading.
pub fn heading_about_axis(axis: RotationAxis, velocity: Vector3) -> f64 {
    let (a, b) = match axis {
        RotationAxis::X => (velocity.y, velocity.z),
        RotationAxis::Y => (velocity.z, velocity.x),
        RotationAxis::Z => (velocity.x, velocity.y),
    };
    -a.atan2(b).to_degrees()
}

/// Replace the `axis` component of an euler triple, leaving the rest.
pub fn set_axis_angle(euler: Vector3, axis: RotationAxis, degrees: f64) -> Vector3 {
    let mut out = euler;
    match axis {
        RotationAxis::X => out.x = degrees,
        RotationAxis::Y => out.y = degrees,
        RotationAxis::Z => out.z = degrees,
    }
    out
}

/// Euler angles (pitch, yaw, 0) in degrees orienting the forward (+Z) axis
/// along `direction`.
pub fn look_at_euler(direction: Vector3) -> Vector3 {
    let yaw = direction.x.atan2(direction.z).to_degrees();
    let flat = (direction.x * direction.x + direction.z * direction.z).sqrt();
    let pitch = (-direction.y).atan2(flat).to_degrees();
    Vector3::new(pitch, yaw, 0.0)
}
