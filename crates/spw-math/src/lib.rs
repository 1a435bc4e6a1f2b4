pub mod transform;

pub use glam::{DAffine3, DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
