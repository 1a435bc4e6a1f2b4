//! SplineWalk traversal: walkers that move an object along a Bezier spline
//! over simulation time, with per-segment speed, pause, and look-target
//! behavior.

pub mod descriptor;
pub mod rotation;
pub mod target;
pub mod walker;

pub use descriptor::{SegmentDescriptor, SpeedType};
pub use rotation::{RotationAxis, RotationMode};
pub use target::{TargetId, TargetRegistry};
pub use walker::{SplineWalker, WalkerEvent, WalkerState};
