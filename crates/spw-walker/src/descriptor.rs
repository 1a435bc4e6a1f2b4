//! Per-segment walker behavior.

use serde::{Deserialize, Serialize};

use crate::target::TargetId;

/// How a speed value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedType {
    /// Percent of the whole path traversed per second.
    PercentPerSecond,
    /// Seconds to traverse one full segment.
    TimeInterval,
}

/// Behavior of the walker while it occupies one curve segment: speed
/// (meaning depends on the walker's `SpeedType`), an optional look target
/// that takes effect on entering the segment, and a scheduled pause at the
/// segment boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SegmentDescriptor {
    pub speed: f64,
    pub new_rotation_target: bool,
    pub rotation_target: Option<TargetId>,
    pub pause_at_curve: bool,
    pub pause_time: f64,
}

impl SegmentDescriptor {
    pub fn new(
        speed: f64,
        new_rotation_target: bool,
        rotation_target: Option<TargetId>,
        pause_at_curve: bool,
        pause_time: f64,
    ) -> Self {
        Self {
            speed,
            new_rotation_target,
            rotation_target,
            pause_at_curve,
            pause_time,
        }
    }
}

impl Default for SegmentDescriptor {
    fn default() -> Self {
        Self {
            speed: 0.0,
            new_rotation_target: false,
            rotation_target: None,
            pause_at_curve: false,
            pause_time: 0.0,
        }
    }
}
