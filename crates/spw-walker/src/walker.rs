//! The traversal state machine: a walker advances a normalized arc-position
//! along one spline per fixed simulation step and derives a world pose from
//! the spline's evaluation functions.

use log::warn;
use serde::{Deserialize, Serialize};
use spw_core::{Result, SplineError};
use spw_math::{Point3, Vector3};
use spw_spline::BezierSpline;

use crate::descriptor::{SegmentDescriptor, SpeedType};
use crate::rotation::{heading_about_axis, look_at_euler, set_axis_angle, RotationAxis, RotationMode};
use crate::target::{TargetId, TargetRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalkerState {
    /// Not yet started.
    Idle,
    /// Advancing each tick.
    Walking,
    /// Suspended by an explicit pause.
    Paused,
    /// Suspended automatically on entering a pause-flagged segment.
    ScheduledPause,
    /// Signalled destruction after reaching the end.
    Finished,
}

/// What happened during one `advance` call that the owner of the walked
/// object may need to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerEvent {
    None,
    /// Position reached 1.0 this tick.
    ReachedEnd,
    /// Auto-reset wrapped the walker back to its start position.
    Reset,
    /// Destroy-at-end fired; the caller should remove the walked object.
    Destroyed,
}

/// Moves an object along a `BezierSpline` over time.
///
/// The walker holds no reference to its spline; callers pass it into
/// `advance` each tick, and the descriptor list is resized to the spline's
/// current curve count before stepping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplineWalker {
    state: WalkerState,
    spline_position: f64,
    initial_position: f64,

    // End-of-path behavior
    pub auto_reset: bool,
    pub destroy_at_end: bool,

    // Speed model
    pub speed_type: SpeedType,
    pub walk_speed: f64,
    pub variable_speed: bool,
    segments: Vec<SegmentDescriptor>,

    // Rotation model
    pub rotation_mode: RotationMode,
    pub rotation_axis: RotationAxis,
    pub angle_offset: f64,
    /// Global look target for constant-speed `Target` rotation.
    pub rotation_target: Option<TargetId>,

    // Scheduled pause bookkeeping
    last_curve: Option<usize>,
    pause_clock: f64,
    pause_limit: f64,

    // Derived pose
    world_position: Point3,
    euler_degrees: Vector3,
}

impl SplineWalker {
    pub fn new(spline: &BezierSpline) -> Self {
        Self {
            state: WalkerState::Idle,
            spline_position: 0.0,
            initial_position: 0.0,
            auto_reset: false,
            destroy_at_end: false,
            speed_type: SpeedType::PercentPerSecond,
            walk_speed: 0.0,
            variable_speed: false,
            segments: vec![SegmentDescriptor::default(); spline.curve_count()],
            rotation_mode: RotationMode::None,
            rotation_axis: RotationAxis::Y,
            angle_offset: 0.0,
            rotation_target: None,
            last_curve: None,
            pause_clock: 0.0,
            pause_limit: 0.0,
            world_position: spline.point_at(0.0, true),
            euler_degrees: Vector3::ZERO,
        }
    }

    // --- State queries ---

    pub fn state(&self) -> WalkerState {
        self.state
    }

    pub fn spline_position(&self) -> f64 {
        self.spline_position
    }

    pub fn current_segment_index(&self, spline: &BezierSpline) -> usize {
        spline.curve_index_at_percentage(self.spline_position)
    }

    pub fn world_position(&self) -> Point3 {
        self.world_position
    }

    pub fn orientation_euler(&self) -> Vector3 {
        self.euler_degrees
    }

    pub fn set_initial_position(&mut self, t: f64) {
        self.initial_position = t.clamp(0.0, 1.0);
    }

    // --- Explicit transitions ---

    pub fn start_walking(&mut self) {
        if self.state == WalkerState::Idle {
            self.state = WalkerState::Walking;
        }
    }

    pub fn pause_walking(&mut self) {
        if self.state == WalkerState::Walking {
            self.state = WalkerState::Paused;
        }
    }

    pub fn resume_walking(&mut self) {
        if self.state == WalkerState::Paused {
            self.state = WalkerState::Walking;
        }
    }

    /// Back to the start position, ready to walk again.
    pub fn reset(&mut self) {
        self.state = WalkerState::Idle;
        self.spline_position = self.initial_position;
        self.last_curve = None;
        self.pause_clock = 0.0;
        self.pause_limit = 0.0;
    }

    // --- Descriptor management ---

    pub fn descriptor_count(&self) -> usize {
        self.segments.len()
    }

    pub fn descriptor(&self, segment: usize) -> Result<&SegmentDescriptor> {
        self.segments
            .get(segment)
            .ok_or(SplineError::IndexOutOfRange {
                what: "segment descriptor",
                index: segment,
                len: self.segments.len(),
            })
    }

    pub fn descriptor_mut(&mut self, segment: usize) -> Result<&mut SegmentDescriptor> {
        let len = self.segments.len();
        self.segments
            .get_mut(segment)
            .ok_or(SplineError::IndexOutOfRange {
                what: "segment descriptor",
                index: segment,
                len,
            })
    }

    /// Resize the descriptor list to `curve_count`, preserving existing
    /// entries by index. New entries are default-initialized, except that
    /// the most recent known look target (if any) carries forward.
    pub fn resize_descriptors(&mut self, curve_count: usize) {
        let carried_target = self.segments.last().and_then(|d| d.rotation_target);
        let template = SegmentDescriptor {
            rotation_target: carried_target,
            ..SegmentDescriptor::default()
        };
        self.segments.resize(curve_count, template);
    }

    /// Point the walker at a (possibly different) spline: descriptors are
    /// re-sized to its curve count and traversal bookkeeping starts fresh.
    pub fn align_to_new_spline(&mut self, spline: &BezierSpline) {
        self.resize_descriptors(spline.curve_count());
        self.last_curve = None;
    }

    /// Copy one segment's descriptor onto another. An out-of-range `to`
    /// wraps to the opposite end of the list.
    pub fn duplicate_descriptor(&mut self, from: usize, to: isize) -> Result<()> {
        if from >= self.segments.len() {
            return Err(SplineError::IndexOutOfRange {
                what: "segment descriptor",
                index: from,
                len: self.segments.len(),
            });
        }
        let last = self.segments.len() as isize - 1;
        let to = if to > last {
            0
        } else if to < 0 {
            last as usize
        } else {
            to as usize
        };
        self.segments[to] = self.segments[from];
        Ok(())
    }

    pub fn duplicate_all_descriptors(&mut self, from: usize) -> Result<()> {
        for segment in 0..self.segments.len() {
            self.duplicate_descriptor(from, segment as isize)?;
        }
        Ok(())
    }

    // --- Per-tick advance ---

    /// Advance the walker by `delta_time` seconds of simulation. Call once
    /// per fixed step; no-op unless walking or inside a scheduled pause.
    pub fn advance(
        &mut self,
        spline: &BezierSpline,
        targets: &TargetRegistry,
        delta_time: f64,
    ) -> Result<WalkerEvent> {
        if self.segments.len() != spline.curve_count() {
            self.resize_descriptors(spline.curve_count());
        }
        match self.state {
            WalkerState::Walking => self.step(spline, targets, delta_time),
            WalkerState::ScheduledPause => {
                self.pause_clock += delta_time;
                if self.pause_clock >= self.pause_limit {
                    self.pause_clock = 0.0;
                    self.pause_limit = 0.0;
                    self.state = WalkerState::Walking;
                }
                Ok(WalkerEvent::None)
            }
            WalkerState::Idle | WalkerState::Paused | WalkerState::Finished => {
                Ok(WalkerEvent::None)
            }
        }
    }

    fn step(
        &mut self,
        spline: &BezierSpline,
        targets: &TargetRegistry,
        delta_time: f64,
    ) -> Result<WalkerEvent> {
        let current_curve = spline.curve_index_at_percentage(self.spline_position);
        let crossed = self
            .last_curve
            .map_or(true, |last| current_curve > last);
        self.last_curve = Some(current_curve);

        if crossed {
            if let Some(descriptor) = self.segments.get(current_curve) {
                if descriptor.pause_at_curve {
                    self.state = WalkerState::ScheduledPause;
                    self.pause_clock = 0.0;
                    self.pause_limit = descriptor.pause_time;
                    return Ok(WalkerEvent::None);
                }
            }
        }

        if self.spline_position >= 1.0 {
            return Ok(self.finish());
        }

        let fraction = self.speed_fraction(spline, current_curve)?;
        self.spline_position = (self.spline_position + delta_time * fraction).min(1.0);
        self.world_position = spline.point_at(self.spline_position, true);
        self.apply_rotation(spline, targets, current_curve);

        if self.spline_position >= 1.0 {
            Ok(WalkerEvent::ReachedEnd)
        } else {
            Ok(WalkerEvent::None)
        }
    }

    fn finish(&mut self) -> WalkerEvent {
        if self.destroy_at_end {
            self.state = WalkerState::Finished;
            WalkerEvent::Destroyed
        } else if self.auto_reset {
            self.reset();
            self.state = WalkerState::Walking;
            WalkerEvent::Reset
        } else {
            // Hold at the end; stays Walking but never moves again.
            WalkerEvent::None
        }
    }

    /// Fraction of the whole path covered per second at the current tick.
    fn speed_fraction(&self, spline: &BezierSpline, current_curve: usize) -> Result<f64> {
        let speed = if self.variable_speed {
            let index = current_curve.min(self.segments.len().saturating_sub(1));
            self.segments[index].speed
        } else {
            self.walk_speed
        };
        match self.speed_type {
            SpeedType::PercentPerSecond => Ok(speed / 100.0),
            SpeedType::TimeInterval => {
                if speed <= 0.0 {
                    return Err(SplineError::InvalidConfiguration(format!(
                        "segment time interval must be positive, got {speed}"
                    )));
                }
                Ok((1.0 / spline.curve_count() as f64) / speed)
            }
        }
    }

    fn apply_rotation(
        &mut self,
        spline: &BezierSpline,
        targets: &TargetRegistry,
        current_curve: usize,
    ) {
        match self.rotation_mode {
            RotationMode::None => {}
            RotationMode::Velocity | RotationMode::Angle => {
                let velocity = spline.velocity_at(self.spline_position, true);
                let mut angle = heading_about_axis(self.rotation_axis, velocity);
                if self.rotation_mode == RotationMode::Angle {
                    angle += self.angle_offset;
                }
                self.euler_degrees = set_axis_angle(self.euler_degrees, self.rotation_axis, angle);
            }
            RotationMode::Target => self.face_target(targets, current_curve),
        }
    }

    fn face_target(&mut self, targets: &TargetRegistry, current_curve: usize) {
        let target_id = if self.variable_speed {
            // Only a segment that declares a new target changes the
            // orientation; otherwise the previous tick's pose carries over.
            match self.segments.get(current_curve) {
                Some(descriptor) if descriptor.new_rotation_target => descriptor.rotation_target,
                Some(_) => return,
                None => return,
            }
        } else {
            self.rotation_target
        };

        let resolved = target_id.and_then(|id| targets.get(id));
        match (target_id, resolved) {
            (Some(_), Some(target)) => {
                self.euler_degrees = look_at_euler(target - self.world_position);
            }
            _ => {
                // Orientation update is skipped; traversal keeps running.
                let err = SplineError::MissingTarget(format!(
                    "segment {current_curve} has no resolvable look target"
                ));
                warn!("{err}");
            }
        }
    }

    /// Estimated seconds to traverse the whole path, including scheduled
    /// pauses in variable-speed mode. Display-only; the advance algorithm
    /// never consumes this.
    pub fn total_time(&self, spline: &BezierSpline) -> Result<f64> {
        if !self.variable_speed {
            return match self.speed_type {
                SpeedType::PercentPerSecond => {
                    if self.walk_speed <= 0.0 {
                        Err(SplineError::InvalidConfiguration(
                            "walk speed must be positive for a time estimate".into(),
                        ))
                    } else {
                        Ok(100.0 / self.walk_speed)
                    }
                }
                SpeedType::TimeInterval => Ok(self.walk_speed),
            };
        }

        let segment_percentage = 100.0 / spline.curve_count() as f64;
        let mut total = 0.0;
        for descriptor in &self.segments {
            match self.speed_type {
                SpeedType::PercentPerSecond => {
                    if descriptor.speed <= 0.0 {
                        return Err(SplineError::InvalidConfiguration(
                            "every segment speed must be positive for a time estimate".into(),
                        ));
                    }
                    total += segment_percentage / descriptor.speed;
                }
                SpeedType::TimeInterval => total += descriptor.speed,
            }
            if descriptor.pause_at_curve {
                total += descriptor.pause_time;
            }
        }
        Ok(total)
    }
}
