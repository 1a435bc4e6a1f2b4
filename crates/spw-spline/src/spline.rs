//! The piecewise cubic Bezier spline: control points, per-anchor tangent
//! modes, loop handling, and the edit operations that keep them consistent.

use serde::{Deserialize, Serialize};
use spw_core::traits::Validate;
use spw_core::{Result, SplineError, Tolerance};
use spw_math::{Point3, Transform, Vector3};

use crate::bezier;
use crate::curve::Curve;
use crate::tangent::{enforce_tangent_mode, TangentMode};

/// A piecewise cubic Bezier spline.
///
/// Every group of 4 consecutive control points (overlapping by 1) forms one
/// cubic segment: curve `k` uses indices `[3k, 3k+1, 3k+2, 3k+3]`. Anchors
/// sit at indices divisible by 3 and carry one `TangentMode` each, so
/// `points.len() == 3 * curve_count + 1` and
/// `modes.len() == curve_count + 1` hold across every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BezierSpline {
    points: Vec<Point3>,
    modes: Vec<TangentMode>,
    looped: bool,
    transform: Transform,
}

impl BezierSpline {
    /// A single default curve, flat on the XZ plane.
    pub fn new() -> Self {
        Self {
            points: vec![
                Point3::new(2.0, 0.0, -2.0),
                Point3::new(3.0, 0.0, -2.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
            ],
            modes: vec![TangentMode::Free, TangentMode::Free],
            looped: false,
            transform: Transform::identity(),
        }
    }

    /// Build a spline from explicit control points and anchor modes.
    pub fn from_points(points: Vec<Point3>, modes: Vec<TangentMode>) -> Result<Self> {
        let spline = Self {
            points,
            modes,
            looped: false,
            transform: Transform::identity(),
        };
        spline.validate()?;
        Ok(spline)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    // --- Counting queries ---

    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    pub fn curve_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    pub fn anchor_count(&self) -> usize {
        self.curve_count() + 1
    }

    // --- Point and mode access ---

    pub fn get_control_point(&self, index: usize) -> Result<Point3> {
        self.check_point_index(index)?;
        Ok(self.points[index])
    }

    pub fn get_control_point_mode(&self, index: usize) -> Result<TangentMode> {
        self.check_point_index(index)?;
        Ok(self.modes[(index + 1) / 3])
    }

    /// Move a control point. Moving an anchor drags both adjacent handles
    /// by the same delta so their offsets are preserved; when looped, the
    /// coincident first/last anchor pair moves together. Re-enforces the
    /// affected anchor's tangent mode afterwards.
    pub fn set_control_point(&mut self, index: usize, point: Point3) -> Result<()> {
        self.check_point_index(index)?;
        let n = self.points.len();
        if index % 3 == 0 {
            let delta = point - self.points[index];
            if self.looped {
                if index == 0 {
                    self.points[1] += delta;
                    self.points[n - 2] += delta;
                    self.points[n - 1] = point;
                } else if index == n - 1 {
                    self.points[0] = point;
                    self.points[1] += delta;
                    self.points[index - 1] += delta;
                } else {
                    self.points[index - 1] += delta;
                    self.points[index + 1] += delta;
                }
            } else {
                if index > 0 {
                    self.points[index - 1] += delta;
                }
                if index + 1 < n {
                    self.points[index + 1] += delta;
                }
            }
        }
        self.points[index] = point;
        enforce_tangent_mode(&mut self.points, &self.modes, index, self.looped);
        self.debug_check();
        Ok(())
    }

    /// Set the tangent mode of the anchor nearest `index`. When looped, a
    /// mode change at either endpoint anchor is mirrored onto the other.
    pub fn set_control_point_mode(&mut self, index: usize, mode: TangentMode) -> Result<()> {
        self.check_point_index(index)?;
        let mode_index = (index + 1) / 3;
        self.modes[mode_index] = mode;
        if self.looped {
            let last = self.modes.len() - 1;
            if mode_index == 0 {
                self.modes[last] = mode;
            } else if mode_index == last {
                self.modes[0] = mode;
            }
        }
        enforce_tangent_mode(&mut self.points, &self.modes, index, self.looped);
        self.debug_check();
        Ok(())
    }

    // --- Loop handling ---

    pub fn is_loop(&self) -> bool {
        self.looped
    }

    /// Setting the loop flag to true identifies the first and last anchor:
    /// the last anchor snaps onto the first and takes its mode.
    pub fn set_loop(&mut self, looped: bool) -> Result<()> {
        self.looped = looped;
        if looped {
            let last = self.modes.len() - 1;
            self.modes[last] = self.modes[0];
            self.set_control_point(0, self.points[0])?;
        }
        Ok(())
    }

    // --- Geometry evaluation ---

    /// Map a global arc-fraction to (first point index of segment, local t).
    /// `t >= 1` lands on the last segment at local 1.
    fn locate(&self, t: f64) -> (usize, f64) {
        if t >= 1.0 {
            (self.points.len() - 4, 1.0)
        } else {
            let scaled = t.clamp(0.0, 1.0) * self.curve_count() as f64;
            let segment = scaled.floor() as usize;
            (segment * 3, scaled - segment as f64)
        }
    }

    /// Segment index occupied at arc-fraction `t`; the same bucketing rule
    /// the walker uses while traversing.
    pub fn curve_index_at_percentage(&self, t: f64) -> usize {
        let scaled = t.clamp(0.0, 1.0) * self.curve_count() as f64;
        (scaled.floor() as usize).min(self.curve_count() - 1)
    }

    /// Position on the spline at arc-fraction `t ∈ [0, 1]`.
    pub fn point_at(&self, t: f64, in_world_space: bool) -> Point3 {
        let (i, local_t) = self.locate(t);
        let p = bezier::cubic_point(
            self.points[i],
            self.points[i + 1],
            self.points[i + 2],
            self.points[i + 3],
            local_t,
        );
        if in_world_space {
            self.transform.transform_point(p)
        } else {
            p
        }
    }

    /// First derivative of the blend at arc-fraction `t`.
    pub fn velocity_at(&self, t: f64, in_world_space: bool) -> Vector3 {
        let (i, local_t) = self.locate(t);
        let v = bezier::cubic_derivative(
            self.points[i],
            self.points[i + 1],
            self.points[i + 2],
            self.points[i + 3],
            local_t,
        );
        if in_world_space {
            self.transform.transform_vector(v)
        } else {
            v
        }
    }

    /// Normalized world-space travel direction at arc-fraction `t`.
    pub fn direction_at(&self, t: f64) -> Vector3 {
        self.velocity_at(t, true).normalize_or_zero()
    }

    // --- Point-count-changing mutations ---

    /// Append one segment past the last anchor, extrapolating 3 placeholder
    /// points along +x. The new anchor inherits the previous last mode.
    pub fn add_curve(&mut self) {
        let mut point = self.points[self.points.len() - 1];
        for _ in 0..3 {
            point.x += 1.0;
            self.points.push(point);
        }
        let last_mode = self.modes[self.modes.len() - 1];
        self.modes.push(last_mode);
        let junction = self.points.len() - 4;
        enforce_tangent_mode(&mut self.points, &self.modes, junction, self.looped);

        if self.looped {
            let n = self.points.len();
            self.points[n - 1] = self.points[0];
            let last = self.modes.len() - 1;
            self.modes[last] = self.modes[0];
            enforce_tangent_mode(&mut self.points, &self.modes, 0, self.looped);
        }
        self.debug_check();
    }

    /// Insert a new anchor at arc-fraction `t` without moving any existing
    /// control point. The new anchor sits at `point_at(t)` with unit-length
    /// symmetric handles along the local velocity direction.
    ///
    /// This is a deliberate approximation, not a shape-preserving
    /// subdivision: the enclosing segment's curvature is replaced with a
    /// straight tangent at the insertion point.
    pub fn add_curve_at_position(&mut self, t: f64) -> Result<()> {
        if !(0.0..1.0).contains(&t) {
            return Err(SplineError::InvalidOperation(format!(
                "insertion arc-fraction must lie in [0, 1), got {t}"
            )));
        }

        // Scan cumulative segment boundaries for the insertion slot:
        // previous_index is the last untouched handle before the gap,
        // mode_index the slot for the new anchor's mode.
        let curve_count = self.curve_count();
        let mut previous_index = 1;
        let mut mode_index = 1;
        for k in 0..=curve_count {
            let boundary = k as f64 / curve_count as f64;
            mode_index = k;
            if t < boundary {
                break;
            }
            previous_index = k * 3 + 1;
        }

        let position = self.point_at(t, false);
        let direction = self.velocity_at(t, false).normalize_or_zero();
        let rear_handle = position - direction;
        let forward_handle = position + direction;

        // Grow both arrays, then shift everything after the gap right.
        self.points.extend_from_slice(&[Point3::ZERO; 3]);
        self.modes.push(TangentMode::Free);
        let n = self.points.len();
        for i in ((previous_index + 4)..n).rev() {
            self.points[i] = self.points[i - 3];
        }
        let m = self.modes.len();
        for i in ((mode_index + 1)..m).rev() {
            self.modes[i] = self.modes[i - 1];
        }

        self.points[previous_index + 1] = rear_handle;
        self.points[previous_index + 2] = position;
        self.points[previous_index + 3] = forward_handle;
        self.modes[mode_index] = TangentMode::Mirrored;
        enforce_tangent_mode(&mut self.points, &self.modes, mode_index * 3, self.looped);
        self.debug_check();
        Ok(())
    }

    /// Remove an anchor together with its adjacent handles (3 points). At
    /// the path endpoints the 3 points come off that end instead, since an
    /// endpoint anchor only has one handle. Re-closes the loop if looping.
    pub fn remove_anchor(&mut self, anchor_index: usize) -> Result<()> {
        if anchor_index >= self.anchor_count() {
            return Err(SplineError::IndexOutOfRange {
                what: "anchor",
                index: anchor_index,
                len: self.anchor_count(),
            });
        }
        if self.curve_count() == 1 {
            return Err(SplineError::InvalidOperation(
                "cannot remove the only remaining curve".into(),
            ));
        }

        let n = self.points.len();
        let removed = if anchor_index == 0 {
            0..3
        } else if anchor_index == self.anchor_count() - 1 {
            (n - 3)..n
        } else {
            let p = anchor_index * 3;
            (p - 1)..(p + 2)
        };
        self.points.drain(removed);
        self.modes.remove(anchor_index);

        if self.looped {
            self.set_loop(true)?;
        }
        self.debug_check();
        Ok(())
    }

    // --- Internal checks ---

    fn check_point_index(&self, index: usize) -> Result<()> {
        if index >= self.points.len() {
            Err(SplineError::IndexOutOfRange {
                what: "control point",
                index,
                len: self.points.len(),
            })
        } else {
            Ok(())
        }
    }

    fn debug_check(&self) {
        debug_assert!(
            self.validate().is_ok(),
            "spline invariant broken: {:?}",
            self.validate()
        );
    }
}

impl Default for BezierSpline {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for BezierSpline {
    fn validate(&self) -> Result<()> {
        if self.points.len() < 4 {
            return Err(SplineError::StructuralInvariant(format!(
                "need at least 4 control points, have {}",
                self.points.len()
            )));
        }
        if (self.points.len() - 1) % 3 != 0 {
            return Err(SplineError::StructuralInvariant(format!(
                "point count {} is not 3k+1",
                self.points.len()
            )));
        }
        if self.modes.len() != self.curve_count() + 1 {
            return Err(SplineError::StructuralInvariant(format!(
                "{} modes for {} curves",
                self.modes.len(),
                self.curve_count()
            )));
        }
        if self.looped {
            let tol = Tolerance::default();
            let first = self.points[0];
            let last = self.points[self.points.len() - 1];
            if !tol.is_zero(first.distance(last)) {
                return Err(SplineError::StructuralInvariant(
                    "looped spline endpoints do not coincide".into(),
                ));
            }
            if self.modes[0] != self.modes[self.modes.len() - 1] {
                return Err(SplineError::StructuralInvariant(
                    "looped spline endpoint modes differ".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Curve for BezierSpline {
    fn point_at(&self, t: f64) -> Point3 {
        BezierSpline::point_at(self, t, false)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        BezierSpline::velocity_at(self, t, false)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        self.looped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_spline_counts() {
        let spline = BezierSpline::new();
        assert_eq!(spline.control_point_count(), 4);
        assert_eq!(spline.curve_count(), 1);
        assert_eq!(spline.anchor_count(), 2);
        spline.validate().unwrap();
    }

    #[test]
    fn test_from_points_rejects_bad_counts() {
        let points = vec![Point3::ZERO; 5];
        let modes = vec![TangentMode::Free; 2];
        assert!(BezierSpline::from_points(points, modes).is_err());
    }

    #[test]
    fn test_point_at_world_space() {
        let mut spline = BezierSpline::new();
        spline.set_transform(Transform::from_translation(Point3::new(0.0, 10.0, 0.0)));
        let local = spline.point_at(0.0, false);
        let world = spline.point_at(0.0, true);
        assert_relative_eq!(world.y, local.y + 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_velocity_ignores_translation() {
        let mut spline = BezierSpline::new();
        let before = spline.velocity_at(0.5, true);
        spline.set_transform(Transform::from_translation(Point3::new(100.0, 0.0, 0.0)));
        let after = spline.velocity_at(0.5, true);
        assert!((before - after).length() < 1e-12);
    }

    #[test]
    fn test_anchor_move_drags_handles() {
        let mut spline = BezierSpline::new();
        let handle = spline.get_control_point(1).unwrap();
        let anchor = spline.get_control_point(0).unwrap();
        spline
            .set_control_point(0, anchor + Point3::new(0.0, 5.0, 0.0))
            .unwrap();
        let moved = spline.get_control_point(1).unwrap();
        assert!((moved - (handle + Point3::new(0.0, 5.0, 0.0))).length() < 1e-12);
    }

    #[test]
    fn test_handle_moves_independently() {
        let mut spline = BezierSpline::new();
        let anchor = spline.get_control_point(0).unwrap();
        spline
            .set_control_point(1, Point3::new(9.0, 9.0, 9.0))
            .unwrap();
        assert_eq!(spline.get_control_point(0).unwrap(), anchor);
    }

    #[test]
    fn test_out_of_range_index_rejected_without_mutation() {
        let mut spline = BezierSpline::new();
        let before = spline.clone();
        assert!(spline.set_control_point(99, Point3::ZERO).is_err());
        assert_eq!(spline.control_point_count(), before.control_point_count());
        assert!(spline.get_control_point(99).is_err());
        assert!(spline.remove_anchor(99).is_err());
    }
}
