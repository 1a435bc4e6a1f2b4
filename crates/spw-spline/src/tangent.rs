//! Per-anchor tangent modes and the enforcement rule that keeps an
//! anchor's two handles consistent with its mode.

use serde::{Deserialize, Serialize};
use spw_math::Point3;

/// Policy relating the two handles adjacent to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TangentMode {
    /// Handles move independently.
    Free,
    /// Handles are collinear through the anchor but keep their own lengths.
    Aligned,
    /// The outgoing handle is the exact negation of the incoming handle.
    Mirrored,
}

/// Re-enforce the tangent mode of the anchor nearest `index` after the
/// point at `index` moved (or after that anchor's mode changed).
///
/// The handle on the side of `index` is held fixed; the opposite handle is
/// repositioned. No-op for `Free` anchors and for the endpoints of a
/// non-looped path. Handle indices wrap modulo the point count when
/// `looped`, so enforcement at the shared first/last anchor reaches across
/// the seam.
pub fn enforce_tangent_mode(
    points: &mut [Point3],
    modes: &[TangentMode],
    index: usize,
    looped: bool,
) {
    let mode_index = (index + 1) / 3;
    let mode = modes[mode_index];
    if mode == TangentMode::Free {
        return;
    }
    if !looped && (mode_index == 0 || mode_index == modes.len() - 1) {
        return;
    }

    let n = points.len();
    let middle_index = mode_index * 3;

    // The handle on the edited side stays put; the opposite one is enforced.
    let (fixed_index, enforced_index) = if index <= middle_index {
        (
            if middle_index == 0 { n - 2 } else { middle_index - 1 },
            if middle_index + 1 >= n { 1 } else { middle_index + 1 },
        )
    } else {
        (
            if middle_index + 1 >= n { 1 } else { middle_index + 1 },
            if middle_index == 0 { n - 2 } else { middle_index - 1 },
        )
    };

    let middle = points[middle_index];
    let mut tangent = middle - points[fixed_index];
    if mode == TangentMode::Aligned {
        // Force collinearity but preserve the enforced handle's length.
        tangent = tangent.normalize_or_zero() * middle.distance(points[enforced_index]);
    }
    points[enforced_index] = middle + tangent;
}
