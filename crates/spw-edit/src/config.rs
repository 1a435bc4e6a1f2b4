use serde::{Deserialize, Serialize};

/// Editor preferences, passed explicitly to whichever tool needs them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Screen-space distance (pixels) within which the cursor counts as
    /// touching the spline or a control point.
    pub mouse_pixel_range: f64,
    /// Sample count used when projecting the cursor onto the spline.
    pub mouse_spline_resolution: usize,
    /// Preview polyline steps drawn per curve segment.
    pub steps_per_curve: usize,
    /// Chord deviation bound for adaptive preview tessellation.
    pub tessellation_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mouse_pixel_range: 10.0,
            mouse_spline_resolution: 300,
            steps_per_curve: 10,
            tessellation_tolerance: 1e-3,
        }
    }
}
