//! SplineWalk editor support.
//!
//! The editor/GUI layer lives outside this workspace and talks to the
//! spline and walker crates only through their public query and mutation
//! surfaces. The pieces here are the pure-logic parts it needs: an explicit
//! configuration struct (instead of process-wide editor preferences) and
//! the click/drag input state machine every edit tool shares.

pub mod config;
pub mod gesture;

pub use config::EditorConfig;
pub use gesture::{DragGesture, GestureEvent, GestureState, MouseButton};
