//! A reusable click/drag input state machine.
//!
//! Every spline edit tool (drag-to-add, drag-to-move, right-click delete)
//! follows the same shape: a button press arms the gesture, movement past a
//! threshold turns it into a drag, release either completes the drag or
//! reports a plain click. One component, shared by all tools, keyed by the
//! button it listens to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureState {
    Idle,
    /// Button down, movement still under the drag threshold.
    Armed,
    Dragging,
}

/// What one input event amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    None,
    Clicked,
    DragStarted,
    Dragged,
    DragEnded,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DragGesture {
    button: MouseButton,
    state: GestureState,
    /// Screen-space distance (pixels) the cursor must travel before an
    /// armed press becomes a drag.
    drag_threshold: f64,
    travelled: f64,
}

impl DragGesture {
    pub fn new(button: MouseButton, drag_threshold: f64) -> Self {
        Self {
            button,
            state: GestureState::Idle,
            drag_threshold,
            travelled: 0.0,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn button(&self) -> MouseButton {
        self.button
    }

    /// Feed a button-down event.
    pub fn press(&mut self, button: MouseButton) -> GestureEvent {
        if button == self.button && self.state == GestureState::Idle {
            self.state = GestureState::Armed;
            self.travelled = 0.0;
        }
        GestureEvent::None
    }

    /// Feed cursor movement (screen-space distance since the last event).
    pub fn move_by(&mut self, distance: f64) -> GestureEvent {
        match self.state {
            GestureState::Armed => {
                self.travelled += distance;
                if self.travelled >= self.drag_threshold {
                    self.state = GestureState::Dragging;
                    GestureEvent::DragStarted
                } else {
                    GestureEvent::None
                }
            }
            GestureState::Dragging => GestureEvent::Dragged,
            GestureState::Idle => GestureEvent::None,
        }
    }

    /// Feed a button-up event.
    pub fn release(&mut self, button: MouseButton) -> GestureEvent {
        if button != self.button {
            return GestureEvent::None;
        }
        let event = match self.state {
            GestureState::Armed => GestureEvent::Clicked,
            GestureState::Dragging => GestureEvent::DragEnded,
            GestureState::Idle => GestureEvent::None,
        };
        self.state = GestureState::Idle;
        self.travelled = 0.0;
        event
    }
}
