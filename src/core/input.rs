use glam::Vec2;

use super::bindings::{Action, KeyBindings};
use super::latch::{Edge, EdgeLatch};
use crate::traits::Controller;

/// Immutable per-frame view of the input devices in terms of [`Action`]s.
///
/// Built once per frame by [`InputTracker::snapshot`] and shared read-only by the
/// camera and the accumulation controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    held: [bool; Action::COUNT],
    edges: [Edge; Action::COUNT],
    pointer_delta: Vec2,
    pointer_position: Option<Vec2>,
}

impl InputState {
    /// Action is held this frame
    pub fn held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Action went from not-held to held this frame
    pub fn pressed(&self, action: Action) -> bool {
        self.edges[action.index()] == Edge::Pressed
    }

    /// Action went from held to not-held this frame
    pub fn released(&self, action: Action) -> bool {
        self.edges[action.index()] == Edge::Released
    }

    /// Pointer motion for this frame, in pixels
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    pub fn pointer_position(&self) -> Option<Vec2> {
        self.pointer_position
    }

    /// Mark an action as held without a transition
    pub fn with_held(mut self, action: Action) -> Self {
        self.held[action.index()] = true;
        self
    }

    /// Mark an action as pressed on this frame (held, with a press edge)
    pub fn with_pressed(mut self, action: Action) -> Self {
        self.held[action.index()] = true;
        self.edges[action.index()] = Edge::Pressed;
        self
    }

    /// Mark an action as released on this frame
    pub fn with_released(mut self, action: Action) -> Self {
        self.held[action.index()] = false;
        self.edges[action.index()] = Edge::Released;
        self
    }

    pub fn with_pointer_delta(mut self, delta: Vec2) -> Self {
        self.pointer_delta = delta;
        self
    }

    pub fn with_pointer_position(mut self, position: Vec2) -> Self {
        self.pointer_position = Some(position);
        self
    }
}

/// Turns raw [`Controller`] state into [`InputState`] snapshots, one latch per action
#[derive(Debug, Clone)]
pub struct InputTracker {
    bindings: KeyBindings,
    latches: [EdgeLatch; Action::COUNT],
}

impl InputTracker {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            latches: [EdgeLatch::new(); Action::COUNT],
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Sample the controller for this frame and advance every latch.
    ///
    /// Call exactly once per frame; calling twice would swallow transitions.
    pub fn snapshot(&mut self, controller: &dyn Controller) -> InputState {
        let mut state = InputState {
            pointer_delta: controller.mouse_delta(),
            pointer_position: controller.mouse_position(),
            ..InputState::default()
        };

        for action in Action::ALL {
            let held = controller.is_down(self.bindings.button(action));
            let i = action.index();
            state.held[i] = held;
            state.edges[i] = self.latches[i].update(held);
        }

        state
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
