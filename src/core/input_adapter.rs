use std::collections::HashSet;
use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::traits::{Button, Controller};

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    /// Current mouse position (relative to window)
    mouse_position: Option<Vec2>,
    /// Cursor movement delta since last reset
    cursor_delta: Vec2,
    /// Raw device motion since last reset; keeps flowing while the cursor is locked
    raw_delta: Vec2,
    raw_motion_seen: bool,
}

impl WinitController {
    /// Create a new WinitController with no pressed keys
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
            mouse_position: None,
            cursor_delta: Vec2::ZERO,
            raw_delta: Vec2::ZERO,
            raw_motion_seen: false,
        }
    }

    /// Process a Winit WindowEvent the overlay may already have handled.
    ///
    /// Key state and button releases always land here, otherwise a key the
    /// overlay swallows (Tab) or a release over the overlay would stay stuck.
    /// Only a mouse press the overlay consumed is kept from the camera.
    pub fn route_event(&mut self, event: &WindowEvent, overlay_consumed: bool) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.apply_button(button, event.state, false);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.apply_button(btn, *state, overlay_consumed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                if let Some(old_pos) = self.mouse_position {
                    self.cursor_delta += new_pos - old_pos;
                }
                self.mouse_position = Some(new_pos);
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    /// Accumulate raw `DeviceEvent::MouseMotion` deltas
    pub fn accumulate_raw_delta(&mut self, dx: f64, dy: f64) {
        self.raw_delta += Vec2::new(dx as f32, dy as f32);
        self.raw_motion_seen = true;
    }

    /// Reset per-frame state (mouse deltas)
    /// Call this at the end of each frame after processing input
    pub fn reset_deltas(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.raw_delta = Vec2::ZERO;
    }

    /// Drop every held button, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
    }

    fn apply_button(&mut self, button: Button, state: ElementState, overlay_consumed: bool) {
        if overlay_consumed && state == ElementState::Pressed {
            return;
        }
        self.set_button(button, state);
    }

    fn set_button(&mut self, button: Button, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.pressed_keys.insert(button) {
                    self.pressed_vec.push(button);
                }
            }
            ElementState::Released => {
                if self.pressed_keys.remove(&button) {
                    self.pressed_vec.retain(|&b| b != button);
                }
            }
        }
    }

    /// Map Winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyW => Some(Button::KeyW),
            KeyCode::KeyA => Some(Button::KeyA),
            KeyCode::KeyS => Some(Button::KeyS),
            KeyCode::KeyD => Some(Button::KeyD),
            KeyCode::KeyQ => Some(Button::KeyQ),
            KeyCode::KeyE => Some(Button::KeyE),
            KeyCode::KeyF => Some(Button::KeyF),
            KeyCode::KeyG => Some(Button::KeyG),
            KeyCode::KeyR => Some(Button::KeyR),
            KeyCode::KeyT => Some(Button::KeyT),
            KeyCode::KeyZ => Some(Button::KeyZ),
            KeyCode::KeyX => Some(Button::KeyX),
            KeyCode::Tab => Some(Button::Tab),
            KeyCode::Space => Some(Button::Space),
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map Winit MouseButton to Button
    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            MouseButton::Middle => Some(Button::MouseMiddle),
            _ => None,
        }
    }
}

impl Default for WinitController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }

    fn mouse_delta(&self) -> Vec2 {
        if self.raw_motion_seen {
            self.raw_delta
        } else {
            self.cursor_delta
        }
    }

    fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }
}
