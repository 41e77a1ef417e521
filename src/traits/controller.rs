use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    KeyF,
    KeyG,
    KeyR,
    KeyT,
    KeyZ,
    KeyX,
    Tab,
    Space,
    Shift,
    Escape,
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

/// Controller - raw device state for the current frame
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];

    /// Pointer motion accumulated since the last per-frame reset
    fn mouse_delta(&self) -> Vec2;

    /// Absolute pointer position in window pixels, if the pointer has been seen
    fn mouse_position(&self) -> Option<Vec2>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_button_hash() {
        let mut set = HashSet::new();
        set.insert(Button::KeyW);
        set.insert(Button::KeyW);
        set.insert(Button::MouseRight);

        assert!(set.contains(&Button::KeyW));
        assert!(!set.contains(&Button::KeyS));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_button_serde_names() {
        let json = serde_json::to_string(&Button::MouseRight).unwrap();
        assert_eq!(json, "\"MouseRight\"");

        let parsed: Button = serde_json::from_str("\"Tab\"").unwrap();
        assert_eq!(parsed, Button::Tab);
    }

    struct MockController {
        pressed: Vec<Button>,
        delta: Vec2,
    }

    impl Controller for MockController {
        fn is_down(&self, button: Button) -> bool {
            self.pressed.contains(&button)
        }

        fn get_down_keys(&self) -> &[Button] {
            &self.pressed
        }

        fn mouse_delta(&self) -> Vec2 {
            self.delta
        }

        fn mouse_position(&self) -> Option<Vec2> {
            None
        }
    }

    #[test]
    fn test_controller_is_down() {
        let controller = MockController {
            pressed: vec![Button::KeyW, Button::MouseRight],
            delta: Vec2::new(3.0, -1.0),
        };

        assert!(controller.is_down(Button::KeyW));
        assert!(controller.is_down(Button::MouseRight));
        assert!(!controller.is_down(Button::KeyA));
        assert_eq!(controller.get_down_keys().len(), 2);
        assert_eq!(controller.mouse_delta(), Vec2::new(3.0, -1.0));
    }
}
