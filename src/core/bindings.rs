use serde::{Deserialize, Serialize};

use crate::traits::Button;

/// Logical actions the camera and accumulation controller react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveDown,
    MoveUp,
    FovDecrease,
    FovIncrease,
    Look,
    FreezeTime,
    BouncesDecrease,
    BouncesIncrease,
    SamplesDecrease,
    SamplesIncrease,
    Quit,
}

impl Action {
    pub const COUNT: usize = 15;

    pub const ALL: [Action; Action::COUNT] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveDown,
        Action::MoveUp,
        Action::FovDecrease,
        Action::FovIncrease,
        Action::Look,
        Action::FreezeTime,
        Action::BouncesDecrease,
        Action::BouncesIncrease,
        Action::SamplesDecrease,
        Action::SamplesIncrease,
        Action::Quit,
    ];

    /// Dense index into per-action tables
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Action to button mapping, one button per action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_forward: Button,
    pub move_back: Button,
    pub move_left: Button,
    pub move_right: Button,
    pub move_down: Button,
    pub move_up: Button,
    pub fov_decrease: Button,
    pub fov_increase: Button,
    pub look: Button,
    pub freeze_time: Button,
    pub bounces_decrease: Button,
    pub bounces_increase: Button,
    pub samples_decrease: Button,
    pub samples_increase: Button,
    pub quit: Button,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_forward: Button::KeyW,
            move_back: Button::KeyS,
            move_left: Button::KeyA,
            move_right: Button::KeyD,
            move_down: Button::KeyQ,
            move_up: Button::KeyE,
            fov_decrease: Button::KeyZ,
            fov_increase: Button::KeyX,
            look: Button::MouseRight,
            freeze_time: Button::Tab,
            bounces_decrease: Button::KeyF,
            bounces_increase: Button::KeyG,
            samples_decrease: Button::KeyR,
            samples_increase: Button::KeyT,
            quit: Button::Escape,
        }
    }
}

impl KeyBindings {
    /// Button bound to an action
    pub fn button(&self, action: Action) -> Button {
        match action {
            Action::MoveForward => self.move_forward,
            Action::MoveBack => self.move_back,
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::MoveDown => self.move_down,
            Action::MoveUp => self.move_up,
            Action::FovDecrease => self.fov_decrease,
            Action::FovIncrease => self.fov_increase,
            Action::Look => self.look,
            Action::FreezeTime => self.freeze_time,
            Action::BouncesDecrease => self.bounces_decrease,
            Action::BouncesIncrease => self.bounces_increase,
            Action::SamplesDecrease => self.samples_decrease,
            Action::SamplesIncrease => self.samples_increase,
            Action::Quit => self.quit,
        }
    }

    /// One-line help text for the log
    pub fn describe(&self) -> String {
        format!(
            "move {:?}/{:?}/{:?}/{:?}, down/up {:?}/{:?}, look {:?}, freeze {:?}, \
             bounces {:?}/{:?}, samples {:?}/{:?}, fov {:?}/{:?}, quit {:?}",
            self.move_forward,
            self.move_left,
            self.move_back,
            self.move_right,
            self.move_down,
            self.move_up,
            self.look,
            self.freeze_time,
            self.bounces_decrease,
            self.bounces_increase,
            self.samples_decrease,
            self.samples_increase,
            self.fov_decrease,
            self.fov_increase,
            self.quit,
        )
    }
}
