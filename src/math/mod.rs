mod basis;
mod projection;
mod rotation;

pub use basis::{right_of, WORLD_UP};
pub use projection::{perspective, pixel_to_ndc, project_direction, unproject_direction};
pub use rotation::{compose_pitch_yaw, constrained_pitch_yaw, rotate};
