pub mod accumulation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod renderer;
pub mod shader_source;
pub mod traits;
pub mod types;
pub mod uniforms;
pub mod window;

pub use accumulation::{AccumulationController, ParameterSnapshot};
pub use camera::{Camera, CameraPose, CameraUpdate, RotationMode};
pub use config::AppConfig;
pub use error::{Result, TracerError};
pub use uniforms::{Slot, UniformSync};
