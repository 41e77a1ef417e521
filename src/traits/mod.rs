pub mod controller;
pub mod shader_host;
pub mod window;

pub use controller::*;
pub use shader_host::*;
pub use window::*;
