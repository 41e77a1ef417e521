pub mod bindings;
pub mod clock;
pub mod gpu_context;
pub mod input;
pub mod input_adapter;
pub mod latch;

pub use bindings::{Action, KeyBindings};
pub use clock::{Clock, FpsCounter};
pub use gpu_context::GpuContext;
pub use input::{InputState, InputTracker};
pub use input_adapter::WinitController;
pub use latch::{Edge, EdgeLatch};
