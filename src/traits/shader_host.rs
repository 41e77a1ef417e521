use crate::uniforms::{SlotKind, UniformValue};

/// Uniform store of the active GPU program.
///
/// Slot handles are looked up by name once, when the program is linked, and
/// reused every frame afterwards.
pub trait ShaderHost {
    /// Opaque handle for a resolved slot
    type Slot: Copy;

    /// Whether a compiled and linked program is currently available
    fn has_program(&self) -> bool;

    /// Look up a named slot and its declared type in the active program
    fn resolve_slot(&self, name: &str) -> Option<(Self::Slot, SlotKind)>;

    /// Write one value into a previously resolved slot
    fn write_slot(&mut self, slot: Self::Slot, value: UniformValue);
}
