//! Uniform synchronization: the named slots a tracer program binds against,
//! resolved once at link time and written once per frame.

use glam::{Vec2, Vec3};
use log::{debug, info, warn};

use crate::accumulation::ParameterSnapshot;
use crate::error::{Result, TracerError};
use crate::traits::ShaderHost;

/// Declared type of a uniform slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Float,
    Int,
    Vec2,
    Vec3,
}

/// A value written into a uniform slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
}

impl UniformValue {
    pub fn kind(&self) -> SlotKind {
        match self {
            UniformValue::Float(_) => SlotKind::Float,
            UniformValue::Int(_) => SlotKind::Int,
            UniformValue::Vec2(_) => SlotKind::Vec2,
            UniformValue::Vec3(_) => SlotKind::Vec3,
        }
    }
}

/// The stable slot table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    ViewportSize,
    RayOrigin,
    ForwardDir,
    Fov,
    Bounces,
    Samples,
    Time,
    Mouse,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::ViewportSize,
        Slot::RayOrigin,
        Slot::ForwardDir,
        Slot::Fov,
        Slot::Bounces,
        Slot::Samples,
        Slot::Time,
        Slot::Mouse,
    ];

    /// Canonical name the program declares
    pub fn name(self) -> &'static str {
        match self {
            Slot::ViewportSize => "ViewportSize",
            Slot::RayOrigin => "RayOrigin",
            Slot::ForwardDir => "ForwardDir",
            Slot::Fov => "FOV",
            Slot::Bounces => "Bounces",
            Slot::Samples => "NumSamples",
            Slot::Time => "Time",
            Slot::Mouse => "Mouse",
        }
    }

    /// Older programs spell some slots differently
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Slot::Samples => &["Samples"],
            _ => &[],
        }
    }

    pub fn kind(self) -> SlotKind {
        match self {
            Slot::ViewportSize | Slot::Mouse => SlotKind::Vec2,
            Slot::RayOrigin | Slot::ForwardDir => SlotKind::Vec3,
            Slot::Fov | Slot::Time => SlotKind::Float,
            Slot::Bounces | Slot::Samples => SlotKind::Int,
        }
    }

    /// Written every frame, as opposed to once at link time
    pub fn per_frame(self) -> bool {
        self != Slot::ViewportSize
    }

    /// Programs may leave this slot out without a warning
    pub fn optional(self) -> bool {
        self == Slot::Mouse
    }

    /// Value of a per-frame slot taken from the snapshot
    pub fn value(self, snapshot: &ParameterSnapshot) -> Option<UniformValue> {
        let value = match self {
            Slot::ViewportSize => return None,
            Slot::RayOrigin => UniformValue::Vec3(snapshot.ray_origin),
            Slot::ForwardDir => UniformValue::Vec3(snapshot.forward_dir),
            Slot::Fov => UniformValue::Float(snapshot.fov_deg),
            Slot::Bounces => UniformValue::Int(snapshot.bounces),
            Slot::Samples => UniformValue::Int(snapshot.samples),
            Slot::Time => UniformValue::Float(snapshot.time),
            Slot::Mouse => UniformValue::Vec2(snapshot.mouse.unwrap_or(Vec2::ZERO)),
        };
        Some(value)
    }
}

/// Slot handles of one linked program
pub struct UniformSync<H: ShaderHost> {
    viewport: Option<H::Slot>,
    per_frame: Vec<(Slot, H::Slot)>,
}

impl<H: ShaderHost> UniformSync<H> {
    /// Resolve every slot against the host's current program and write the
    /// viewport size.
    ///
    /// Missing slots are skipped. A slot declared with a different type is an error.
    pub fn link(host: &mut H, viewport: Vec2) -> Result<Self> {
        if !host.has_program() {
            return Err(TracerError::NoProgram);
        }

        let mut sync = Self {
            viewport: None,
            per_frame: Vec::with_capacity(Slot::ALL.len()),
        };

        for slot in Slot::ALL {
            let found = std::iter::once(slot.name())
                .chain(slot.aliases().iter().copied())
                .find_map(|name| host.resolve_slot(name));

            let Some((handle, actual)) = found else {
                if slot.optional() {
                    debug!("Program has no {} uniform", slot.name());
                } else {
                    warn!("Program has no {} uniform, it will not be updated", slot.name());
                }
                continue;
            };

            if actual != slot.kind() {
                return Err(TracerError::SlotType {
                    name: slot.name(),
                    expected: slot.kind(),
                    actual,
                });
            }

            if slot.per_frame() {
                sync.per_frame.push((slot, handle));
            } else {
                sync.viewport = Some(handle);
            }
        }

        info!("Linked {} uniform slots", sync.len());
        sync.update_viewport(host, viewport);
        Ok(sync)
    }

    /// Write every resolved per-frame slot once. Returns the number written;
    /// nothing is written while the host has no program.
    pub fn push(&self, host: &mut H, snapshot: &ParameterSnapshot) -> usize {
        if !host.has_program() {
            return 0;
        }

        let mut written = 0;
        for &(slot, handle) in &self.per_frame {
            if let Some(value) = slot.value(snapshot) {
                host.write_slot(handle, value);
                written += 1;
            }
        }
        written
    }

    /// Re-write the viewport size after the render target changed
    pub fn update_viewport(&self, host: &mut H, viewport: Vec2) -> bool {
        match self.viewport {
            Some(handle) if host.has_program() => {
                host.write_slot(handle, UniformValue::Vec2(viewport));
                true
            }
            _ => false,
        }
    }

    /// Slots that resolved, link-time slot first
    pub fn resolved(&self) -> impl Iterator<Item = Slot> + '_ {
        self.viewport
            .map(|_| Slot::ViewportSize)
            .into_iter()
            .chain(self.per_frame.iter().map(|&(slot, _)| slot))
    }

    pub fn len(&self) -> usize {
        self.per_frame.len() + usize::from(self.viewport.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TableHost {
        declared: Vec<(&'static str, SlotKind)>,
        writes: Vec<(usize, UniformValue)>,
        linked: bool,
    }

    impl TableHost {
        fn full() -> Self {
            Self {
                declared: Slot::ALL.iter().map(|s| (s.name(), s.kind())).collect(),
                writes: Vec::new(),
                linked: true,
            }
        }
    }

    impl ShaderHost for TableHost {
        type Slot = usize;

        fn has_program(&self) -> bool {
            self.linked
        }

        fn resolve_slot(&self, name: &str) -> Option<(usize, SlotKind)> {
            self.declared
                .iter()
                .position(|(n, _)| *n == name)
                .map(|i| (i, self.declared[i].1))
        }

        fn write_slot(&mut self, slot: usize, value: UniformValue) {
            self.writes.push((slot, value));
        }
    }

    fn snapshot() -> ParameterSnapshot {
        ParameterSnapshot {
            time: 1.5,
            bounces: 16,
            samples: 8,
            ray_origin: Vec3::new(0.0, 0.0, 3.0),
            forward_dir: Vec3::NEG_Z,
            fov_deg: 60.0,
            mouse: None,
        }
    }

    #[test]
    fn slot_kinds_match_values() {
        for slot in Slot::ALL.into_iter().filter(|s| s.per_frame()) {
            let value = slot.value(&snapshot()).unwrap();
            assert_eq!(value.kind(), slot.kind(), "{}", slot.name());
        }
    }

    #[test]
    fn link_writes_viewport_once() {
        let mut host = TableHost::full();
        let sync = UniformSync::link(&mut host, Vec2::new(800.0, 600.0)).unwrap();

        assert_eq!(sync.len(), Slot::ALL.len());
        assert_eq!(host.writes, vec![(0, UniformValue::Vec2(Vec2::new(800.0, 600.0)))]);
    }

    #[test]
    fn link_without_program_fails() {
        let mut host = TableHost::default();
        assert!(matches!(
            UniformSync::link(&mut host, Vec2::ONE),
            Err(TracerError::NoProgram)
        ));
    }

    #[test]
    fn samples_alias_resolves() {
        let mut host = TableHost {
            declared: vec![("Samples", SlotKind::Int)],
            linked: true,
            ..Default::default()
        };
        let sync = UniformSync::link(&mut host, Vec2::ONE).unwrap();
        assert_eq!(sync.resolved().collect::<Vec<_>>(), vec![Slot::Samples]);
    }

    #[test]
    fn mismatched_type_is_rejected() {
        let mut host = TableHost {
            declared: vec![("Bounces", SlotKind::Float)],
            linked: true,
            ..Default::default()
        };
        let err = UniformSync::link(&mut host, Vec2::ONE).err().unwrap();
        assert!(matches!(
            err,
            TracerError::SlotType { name: "Bounces", expected: SlotKind::Int, actual: SlotKind::Float }
        ));
    }

    #[test]
    fn missing_mouse_writes_origin() {
        assert_eq!(
            Slot::Mouse.value(&snapshot()),
            Some(UniformValue::Vec2(Vec2::ZERO))
        );
    }
}
